//! `escjs`: a minimal driver that runs the compile pipeline end to end
//! the way `tsz-cli`'s binaries exercise their own front-to-back
//! passes, and doubles as a hand check of the engine factory surface
//! via `--show-parameters`.

use anyhow::Result;
use clap::Parser;
use esc_cli::{EngineFactory, EngineOptions, Pipeline};
use esc_common::{Interner, Source};
use esc_ir::NodeIdAllocator;
use esc_scope::WellKnownNames;
use std::path::PathBuf;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser, Debug)]
#[command(name = "escjs", version, about = "compile-pipeline driver")]
struct CliArgs {
    /// Source file to read. Its digest feeds the code-cache key; this
    /// driver has no lexer/parser, so the file's contents are not
    /// themselves lowered into IR.
    file: Option<PathBuf>,

    /// Print the five engine factory parameters and exit.
    #[arg(long = "show-parameters")]
    show_parameters: bool,

    /// Print the resolved+flow-analyzed IR in debug form.
    #[arg(long = "dump-ir")]
    dump_ir: bool,
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("escjs=info,warn"));
    tracing_subscriber::registry().with(filter).with(tracing_tree::HierarchicalLayer::new(2)).init();
}

fn main() -> Result<()> {
    init_tracing();
    let args = CliArgs::parse();

    if args.show_parameters {
        use esc_cli::EngineParameter::*;
        for param in [Name, Engine, Language, LanguageVersion, Threading] {
            println!("{param:?} = {:?}", EngineFactory::get_parameter(param));
        }
        return Ok(());
    }

    let source = match &args.file {
        Some(path) => Source::new(std::fs::read_to_string(path)?, path.display().to_string()),
        None => Source::new(String::new(), "<demo>".to_string()),
    };
    tracing::info!(url = source.url(), len = source.len(), digest = ?source.digest()[..4], "loaded source");

    let mut ids = NodeIdAllocator::new();
    let mut interner = Interner::new();
    let names = WellKnownNames {
        this_keyword: interner.intern("this"),
        arguments: interner.intern("arguments"),
        eval: interner.intern("eval"),
    };
    let func = esc_cli::demo::build(&mut ids, &mut interner);

    let mut pipeline = Pipeline::new(EngineOptions::default(), names);
    match pipeline.compile(func) {
        Ok(compiled) => {
            if args.dump_ir {
                println!("{compiled:#?}");
            } else {
                println!("compiled `{}` with no diagnostics", compiled.name_or_anonymous());
            }
        }
        Err(err) => {
            eprintln!("compile error: {err}");
            std::process::exit(1);
        }
    }

    Ok(())
}
