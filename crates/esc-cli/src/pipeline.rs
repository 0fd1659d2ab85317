//! `Pipeline`: owns one instance of
//! each analysis pass and runs them in order — symbol/scope
//! resolution, then flow metadata — over one `Function`, matching
//! `tsz-checker::context::CheckerContext` driving passes in sequence
//! over one `NodeArena`.

use crate::error::EngineError;
use crate::options::EngineOptions;
use esc_flow::FlowPass;
use esc_scope::{Resolver, WellKnownNames};
use std::rc::Rc;
use tracing::{span, Level};

pub struct Pipeline {
    options: EngineOptions,
    resolver: Resolver,
    flow: FlowPass,
}

impl Pipeline {
    pub fn new(options: EngineOptions, names: WellKnownNames) -> Self {
        Pipeline { options, resolver: Resolver::new(names), flow: FlowPass::new() }
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// Runs the scope pass then the flow pass over `func`, in that
    /// order. Scope errors short-circuit before flow runs since
    /// flow's try/label bookkeeping assumes a function that already
    /// resolved cleanly.
    pub fn compile(&mut self, func: Rc<esc_ir::Function>) -> Result<Rc<esc_ir::Function>, EngineError> {
        let _span = span!(Level::DEBUG, "pipeline_compile", function = func.meta.id.0).entered();

        let resolved = self.resolver.resolve(func);
        if let Some(err) = self.resolver.errors.first().copied() {
            return Err(EngineError::Scope(err));
        }

        let flowed = self.flow.run(resolved);
        Ok(flowed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use esc_common::Interner;
    use esc_ir::{Block, BlockFlags, Function, FunctionFlags, FunctionKind, NodeId, NodeMeta, SymbolTable};
    use esc_token::{Token, TokenKind};

    fn well_known_names(interner: &mut Interner) -> WellKnownNames {
        WellKnownNames {
            this_keyword: interner.intern("this"),
            arguments: interner.intern("arguments"),
            eval: interner.intern("eval"),
        }
    }

    fn empty_program() -> Rc<Function> {
        Rc::new(Function {
            meta: NodeMeta { id: NodeId(0), token: Token::synthetic(TokenKind::Function), finish: 0 },
            name: None,
            parameters: vec![],
            body: Rc::new(Block {
                id: NodeId(1),
                token: Token::synthetic(TokenKind::LBrace),
                finish: 0,
                statements: vec![],
                symbols: SymbolTable::new(),
                flags: BlockFlags::IS_BODY | BlockFlags::IS_GLOBAL_SCOPE,
                entry_label: None,
                break_label: None,
            }),
            kind: FunctionKind::Script,
            flags: FunctionFlags::IS_PROGRAM,
            compile_unit: None,
            return_type: None,
            self_symbol: None,
        })
    }

    #[test]
    fn compiles_an_empty_program_through_both_passes() {
        let mut interner = Interner::new();
        let names = well_known_names(&mut interner);
        let mut pipeline = Pipeline::new(EngineOptions::default(), names);
        assert!(pipeline.compile(empty_program()).is_ok());
    }
}
