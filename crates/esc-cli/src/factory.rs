//! `EngineFactory`: the names/MIME types/
//! extensions/parameters a host embedder discovers the engine by, plus
//! the three syntax-generation helper methods. Deliberately has no
//! `clap` dependency — the engine factory is a thin, separable layer,
//! so the embeddable factory type stays usable without pulling in
//! argument parsing.

pub const ENGINE_NAMES: &[&str] = &["nashorn", "js", "javascript", "ecmascript"];
pub const MIME_TYPES: &[&str] =
    &["application/javascript", "application/ecmascript", "text/javascript", "text/ecmascript"];
pub const EXTENSIONS: &[&str] = &["js"];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EngineParameter {
    Name,
    Engine,
    Language,
    LanguageVersion,
    Threading,
}

pub struct EngineFactory;

impl EngineFactory {
    /// Case-insensitive match against the factory's recognized short
    /// names.
    pub fn answers_to(name: &str) -> bool {
        let lower = name.to_lowercase();
        ENGINE_NAMES.contains(&lower.as_str())
    }

    pub fn mime_types() -> &'static [&'static str] {
        MIME_TYPES
    }

    pub fn extensions() -> &'static [&'static str] {
        EXTENSIONS
    }

    /// The five named engine parameters. `THREADING = null` documents
    /// that an engine instance is not thread-safe; there is no
    /// "unreachable code after the parameter switch" artifact to
    /// reproduce here since this isn't lowered from a `switch`
    /// expression in the first place.
    pub fn get_parameter(param: EngineParameter) -> Option<&'static str> {
        match param {
            EngineParameter::Name => Some("javascript"),
            EngineParameter::Engine => Some("escore"),
            EngineParameter::Language => Some("ECMAScript"),
            EngineParameter::LanguageVersion => Some("ECMA - 262 Edition 5.1"),
            EngineParameter::Threading => None,
        }
    }

    /// `getMethodCallSyntax(obj, method, args)` ⇒ `obj.method(a1,a2,…)`.
    pub fn method_call_syntax(obj: &str, method: &str, args: &[&str]) -> String {
        format!("{obj}.{method}({})", args.join(","))
    }

    /// `getOutputStatement(s)` ⇒ `print(<s>)`.
    pub fn output_statement(s: &str) -> String {
        format!("print({s})")
    }

    /// `getProgram(stmts)` ⇒ `stmt1;stmt2;…`.
    pub fn program(stmts: &[&str]) -> String {
        stmts.iter().map(|s| format!("{s};")).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn answers_to_is_case_insensitive() {
        assert!(EngineFactory::answers_to("JavaScript"));
        assert!(EngineFactory::answers_to("NASHORN"));
        assert!(!EngineFactory::answers_to("python"));
    }

    #[test]
    fn threading_parameter_is_absent() {
        assert_eq!(EngineFactory::get_parameter(EngineParameter::Threading), None);
    }

    #[test]
    fn method_call_syntax_joins_args_without_spaces() {
        assert_eq!(EngineFactory::method_call_syntax("obj", "foo", &["a", "b"]), "obj.foo(a,b)");
    }

    #[test]
    fn program_joins_statements_with_semicolons() {
        assert_eq!(EngineFactory::program(&["var x = 1", "print(x)"]), "var x = 1;print(x);");
    }
}
