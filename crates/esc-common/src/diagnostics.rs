//! Diagnostic taxonomy shared by every pass.
//!
//! Each pass-level error type wraps a `Diagnostic` rather than a bare
//! string so the CLI boundary can render `file:line:column` uniformly.

use crate::span::Span;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DiagnosticCategory {
    ParserError,
    UnsupportedOperation,
    IllegalArgument,
    ClassCast,
    UnwarrantedOptimism,
    EngineException,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticRelatedInformation {
    pub file: String,
    pub span: Span,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub category: DiagnosticCategory,
    /// Short machine-readable key, e.g. "repeated.flag", "cannot.get.default.number".
    pub key: &'static str,
    pub file: String,
    pub span: Span,
    pub message: String,
    pub related_information: Vec<DiagnosticRelatedInformation>,
}

impl Diagnostic {
    pub fn new(
        category: DiagnosticCategory,
        key: &'static str,
        file: impl Into<String>,
        span: Span,
        message: impl Into<String>,
    ) -> Self {
        Self {
            category,
            key,
            file: file.into(),
            span,
            message: message.into(),
            related_information: Vec::new(),
        }
    }

    pub fn with_related(mut self, file: impl Into<String>, span: Span, message: impl Into<String>) -> Self {
        self.related_information.push(DiagnosticRelatedInformation {
            file: file.into(),
            span,
            message: message.into(),
        });
        self
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}: {}", self.file, self.span, self.message)
    }
}

/// One frame as reported by a generated stack trace, before the
/// script/native distinction is resolved. Script frames are tagged
/// `<fileName>.methodPath`; anything else is a native frame and is
/// dropped by [`filter_script_stack`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFrame(pub String);

impl RawFrame {
    pub fn new(text: impl Into<String>) -> Self {
        RawFrame(text.into())
    }
}

/// A filtered, human-readable script stack frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptFrame {
    pub method_name: String,
    pub file_name: String,
}

fn parse_script_frame(raw: &str) -> Option<ScriptFrame> {
    let rest = raw.strip_prefix('<')?;
    let (file_name, rest) = rest.split_once('>')?;
    let method_path = rest.strip_prefix('.')?;
    let method_name = method_path.rsplit('$').next().unwrap_or(method_path);
    Some(ScriptFrame { method_name: method_name.to_string(), file_name: file_name.to_string() })
}

/// Walks raw frames, keeping only those tagged as script frames and
/// stripping `$id` nested-function separators from the method path
/// down to its final segment — `bar$1$baz` becomes `baz`, `<program>`
/// is left as-is.
pub fn filter_script_stack(frames: &[RawFrame]) -> Vec<ScriptFrame> {
    frames.iter().filter_map(|f| parse_script_frame(&f.0)).collect()
}

/// The user-visible shape of an engine exception: source location,
/// filtered script stack, and the thrown value (`ecmaError`).
#[derive(Debug, Clone, PartialEq)]
pub struct EngineFailure<E> {
    pub file_name: Option<String>,
    pub line_number: i32,
    pub column_number: i32,
    pub script_stack: Vec<ScriptFrame>,
    pub ecma_error: E,
}

impl<E> EngineFailure<E> {
    pub fn new(file_name: Option<String>, line_number: i32, column_number: i32, raw_frames: &[RawFrame], ecma_error: E) -> Self {
        EngineFailure { file_name, line_number, column_number, script_stack: filter_script_stack(raw_frames), ecma_error }
    }
}

#[cfg(test)]
mod script_stack_tests {
    use super::*;

    #[test]
    fn program_frame_keeps_its_bracketed_name() {
        let frames = [RawFrame::new("<foo.js>.<program>")];
        let filtered = filter_script_stack(&frames);
        assert_eq!(filtered, vec![ScriptFrame { method_name: "<program>".to_string(), file_name: "foo.js".to_string() }]);
    }

    #[test]
    fn nested_function_frame_strips_id_separators() {
        let frames = [RawFrame::new("<foo.js>.bar$1$baz")];
        let filtered = filter_script_stack(&frames);
        assert_eq!(filtered, vec![ScriptFrame { method_name: "baz".to_string(), file_name: "foo.js".to_string() }]);
    }

    #[test]
    fn both_frames_together_match_the_documented_extraction() {
        let frames = [RawFrame::new("<foo.js>.<program>"), RawFrame::new("<foo.js>.bar$1$baz")];
        let filtered = filter_script_stack(&frames);
        assert_eq!(filtered.len(), 2);
        assert_eq!(filtered[0].method_name, "<program>");
        assert_eq!(filtered[1].method_name, "baz");
        assert!(filtered.iter().all(|f| f.file_name == "foo.js"));
    }

    #[test]
    fn native_frame_without_bracket_tag_is_dropped() {
        let frames = [RawFrame::new("java.lang.Thread.run"), RawFrame::new("<foo.js>.<program>")];
        let filtered = filter_script_stack(&frames);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].file_name, "foo.js");
    }
}
