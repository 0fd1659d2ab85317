//! `RegExpFactory` — the regex engine treated as an external
//! collaborator: the core only needs `compile`/`validate`,
//! never the regex engine's internals.

/// An opaque handle to a compiled pattern, owned by whatever cache the
/// concrete `RegExpFactory` implementation (`esc-regex`) maintains.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RegExpHandle(pub u64);

pub trait RegExpFactory {
    /// Compiles (or fetches from cache) a pattern+flags pair.
    /// Flags are validated before compilation is attempted.
    fn compile(&self, pattern: &str, flags: &str) -> Result<RegExpHandle, RegExpFactoryError>;

    /// `validate` is `compile` with the result discarded.
    fn validate(&self, pattern: &str, flags: &str) -> Result<(), RegExpFactoryError> {
        self.compile(pattern, flags).map(|_| ())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RegExpFactoryError {
    #[error("repeated flag '{0}'")]
    RepeatedFlag(char),
    #[error("unsupported flag '{0}'")]
    UnsupportedFlag(char),
    #[error("invalid regular expression: {0}")]
    InvalidPattern(String),
}
