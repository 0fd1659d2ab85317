//! Errors the host boundary raises.

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum HostError {
    /// The default `AbstractJsObject` impl for any non-essential
    /// member: `call`/`newObject`/`eval` on a plain object, etc.
    #[error("unsupported operation: {0}")]
    UnsupportedOperation(&'static str),
    /// `getDefaultValue` found no primitive-yielding conversion
    /// (ECMA 8.6.2), mapped from the engine's `TypeError`.
    #[error("cannot convert object to primitive value: {0}")]
    TypeError(String),
    /// A `Bindings` key was non-string or null; carries the offending
    /// value's class name so the message names what was actually passed.
    #[error("class cast exception: binding keys must be strings, got {0}")]
    ClassCast(String),
    #[error("null argument")]
    NullArgument,
    /// A `Bindings` key was the empty string.
    #[error("illegal argument: {0}")]
    IllegalArgument(String),
}
