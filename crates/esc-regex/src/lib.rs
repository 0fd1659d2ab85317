//! The regex adapter: an `esc_abi::RegExpFactory` backed by the
//! `regex` crate, with ECMAScript flag validation and the bounded
//! memoizing cache `validate` relies on.

pub mod factory;
pub mod flags;

pub use factory::{EscRegexFactory, DEFAULT_CAPACITY};
pub use flags::{normalize_pattern, validate_flags};
