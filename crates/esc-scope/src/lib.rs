//! The symbol & scope pass: declaration hoisting,
//! identifier resolution, and the lexical-structure function flags
//! (`USES_THIS`, `USES_ARGUMENTS`, `HAS_EVAL`, `HAS_NESTED_EVAL`,
//! `USES_ANCESTOR_SCOPE`, `USES_SELF_SYMBOL`, `HAS_FUNCTION_DECLARATIONS`).

pub mod error;
pub mod hoist;
pub mod resolver;

pub use error::ScopeError;
pub use resolver::{Resolver, WellKnownNames};
