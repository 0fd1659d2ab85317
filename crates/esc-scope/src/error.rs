//! Errors the scope pass can raise.

use esc_common::Atom;
use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ScopeError {
    /// Two `let`/`const` declarations with the same name in one block.
    #[error("duplicate lexical binding for {0:?} in the same block")]
    DuplicateBinding(Atom),
}
