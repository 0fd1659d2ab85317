//! `UnwarrantedOptimismException`: the runtime-facing escape
//! hatch generated code throws when a value observed at a pinned-type
//! call site doesn't fit the pinned type.
//!
//! The value carried is whatever the host's runtime value
//! representation is — this core has no opinion on it, so the
//! exception is generic over it rather than naming a concrete type.

use esc_ir::ProgramPoint;
use std::fmt;

/// Thrown from generated code at an optimistic operation whose actual
/// result doesn't fit the type that was pinned for it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UnwarrantedOptimism<V> {
    pub return_value: V,
    pub program_point: ProgramPoint,
}

impl<V> UnwarrantedOptimism<V> {
    pub fn new(return_value: V, program_point: ProgramPoint) -> Self {
        debug_assert!(program_point.is_valid(), "deopt exception must carry a valid program point");
        UnwarrantedOptimism { return_value, program_point }
    }
}

impl<V: fmt::Debug> fmt::Display for UnwarrantedOptimism<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unwarranted optimism at pp {}: returned {:?}", self.program_point.0, self.return_value)
    }
}

impl<V: fmt::Debug> std::error::Error for UnwarrantedOptimism<V> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[should_panic]
    fn invalid_program_point_is_rejected_in_debug_builds() {
        UnwarrantedOptimism::new(1_i32, ProgramPoint::INVALID);
    }

    #[test]
    fn display_includes_pp_and_value() {
        let exc = UnwarrantedOptimism::new(42_i32, ProgramPoint(3));
        assert_eq!(exc.to_string(), "unwarranted optimism at pp 3: returned 42");
    }
}
