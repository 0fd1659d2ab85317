//! The optimistic-typing deoptimization protocol: the
//! `UnwarrantedOptimism` exception generated code throws at a pinned
//! optimistic operation, and the `RecompilationTracker` that widens a
//! function's pp→type map in response and decides what to persist.

pub mod exception;
pub mod recompile;

pub use exception::UnwarrantedOptimism;
pub use recompile::{RecompilationEvent, RecompilationTracker, RECOMPILE_TARGET};
