//! Common types and utilities for the escore ECMAScript compiler core.
//!
//! This crate provides foundational types used across every other
//! `esc-*` crate:
//! - String interning (`Atom`, `Interner`, `ShardedInterner`)
//! - Source spans (`Span`, `Spanned`)
//! - Source text identity (`Source`)
//! - Diagnostics (`Diagnostic`, `DiagnosticCategory`)
//! - Engine-exception script-stack filtering (`EngineFailure`, `ScriptFrame`)
//! - Centralized limits and thresholds
//! - Numeric conversion helpers for tests of the `Type` lattice

pub mod diagnostics;
pub mod interner;
pub mod limits;
pub mod numeric;
pub mod source;
pub mod span;

pub use diagnostics::{Diagnostic, DiagnosticCategory, DiagnosticRelatedInformation, EngineFailure, RawFrame, ScriptFrame, filter_script_stack};
pub use interner::{Atom, Interner, ShardedInterner};
pub use source::Source;
pub use span::{Span, Spanned};
