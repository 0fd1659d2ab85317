//! `RecompilationEvent` and the pp→type widening map that drives it.

use crate::exception::UnwarrantedOptimism;
use esc_ir::ProgramPoint;
use esc_types::Type;
use std::collections::BTreeMap;
use tracing::{Level, event, span};

/// The target `tracing` events are filed under — a caller enables the
/// "recompile" logger via an environment-controlled filter the same
/// way any other per-pass span in this workspace is gated.
pub const RECOMPILE_TARGET: &str = "recompile";

/// Wraps the deopt that triggered a recompilation. The pre-destruction
/// return value is retained only when the recompile logger is
/// enabled; under normal operation it is dropped to avoid leaks.
#[derive(Clone, Debug)]
pub struct RecompilationEvent<V> {
    pub program_point: ProgramPoint,
    pub widened_type: Type,
    pub return_value: Option<V>,
}

/// Tracks the pp→widened-type map a deoptimizing catch site builds up
/// across a function's recompilations, and decides the next widening
/// step.
#[derive(Default, Debug, Clone)]
pub struct RecompilationTracker {
    widened: BTreeMap<ProgramPoint, Type>,
}

impl RecompilationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restores a tracker from a previously persisted pp→type map.
    pub fn from_snapshot(snapshot: BTreeMap<u32, Type>) -> Self {
        let widened = snapshot.into_iter().map(|(pp, ty)| (ProgramPoint(pp as i32), ty)).collect();
        RecompilationTracker { widened }
    }

    /// Serializes the current map into the `u32`-keyed form
    /// `esc_types::pp_map` persists.
    pub fn snapshot(&self) -> BTreeMap<u32, Type> {
        self.widened.iter().map(|(pp, ty)| (pp.0 as u32, *ty)).collect()
    }

    pub fn widened_type(&self, pp: ProgramPoint) -> Option<Type> {
        self.widened.get(&pp).copied()
    }

    /// Records a caught `UnwarrantedOptimism` and widens the pp's
    /// recorded type to cover the observed type, returning the
    /// `RecompilationEvent` the caller should act on by recompiling
    /// (or re-linking) the affected call site.
    ///
    /// The exception's return value is consumed into the event only
    /// when the "recompile" logger is enabled at `DEBUG`; otherwise it
    /// is dropped immediately after deciding the widened type, so a
    /// disabled logger costs nothing but a pp lookup.
    pub fn record<V: std::fmt::Debug>(
        &mut self,
        exc: UnwarrantedOptimism<V>,
        observed_type: Type,
    ) -> RecompilationEvent<V> {
        let _span = span!(Level::DEBUG, "recompile", pp = exc.program_point.0).entered();
        let pp = exc.program_point;
        let previous = self.widened.get(&pp).copied().unwrap_or(observed_type);
        let widened_type = Type::widest(previous, observed_type);
        self.widened.insert(pp, widened_type);

        let logger_enabled = tracing::enabled!(target: RECOMPILE_TARGET, Level::DEBUG);
        if logger_enabled {
            event!(
                target: RECOMPILE_TARGET,
                Level::DEBUG,
                pp = pp.0,
                widened = %widened_type,
                return_value = ?exc.return_value,
                "recompiling after unwarranted optimism"
            );
            RecompilationEvent { program_point: pp, widened_type, return_value: Some(exc.return_value) }
        } else {
            RecompilationEvent { program_point: pp, widened_type, return_value: None }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widens_pp_type_across_repeated_deopts() {
        let mut tracker = RecompilationTracker::new();
        let pp = ProgramPoint(5);
        let first = tracker.record(UnwarrantedOptimism::new(1_i32, pp), Type::LONG);
        assert_eq!(first.widened_type, Type::LONG);
        let second = tracker.record(UnwarrantedOptimism::new(2_i32, pp), Type::OBJECT);
        assert_eq!(second.widened_type, Type::OBJECT);
        assert_eq!(tracker.widened_type(pp), Some(Type::OBJECT));
    }

    #[test]
    fn return_value_is_dropped_when_recompile_logger_disabled() {
        let mut tracker = RecompilationTracker::new();
        let event = tracker.record(UnwarrantedOptimism::new(7_i32, ProgramPoint(0)), Type::NUMBER);
        assert!(event.return_value.is_none(), "no subscriber enables the recompile target in tests");
    }

    #[test]
    fn snapshot_round_trips_through_a_fresh_tracker() {
        let mut tracker = RecompilationTracker::new();
        tracker.record(UnwarrantedOptimism::new(1_i32, ProgramPoint(2)), Type::NUMBER);
        let restored = RecompilationTracker::from_snapshot(tracker.snapshot());
        assert_eq!(restored.widened_type(ProgramPoint(2)), Some(Type::NUMBER));
    }
}
