//! Local-variable conversions: a chain of `(symbol, from,
//! to)` entries attached to any node at a control-flow join point.
//!
//! Modeled as a `smallvec`-backed, arena-free chain rather than a
//! singly-linked list: externally it is still walked front-to-back
//! exactly like a linked list via
//! [`ConversionChain::iter`]/`has_live_conversion`, but avoids a
//! heap-allocated cons cell per entry for the common one-or-two-entry
//! case.

use crate::symbol::SymbolId;
use esc_types::Type;
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LocalVariableConversion {
    pub symbol: SymbolId,
    pub from: Type,
    pub to: Type,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConversionChain {
    entries: SmallVec<[LocalVariableConversion; 2]>,
}

impl ConversionChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: LocalVariableConversion) {
        self.entries.push(entry);
    }

    pub fn iter(&self) -> impl Iterator<Item = &LocalVariableConversion> {
        self.entries.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// A conversion is *live* if the symbol has a slot for the `to`
    /// type. `has_live_conversion` walks the chain looking for
    /// at least one live entry for `symbol`.
    pub fn has_live_conversion(&self, symbol: SymbolId, symbol_has_slot: impl Fn(SymbolId, Type) -> bool) -> bool {
        self.entries
            .iter()
            .any(|e| e.symbol == symbol && symbol_has_slot(e.symbol, e.to))
    }
}

/// A node that sits at a control-flow join point and carries a
/// [`ConversionChain`] to reconcile representations across incoming
/// edges: `IfNode` false-edge, loop back-edges, ternary branches,
/// try/catch/finally merges, switch fall-through.
pub trait JoinPredecessor {
    fn local_variable_conversion(&self) -> &ConversionChain;
    fn with_local_variable_conversion(&self, chain: ConversionChain) -> Self
    where
        Self: Sized;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn live_conversion_requires_a_slot_for_the_to_type() {
        let mut chain = ConversionChain::new();
        chain.push(LocalVariableConversion { symbol: SymbolId(0), from: Type::INT, to: Type::NUMBER });
        assert!(chain.has_live_conversion(SymbolId(0), |_, ty| ty == Type::NUMBER));
        assert!(!chain.has_live_conversion(SymbolId(0), |_, ty| ty == Type::OBJECT));
        assert!(!chain.has_live_conversion(SymbolId(1), |_, _| true));
    }
}
