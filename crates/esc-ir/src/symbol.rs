//! `Symbol` — a named local/global binding, and the
//! insertion-ordered symbol table a `Block` owns.

use bitflags::bitflags;
use esc_common::Atom;
use esc_types::Type;
use indexmap::IndexMap;
use smallvec::SmallVec;

bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct SymbolFlags: u32 {
        const IS_VAR    = 1 << 0;
        const IS_LET    = 1 << 1;
        const IS_CONST  = 1 << 2;
        const IS_PARAM  = 1 << 3;
        const IS_SCOPE  = 1 << 4;
        const IS_GLOBAL = 1 << 5;
        const IS_THIS   = 1 << 6;
        /// The synthetic binding a named function *expression* sees for
        /// its own name inside its own body —
        /// distinct from a declared function's name, which binds in the
        /// enclosing scope instead.
        const IS_SELF   = 1 << 7;
    }
}

/// A symbol may carry multiple type-specialized slots, each keyed by
/// type; `SmallVec` avoids a heap allocation for the overwhelmingly
/// common case of one or two specializations.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SlotTable {
    slots: SmallVec<[(Type, u32); 2]>,
}

impl SlotTable {
    pub fn get(&self, ty: Type) -> Option<u32> {
        self.slots.iter().find(|(t, _)| *t == ty).map(|(_, slot)| *slot)
    }

    pub fn set(&mut self, ty: Type, slot: u32) {
        if let Some(entry) = self.slots.iter_mut().find(|(t, _)| *t == ty) {
            entry.1 = slot;
        } else {
            self.slots.push((ty, slot));
        }
    }

    pub fn has(&self, ty: Type) -> bool {
        self.get(ty).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn types(&self) -> impl Iterator<Item = Type> + '_ {
        self.slots.iter().map(|(t, _)| *t)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Symbol {
    pub id: SymbolId,
    pub name: Atom,
    pub flags: SymbolFlags,
    pub slots: SlotTable,
    /// A type the symbol has been pinned to by a prior optimistic pass;
    /// `None` means no pin.
    pub pinned_type: Option<Type>,
}

impl Symbol {
    pub fn new(id: SymbolId, name: Atom, flags: SymbolFlags) -> Self {
        Symbol { id, name, flags, slots: SlotTable::default(), pinned_type: None }
    }

    pub fn is_block_scoped(&self) -> bool {
        self.flags.intersects(SymbolFlags::IS_LET | SymbolFlags::IS_CONST)
    }

    pub fn is_var(&self) -> bool {
        self.flags.contains(SymbolFlags::IS_VAR)
    }

    /// Total slot count across all type specializations — used by
    /// `Block::next_slot` to compute a relative slot base.
    pub fn slot_count(&self) -> u32 {
        self.slots.types().map(|t| t.slot_count() as u32).sum()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SymbolId(pub u32);

/// Hands out increasing `SymbolId`s within one compile, mirroring
/// [`crate::node_id::NodeIdAllocator`]'s shape — owned by whichever
/// pass first needs to mint symbols (`esc-scope`'s resolver).
#[derive(Default)]
pub struct SymbolIdAllocator {
    next: u32,
}

impl SymbolIdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&mut self) -> SymbolId {
        let id = SymbolId(self.next);
        self.next += 1;
        id
    }
}

/// A block's symbol table: insertion-ordered, copy-on-write across replacement (an `IndexMap` clone is
/// O(n) but blocks are shallow and replacement is infrequent relative
/// to read-heavy lookup).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SymbolTable {
    by_name: IndexMap<Atom, Symbol>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, symbol: Symbol) {
        self.by_name.insert(symbol.name, symbol);
    }

    pub fn get(&self, name: Atom) -> Option<&Symbol> {
        self.by_name.get(&name)
    }

    pub fn get_mut(&mut self, name: Atom) -> Option<&mut Symbol> {
        self.by_name.get_mut(&name)
    }

    pub fn contains(&self, name: Atom) -> bool {
        self.by_name.contains_key(&name)
    }

    /// Declaration-order iteration.
    pub fn iter(&self) -> impl Iterator<Item = &Symbol> {
        self.by_name.values()
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    /// Replaces the table's contents via a substitution map, without
    /// touching referencing `Ident` nodes — a subsequent pass rewires
    /// those by name.
    pub fn replace_symbols(&self, replacements: impl Fn(&Symbol) -> Option<Symbol>) -> SymbolTable {
        let mut out = SymbolTable::new();
        for sym in self.iter() {
            out.insert(replacements(sym).unwrap_or_else(|| sym.clone()));
        }
        out
    }

    /// Sum of `slotCount()` over symbols with assigned slots, used as
    /// a relative slot base.
    pub fn next_slot(&self) -> u32 {
        self.by_name.values().filter(|s| !s.slots.is_empty()).map(Symbol::slot_count).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use esc_common::Interner;

    #[test]
    fn iteration_preserves_insertion_order() {
        let mut interner = Interner::new();
        let mut table = SymbolTable::new();
        let names = ["c", "a", "b"];
        for (i, n) in names.iter().enumerate() {
            let atom = interner.intern(n);
            table.insert(Symbol::new(SymbolId(i as u32), atom, SymbolFlags::IS_VAR));
        }
        let seen: Vec<&str> = table.iter().map(|s| interner.resolve(s.name)).collect();
        assert_eq!(seen, names);
    }

    #[test]
    fn slot_table_tracks_per_type_specializations() {
        let mut slots = SlotTable::default();
        slots.set(Type::INT, 3);
        slots.set(Type::OBJECT, 4);
        assert_eq!(slots.get(Type::INT), Some(3));
        assert_eq!(slots.get(Type::OBJECT), Some(4));
        assert_eq!(slots.get(Type::NUMBER), None);
    }
}
