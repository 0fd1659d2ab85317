//! Process-wide string interning, used for identifier names and the
//! `Type` singleton table (see `esc-types`).

use rustc_hash::FxHashMap;
use std::sync::{Arc, RwLock};

/// An interned string. Cheap to copy and compare (pointer/id equality).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Atom(u32);

/// A single-threaded, insertion-ordered interner.
#[derive(Default)]
pub struct Interner {
    strings: Vec<Arc<str>>,
    lookup: FxHashMap<Arc<str>, u32>,
}

impl Interner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn intern(&mut self, s: &str) -> Atom {
        if let Some(&id) = self.lookup.get(s) {
            return Atom(id);
        }
        let id = self.strings.len() as u32;
        let arc: Arc<str> = Arc::from(s);
        self.strings.push(arc.clone());
        self.lookup.insert(arc, id);
        Atom(id)
    }

    pub fn resolve(&self, atom: Atom) -> &str {
        &self.strings[atom.0 as usize]
    }
}

/// A `RwLock`-guarded interner safe to share behind a process-wide
/// `once_cell::sync::Lazy`. Named for the sharded variant this is
/// modeled after, though it holds a single lock rather than sharding
/// across several (identifier volume here is modest).
#[derive(Default)]
pub struct ShardedInterner {
    inner: RwLock<Interner>,
}

impl ShardedInterner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn intern(&self, s: &str) -> Atom {
        if let Some(&id) = self.inner.read().unwrap().lookup.get(s) {
            return Atom(id);
        }
        self.inner.write().unwrap().intern(s)
    }

    pub fn resolve(&self, atom: Atom) -> Arc<str> {
        self.inner.read().unwrap().strings[atom.0 as usize].clone()
    }
}
