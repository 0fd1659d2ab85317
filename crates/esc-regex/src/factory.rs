//! `EscRegexFactory`: the `RegExpFactory` implementation
//! backing `esc-abi`'s boundary trait with the `regex` crate.
//!
//! The bounded weak cache is approximated here as a bounded
//! capacity-evicting cache rather than true GC weak references — Rust
//! has no ambient garbage collector for this core to hook a weak
//! reference into, so the closest faithful rendition is an explicit
//! LRU-style eviction once the cache exceeds its configured capacity.

use crate::flags::{normalize_pattern, validate_flags};
use dashmap::DashMap;
use esc_abi::{RegExpFactory, RegExpFactoryError, RegExpHandle};
use regex::{Regex, RegexBuilder};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

pub const DEFAULT_CAPACITY: usize = 256;

pub struct EscRegexFactory {
    capacity: usize,
    by_key: DashMap<String, RegExpHandle>,
    by_handle: DashMap<u64, Arc<Regex>>,
    order: Mutex<VecDeque<u64>>,
    next_id: AtomicU64,
}

impl EscRegexFactory {
    pub fn new(capacity: usize) -> Self {
        EscRegexFactory {
            capacity,
            by_key: DashMap::new(),
            by_handle: DashMap::new(),
            order: Mutex::new(VecDeque::new()),
            next_id: AtomicU64::new(0),
        }
    }

    fn build(pattern: &str, flags: &str) -> Result<Regex, RegExpFactoryError> {
        validate_flags(flags)?;
        RegexBuilder::new(normalize_pattern(pattern))
            .case_insensitive(flags.contains('i'))
            .multi_line(flags.contains('m'))
            .build()
            .map_err(|e| RegExpFactoryError::InvalidPattern(e.to_string()))
    }

    fn insert(&self, regex: Regex) -> RegExpHandle {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.by_handle.insert(id, Arc::new(regex));
        self.touch(id);
        RegExpHandle(id)
    }

    fn touch(&self, id: u64) {
        let mut order = self.order.lock().expect("regex cache order mutex poisoned");
        order.retain(|&x| x != id);
        order.push_back(id);
        while order.len() > self.capacity {
            if let Some(evicted) = order.pop_front() {
                self.by_handle.remove(&evicted);
                tracing::trace!(handle = evicted, "evicted regex from bounded cache");
            }
        }
    }

    /// `create(pattern, flags)`: memoizes in the bounded cache
    /// keyed by `pattern/flags`, compiling only on a miss.
    pub fn create(&self, pattern: &str, flags: &str) -> Result<RegExpHandle, RegExpFactoryError> {
        let key = format!("{pattern}/{flags}");
        if let Some(handle) = self.by_key.get(&key) {
            if self.by_handle.contains_key(&handle.0) {
                self.touch(handle.0);
                return Ok(*handle);
            }
        }
        let regex = Self::build(pattern, flags)?;
        let handle = self.insert(regex);
        self.by_key.insert(key, handle);
        Ok(handle)
    }

    /// Resolves a handle back to the compiled pattern, refreshing its
    /// position in the eviction order.
    pub fn get(&self, handle: RegExpHandle) -> Option<Arc<Regex>> {
        let found = self.by_handle.get(&handle.0).map(|r| r.clone());
        if found.is_some() {
            self.touch(handle.0);
        }
        found
    }

    pub fn len(&self) -> usize {
        self.by_handle.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_handle.is_empty()
    }
}

impl Default for EscRegexFactory {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl RegExpFactory for EscRegexFactory {
    /// `compile(pattern, flags)`: always builds fresh, never
    /// consults the memoizing cache `create` uses.
    fn compile(&self, pattern: &str, flags: &str) -> Result<RegExpHandle, RegExpFactoryError> {
        let regex = Self::build(pattern, flags)?;
        Ok(self.insert(regex))
    }

    /// `validate` is `create` and discard — not `compile` and
    /// discard, so a repeated `validate` of the same pattern doesn't
    /// keep rebuilding it.
    fn validate(&self, pattern: &str, flags: &str) -> Result<(), RegExpFactoryError> {
        self.create(pattern, flags).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_memoizes_identical_pattern_flags() {
        let factory = EscRegexFactory::default();
        let a = factory.create("a+", "i").unwrap();
        let b = factory.create("a+", "i").unwrap();
        assert_eq!(a, b);
        assert_eq!(factory.len(), 1);
    }

    #[test]
    fn compile_never_reuses_an_existing_handle() {
        let factory = EscRegexFactory::default();
        let a = factory.compile("a+", "").unwrap();
        let b = factory.compile("a+", "").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn invalid_pattern_is_rejected() {
        let factory = EscRegexFactory::default();
        assert!(matches!(factory.compile("(", ""), Err(RegExpFactoryError::InvalidPattern(_))));
    }

    #[test]
    fn cache_evicts_oldest_entry_past_capacity() {
        let factory = EscRegexFactory::new(2);
        let a = factory.create("a", "").unwrap();
        factory.create("b", "").unwrap();
        factory.create("c", "").unwrap();
        assert_eq!(factory.len(), 2);
        assert!(factory.get(a).is_none(), "oldest entry should have been evicted");
    }

    #[test]
    fn empty_pattern_compiles_as_no_op_group() {
        let factory = EscRegexFactory::default();
        let handle = factory.compile("", "").unwrap();
        let regex = factory.get(handle).unwrap();
        assert!(regex.is_match(""));
    }
}
