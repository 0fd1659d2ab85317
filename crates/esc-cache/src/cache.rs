//! `DirectoryCodeCache`: the directory-backed `CodeCache`
//! implementation, plus the eligibility rules (minimum source size,
//! non-serializable constants) the trait's narrow `store`/`load`
//! signature doesn't itself carry enough context to enforce.

use esc_abi::{CacheKey, CodeCache, CodeCacheError, ConstantValue};
use std::path::{Path, PathBuf};

pub const DEFAULT_MIN_SOURCE_SIZE: usize = 1000;
const CACHE_FORMAT_VERSION: u32 = 1;

/// A constant-pool entry as the cache sees it: either a plain
/// serializable value (`esc-abi::ConstantValue`'s closed set), or a
/// live host object reference that cannot survive a cache round trip.
/// `ConstantValue` itself has no non-serializable variant —
/// every one of its cases is a primitive — so a wider enum is needed
/// here to model the rejection rule at all.
#[derive(Clone, Debug, PartialEq)]
pub enum CachedConstant {
    Value(ConstantValue),
    HostObject,
}

/// A directory tree, one subdirectory per cache format version, each
/// holding one file per `CacheKey::file_name()`.
pub struct DirectoryCodeCache {
    root: PathBuf,
    read_only: bool,
    min_source_size: usize,
}

impl DirectoryCodeCache {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        DirectoryCodeCache { root: root.into(), read_only: false, min_source_size: DEFAULT_MIN_SOURCE_SIZE }
    }

    pub fn read_only(root: impl Into<PathBuf>) -> Self {
        DirectoryCodeCache { root: root.into(), read_only: true, min_source_size: DEFAULT_MIN_SOURCE_SIZE }
    }

    pub fn with_min_source_size(mut self, min_source_size: usize) -> Self {
        self.min_source_size = min_source_size;
        self
    }

    fn versioned_dir(&self) -> PathBuf {
        self.root.join(format!("v{CACHE_FORMAT_VERSION}"))
    }

    fn path_for(&self, key: &CacheKey) -> PathBuf {
        self.versioned_dir().join(key.file_name())
    }

    pub fn meets_threshold(&self, source_len: usize) -> bool {
        source_len >= self.min_source_size
    }

    /// Checks the store's rejection rules without touching the
    /// filesystem: a source below the size threshold, or any
    /// non-serializable constant, is logged and rejected.
    pub fn check_eligibility(&self, source_len: usize, constants: &[CachedConstant]) -> Result<(), CodeCacheError> {
        if !self.meets_threshold(source_len) {
            return Err(CodeCacheError::BelowThreshold(source_len, self.min_source_size));
        }
        if let Some(index) = constants.iter().position(|c| matches!(c, CachedConstant::HostObject)) {
            tracing::warn!(index, "dropping script from code cache: non-serializable constant");
            return Err(CodeCacheError::NonSerializableConstant(index));
        }
        Ok(())
    }

    /// Eligibility-checked store: the entry point a compile pipeline
    /// should call instead of the bare `CodeCache::store`.
    pub fn store_script(
        &self,
        key: &CacheKey,
        source_len: usize,
        constants: &[CachedConstant],
        blob: &[u8],
    ) -> Result<(), CodeCacheError> {
        self.check_eligibility(source_len, constants)?;
        self.store(key, blob)
    }
}

impl CodeCache for DirectoryCodeCache {
    fn store(&self, key: &CacheKey, blob: &[u8]) -> Result<(), CodeCacheError> {
        if self.read_only {
            return Err(CodeCacheError::ReadOnly);
        }
        let dir = self.versioned_dir();
        std::fs::create_dir_all(&dir).map_err(|e| CodeCacheError::Io(e.to_string()))?;
        std::fs::write(self.path_for(key), blob).map_err(|e| CodeCacheError::Io(e.to_string()))
    }

    fn load(&self, key: &CacheKey) -> Result<Option<Vec<u8>>, CodeCacheError> {
        match std::fs::read(self.path_for(key)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(CodeCacheError::Io(e.to_string())),
        }
    }
}

/// Whether `path` is a writable target for a non-read-only cache.
/// Existing directories are checked via their permissions; a missing
/// directory is assumed writable iff its parent is (the cache creates
/// it lazily on first store).
pub fn is_writable_target(path: &Path) -> bool {
    match std::fs::metadata(path) {
        Ok(meta) => !meta.permissions().readonly(),
        Err(_) => path.parent().is_none_or(is_writable_target),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::cache_key;
    use esc_types::Type;

    #[test]
    fn store_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let cache = DirectoryCodeCache::new(dir.path());
        let key = cache_key("x".repeat(1000).as_str(), "f0", &[Type::INT]);
        cache.store(&key, b"blob").unwrap();
        assert_eq!(cache.load(&key).unwrap(), Some(b"blob".to_vec()));
    }

    #[test]
    fn load_of_missing_key_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let cache = DirectoryCodeCache::new(dir.path());
        let key = cache_key("anything", "f0", &[]);
        assert_eq!(cache.load(&key).unwrap(), None);
    }

    #[test]
    fn read_only_cache_rejects_store() {
        let dir = tempfile::tempdir().unwrap();
        let cache = DirectoryCodeCache::read_only(dir.path());
        let key = cache_key("anything", "f0", &[]);
        assert_eq!(cache.store(&key, b"x"), Err(CodeCacheError::ReadOnly));
    }

    #[test]
    fn below_threshold_source_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let cache = DirectoryCodeCache::new(dir.path());
        assert_eq!(cache.check_eligibility(10, &[]), Err(CodeCacheError::BelowThreshold(10, DEFAULT_MIN_SOURCE_SIZE)));
    }

    #[test]
    fn non_serializable_constant_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let cache = DirectoryCodeCache::new(dir.path());
        let constants = vec![CachedConstant::Value(ConstantValue::Int(1)), CachedConstant::HostObject];
        assert_eq!(
            cache.check_eligibility(DEFAULT_MIN_SOURCE_SIZE, &constants),
            Err(CodeCacheError::NonSerializableConstant(1))
        );
    }
}
