//! `CodeCache` — the persistent code cache treated as an external
//! collaborator: a key -> serialized-script blob store
//! keyed by a source digest, with a size threshold.

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub digest: [u8; 32],
    pub function_key: String,
}

impl CacheKey {
    pub fn new(digest: [u8; 32], function_key: impl Into<String>) -> Self {
        CacheKey { digest, function_key: function_key.into() }
    }

    /// `<digest-hex>-<functionKey>`, the store's key layout.
    pub fn file_name(&self) -> String {
        let mut hex = String::with_capacity(64);
        for byte in self.digest {
            hex.push_str(&format!("{byte:02x}"));
        }
        format!("{hex}-{}", self.function_key)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CodeCacheError {
    #[error("code cache is not writable")]
    ReadOnly,
    #[error("source below cache threshold ({0} < {1} bytes)")]
    BelowThreshold(usize, usize),
    #[error("value at constant pool index {0} cannot be serialized")]
    NonSerializableConstant(usize),
    #[error("i/o error: {0}")]
    Io(String),
}

pub trait CodeCache {
    fn store(&self, key: &CacheKey, blob: &[u8]) -> Result<(), CodeCacheError>;
    fn load(&self, key: &CacheKey) -> Result<Option<Vec<u8>>, CodeCacheError>;
}
