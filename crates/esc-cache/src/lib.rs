//! The code cache: a directory-backed `esc_abi::CodeCache`
//! keyed by source digest + function key, with the size-threshold and
//! non-serializable-constant rejection rules the bare trait can't
//! express on its own.

pub mod cache;
pub mod key;

pub use cache::{is_writable_target, CachedConstant, DirectoryCodeCache, DEFAULT_MIN_SOURCE_SIZE};
pub use key::{cache_key, digest_source, function_key};
