//! Centralized limits and thresholds: a single place to tune recursion
//! depths and capacity pre-allocations instead of scattering magic
//! numbers.

/// Maximum lexical-context stack depth before a pass bails out rather
/// than risk a native stack overflow on pathological input (e.g. a
/// generated file with thousands of nested parentheses).
pub const MAX_LEXICAL_CONTEXT_DEPTH: usize = 4_000;

/// Default source-length threshold (in UTF-8 bytes) below which the
/// code cache refuses to store a compiled script.
pub const DEFAULT_CACHE_MIN_SOURCE_LEN: usize = 1000;

/// Initial capacity for a function's symbol table, chosen to avoid a
/// reallocation for the common case of a handful of locals.
pub const SYMBOL_TABLE_INITIAL_CAPACITY: usize = 8;

/// Bound on the number of compiled `RegExp` patterns kept alive in the
/// regex adapter's weak cache.
pub const REGEX_CACHE_CAPACITY: usize = 256;
