//! Cache key construction: `<source digest>-<function key>`,
//! where the function key is `functionId` plus a dash-prefixed
//! parameter-type shorthand.

use esc_abi::{CacheKey, StackType};
use esc_types::Type;

/// `blake3` digest of a script's source text — the digest half of the
/// cache key.
pub fn digest_source(source: &str) -> [u8; 32] {
    *blake3::hash(source.as_bytes()).as_bytes()
}

fn shorthand_char(ty: Type) -> char {
    match ty.get_bytecode_stack_type() {
        Some(StackType::A) => 'L',
        Some(StackType::I) => 'I',
        Some(StackType::J) => 'J',
        Some(StackType::D) => 'D',
        Some(StackType::Z) => 'Z',
        Some(StackType::U) | None => 'U',
    }
}

/// `functionId` plus a dash-prefixed parameter-type shorthand, e.g.
/// `"f3-ILD"` for a function taking `(int, long, double)`.
pub fn function_key(function_id: &str, param_types: &[Type]) -> String {
    let shorthand: String = param_types.iter().copied().map(shorthand_char).collect();
    format!("{function_id}-{shorthand}")
}

pub fn cache_key(source: &str, function_id: &str, param_types: &[Type]) -> CacheKey {
    CacheKey::new(digest_source(source), function_key(function_id, param_types))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn function_key_shorthand_matches_param_types() {
        assert_eq!(function_key("f3", &[Type::INT, Type::LONG, Type::NUMBER]), "f3-ILD");
    }

    #[test]
    fn digest_is_stable_for_same_source() {
        assert_eq!(digest_source("1+1"), digest_source("1+1"));
        assert_ne!(digest_source("1+1"), digest_source("1+2"));
    }

    #[test]
    fn cache_key_file_name_embeds_digest_and_function_key() {
        let key = cache_key("var x = 1;", "f0", &[Type::OBJECT]);
        assert!(key.file_name().ends_with("-f0-L"));
    }
}
