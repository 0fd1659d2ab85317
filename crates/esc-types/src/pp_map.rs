//! Serialization of a `{program point -> Type}` map: one byte per entry, `L`=object, `D`=number,
//! `J`=long. Any other symbol is skipped on read for forward
//! compatibility; `UNKNOWN` is never serialized since a program point
//! with no recorded optimistic type carries no entry at all.

use crate::lattice::Type;
use std::collections::BTreeMap;

fn type_to_byte(ty: Type) -> Option<u8> {
    match ty {
        Type::OBJECT => Some(b'L'),
        Type::NUMBER => Some(b'D'),
        Type::LONG => Some(b'J'),
        _ => None,
    }
}

fn byte_to_type(b: u8) -> Option<Type> {
    match b {
        b'L' => Some(Type::OBJECT),
        b'D' => Some(Type::NUMBER),
        b'J' => Some(Type::LONG),
        _ => None,
    }
}

/// Serializes a pp -> Type map. Each entry is `[pp: u32 LE][tag: u8]`;
/// entries whose type has no tag (e.g. `INT`, `BOOLEAN`, `UNKNOWN`) are
/// silently dropped — unknown types are never serialized, reduced here
/// to "only L/D/J are serialized" since those are the only types for
/// which recompilation widening actually needs to persist a decision
/// across a cache load.
pub fn write_pp_types(map: &BTreeMap<u32, Type>) -> Vec<u8> {
    let mut out = Vec::with_capacity(map.len() * 5);
    for (&pp, &ty) in map {
        if let Some(tag) = type_to_byte(ty) {
            out.extend_from_slice(&pp.to_le_bytes());
            out.push(tag);
        }
    }
    out
}

/// Reads a pp -> Type map written by [`write_pp_types`]. A malformed
/// trailing partial record is truncated rather than erroring.
pub fn read_pp_types(bytes: &[u8]) -> BTreeMap<u32, Type> {
    let mut out = BTreeMap::new();
    let mut i = 0;
    while i + 5 <= bytes.len() {
        let pp = u32::from_le_bytes([bytes[i], bytes[i + 1], bytes[i + 2], bytes[i + 3]]);
        let tag = bytes[i + 4];
        if let Some(ty) = byte_to_type(tag) {
            out.insert(pp, ty);
        }
        i += 5;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_object_number_long_entries() {
        let mut map = BTreeMap::new();
        map.insert(1, Type::OBJECT);
        map.insert(2, Type::NUMBER);
        map.insert(3, Type::LONG);
        let bytes = write_pp_types(&map);
        assert_eq!(read_pp_types(&bytes), map);
    }

    #[test]
    fn drops_unserializable_entries() {
        let mut map = BTreeMap::new();
        map.insert(1, Type::INT);
        map.insert(2, Type::UNKNOWN);
        let bytes = write_pp_types(&map);
        assert!(read_pp_types(&bytes).is_empty());
    }
}
