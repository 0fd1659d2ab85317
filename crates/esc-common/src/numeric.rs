//! Numeric conversion helpers used by test doubles for the `JsType`
//! collaborator. The real `JsType::toInt32`/`toUint32`/... are an
//! external runtime dependency; these free
//! functions exist so in-crate tests can exercise the `Type` lattice
//! and optimistic machinery without linking a full runtime.

/// The distinguished NaN bit pattern used to represent `undefined`
/// when a category-2 numeric slot must hold it.
pub const UNDEFINED_DOUBLE_BITS: u64 = 0x7ff8_0000_0000_0001;

#[inline]
pub fn undefined_double() -> f64 {
    f64::from_bits(UNDEFINED_DOUBLE_BITS)
}

#[inline]
pub fn is_undefined_double(v: f64) -> bool {
    v.to_bits() == UNDEFINED_DOUBLE_BITS
}

/// ECMA-262 ToInt32, ignoring the BigInt extension.
#[inline]
pub fn to_int32(v: f64) -> i32 {
    if !v.is_finite() || v == 0.0 {
        return 0;
    }
    let posint = v.trunc();
    let int32bit = posint.rem_euclid(4294967296.0);
    if int32bit >= 2147483648.0 {
        (int32bit - 4294967296.0) as i32
    } else {
        int32bit as i32
    }
}

/// ECMA-262 ToUint32.
#[inline]
pub fn to_uint32(v: f64) -> u32 {
    if !v.is_finite() || v == 0.0 {
        return 0;
    }
    let posint = v.trunc();
    posint.rem_euclid(4294967296.0) as u32
}

/// ECMA-262 ToBoolean for the numeric/string primitives
/// relevant to the `Type` lattice's conversion policy.
#[inline]
pub fn number_to_boolean(v: f64) -> bool {
    !(v == 0.0 || v.is_nan())
}

#[inline]
pub fn string_to_boolean(s: &str) -> bool {
    !s.is_empty()
}
