//! The `Type` value family and the width-ordered lattice
//! operations over it.
//!
//! This core's type set is closed — there are no class-parameterized
//! object/array subtypes to intern at runtime — so interning collapses
//! to a fixed set of `'static` descriptors: indexing is free and
//! identity is `'static` pointer equality, with no runtime map or lock
//! needed.

use esc_abi::StackType;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TypeClass {
    Unknown,
    Boolean,
    Int,
    Long,
    Number,
    Object,
    String,
    CharSequence,
    ScriptObject,
    Undefined,
    This,
    Scope,
    Slot2,
    IntArray,
    LongArray,
    NumberArray,
    ObjectArray,
}

struct TypeDescriptor {
    class: TypeClass,
    name: &'static str,
    debug: &'static str,
    /// `-1` for `UNKNOWN`; object-family types are capped at
    /// `OBJECT_WEIGHT_CEILING` so no amount of further subtyping can
    /// overflow the comparison used by `widest`/`narrowest`.
    weight: i32,
    slots: u8,
    stack_type: Option<StackType>,
    is_array: bool,
}

const OBJECT_WEIGHT: i32 = 100;
const OBJECT_WEIGHT_CEILING: i32 = 110;

macro_rules! desc {
    ($ident:ident, $class:ident, $name:literal, $debug:literal, $weight:expr, $slots:expr, $stack:expr, $array:expr) => {
        static $ident: TypeDescriptor = TypeDescriptor {
            class: TypeClass::$class,
            name: $name,
            debug: $debug,
            weight: $weight,
            slots: $slots,
            stack_type: $stack,
            is_array: $array,
        };
    };
}

desc!(UNKNOWN_DESC, Unknown, "unknown", "unknown", -1, 0, None, false);
desc!(BOOLEAN_DESC, Boolean, "boolean", "boolean", 10, 1, Some(StackType::Z), false);
desc!(INT_DESC, Int, "int", "int", 20, 1, Some(StackType::I), false);
desc!(LONG_DESC, Long, "long", "long", 30, 2, Some(StackType::J), false);
desc!(NUMBER_DESC, Number, "number", "double", 40, 2, Some(StackType::D), false);
desc!(OBJECT_DESC, Object, "object", "Object", OBJECT_WEIGHT, 1, Some(StackType::A), false);
desc!(STRING_DESC, String, "string", "String", OBJECT_WEIGHT_CEILING, 1, Some(StackType::A), false);
desc!(CHARSEQUENCE_DESC, CharSequence, "charsequence", "CharSequence", OBJECT_WEIGHT_CEILING, 1, Some(StackType::A), false);
desc!(SCRIPT_OBJECT_DESC, ScriptObject, "scriptobject", "ScriptObject", OBJECT_WEIGHT_CEILING, 1, Some(StackType::A), false);
desc!(UNDEFINED_DESC, Undefined, "undefined", "Undefined", OBJECT_WEIGHT_CEILING, 1, Some(StackType::A), false);
desc!(THIS_DESC, This, "this", "Object", OBJECT_WEIGHT_CEILING, 1, Some(StackType::A), false);
desc!(SCOPE_DESC, Scope, "scope", "ScriptObject", OBJECT_WEIGHT_CEILING, 1, Some(StackType::A), false);
desc!(SLOT_2_DESC, Slot2, "slot2", "slot2", i32::MIN, 0, None, false);
desc!(INT_ARRAY_DESC, IntArray, "int[]", "int[]", OBJECT_WEIGHT_CEILING, 1, Some(StackType::A), true);
desc!(LONG_ARRAY_DESC, LongArray, "long[]", "long[]", OBJECT_WEIGHT_CEILING, 1, Some(StackType::A), true);
desc!(NUMBER_ARRAY_DESC, NumberArray, "number[]", "double[]", OBJECT_WEIGHT_CEILING, 1, Some(StackType::A), true);
desc!(OBJECT_ARRAY_DESC, ObjectArray, "object[]", "Object[]", OBJECT_WEIGHT_CEILING, 1, Some(StackType::A), true);

/// A value drawn from the type lattice. `Copy`, interned, and
/// compared by pointer identity to the fixed `'static` descriptor
/// table above.
#[derive(Clone, Copy)]
pub struct Type(&'static TypeDescriptor);

impl PartialEq for Type {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.0, other.0)
    }
}
impl Eq for Type {}

impl std::hash::Hash for Type {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        (self.0 as *const TypeDescriptor as usize).hash(state);
    }
}

impl std::fmt::Debug for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.debug)
    }
}

impl std::fmt::Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.name)
    }
}

impl Type {
    pub const UNKNOWN: Type = Type(&UNKNOWN_DESC);
    pub const BOOLEAN: Type = Type(&BOOLEAN_DESC);
    pub const INT: Type = Type(&INT_DESC);
    pub const LONG: Type = Type(&LONG_DESC);
    pub const NUMBER: Type = Type(&NUMBER_DESC);
    pub const OBJECT: Type = Type(&OBJECT_DESC);
    pub const STRING: Type = Type(&STRING_DESC);
    pub const CHARSEQUENCE: Type = Type(&CHARSEQUENCE_DESC);
    pub const SCRIPT_OBJECT: Type = Type(&SCRIPT_OBJECT_DESC);
    pub const UNDEFINED: Type = Type(&UNDEFINED_DESC);
    pub const THIS: Type = Type(&THIS_DESC);
    pub const SCOPE: Type = Type(&SCOPE_DESC);
    pub const SLOT_2: Type = Type(&SLOT_2_DESC);
    pub const INT_ARRAY: Type = Type(&INT_ARRAY_DESC);
    pub const LONG_ARRAY: Type = Type(&LONG_ARRAY_DESC);
    pub const NUMBER_ARRAY: Type = Type(&NUMBER_ARRAY_DESC);
    pub const OBJECT_ARRAY: Type = Type(&OBJECT_ARRAY_DESC);

    pub fn class(self) -> TypeClass {
        self.0.class
    }

    pub fn name(self) -> &'static str {
        self.0.name
    }

    pub fn debug_name(self) -> &'static str {
        self.0.debug
    }

    pub fn weight(self) -> i32 {
        self.0.weight
    }

    /// Slot count: 1 for every type except the category-2 numerics
    /// (long, number/double), which occupy 2.
    pub fn slot_count(self) -> u8 {
        self.0.slots
    }

    pub fn get_bytecode_stack_type(self) -> Option<StackType> {
        self.0.stack_type
    }

    pub fn is_array(self) -> bool {
        self.0.is_array
    }

    pub fn is_object(self) -> bool {
        self.0.weight >= OBJECT_WEIGHT
    }

    pub fn is_numeric(self) -> bool {
        matches!(self.class(), TypeClass::Int | TypeClass::Long | TypeClass::Number)
    }

    pub fn is_boolean(self) -> bool {
        self.class() == TypeClass::Boolean
    }

    /// `isEquivalentTo`: same weight, or both object-family.
    pub fn is_equivalent_to(self, other: Type) -> bool {
        self.weight() == other.weight() || (self.is_object() && other.is_object())
    }

    /// `isAssignableFrom`: both object ⇒ `weight(a) >= weight(b)`;
    /// else exact weight equality.
    pub fn is_assignable_from(self, other: Type) -> bool {
        if self.is_object() && other.is_object() {
            self.weight() >= other.weight()
        } else {
            self.weight() == other.weight()
        }
    }

    /// The widest of two types. Commutative and
    /// associative; `widest(T,T) = T`.
    pub fn widest(a: Type, b: Type) -> Type {
        if a == b {
            return a;
        }
        if a == Type::UNKNOWN {
            return b;
        }
        if b == Type::UNKNOWN {
            return a;
        }
        if a.is_array() || b.is_array() {
            // Same-array-type equality already returned above; any
            // other array combination (array+array of different
            // element, or array+non-array) widens to OBJECT.
            return Type::OBJECT;
        }
        if a.is_object() && b.is_object() {
            // Distinct object "classes" widen to OBJECT.
            return Type::OBJECT;
        }
        if a.is_object() || b.is_object() {
            return Type::OBJECT;
        }
        if a.weight() >= b.weight() { a } else { b }
    }

    /// `widest` clipped to never exceed `limit`'s weight.
    pub fn widest_clipped(a: Type, b: Type, limit: Type) -> Type {
        let w = Type::widest(a, b);
        if w.weight() > limit.weight() { limit } else { w }
    }

    /// The narrower of two types: the lower-weight one. Ties resolve
    /// to `a`.
    pub fn narrowest(a: Type, b: Type) -> Type {
        if a.weight() <= b.weight() { a } else { b }
    }

    pub fn narrowest_clipped(a: Type, b: Type, limit: Type) -> Type {
        let n = Type::narrowest(a, b);
        if n.weight() < limit.weight() { limit } else { n }
    }

    /// `widestReturnType`: boolean->number
    /// widening is legitimate in operand position but poisons return
    /// merging, so a boolean mixed with anything else, or a numeric
    /// mixed with a non-numeric, widens all the way to `OBJECT`.
    pub fn widest_return_type(a: Type, b: Type) -> Type {
        let one_boolean = a.is_boolean() != b.is_boolean();
        let one_numeric_other_not = a.is_numeric() != b.is_numeric();
        if one_boolean || one_numeric_other_not {
            Type::OBJECT
        } else {
            Type::widest(a, b)
        }
    }
}
