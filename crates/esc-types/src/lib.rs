//! The `Type` lattice: a width-ordered set of types with
//! widening/narrowing, bytecode-stack-category semantics, and the
//! primitive <-> object conversion policy the codegen boundary needs.

mod conversion;
mod lattice;
mod pp_map;

pub use conversion::convert;
pub use esc_abi::StackType;
pub use lattice::{Type, TypeClass};
pub use pp_map::{read_pp_types, write_pp_types};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widest_is_commutative_and_associative() {
        let types = [Type::BOOLEAN, Type::INT, Type::LONG, Type::NUMBER, Type::OBJECT, Type::UNKNOWN];
        for &a in &types {
            for &b in &types {
                assert_eq!(Type::widest(a, b), Type::widest(b, a), "widest not commutative for {a:?}, {b:?}");
            }
        }
        for &a in &types {
            for &b in &types {
                for &c in &types {
                    assert_eq!(
                        Type::widest(a, Type::widest(b, c)),
                        Type::widest(Type::widest(a, b), c),
                        "widest not associative for {a:?}, {b:?}, {c:?}"
                    );
                }
            }
        }
    }

    #[test]
    fn widest_weight_is_at_least_the_max_of_operands() {
        let types = [Type::BOOLEAN, Type::INT, Type::LONG, Type::NUMBER, Type::OBJECT];
        for &a in &types {
            for &b in &types {
                let w = Type::widest(a, b);
                assert!(w.weight() >= a.weight().max(b.weight()));
            }
        }
    }

    #[test]
    fn widening_across_numeric_array_and_boolean_boundaries() {
        assert_eq!(Type::widest(Type::INT, Type::LONG), Type::LONG);
        assert_eq!(Type::widest(Type::NUMBER, Type::OBJECT), Type::OBJECT);
        assert_eq!(Type::widest(Type::INT_ARRAY, Type::NUMBER_ARRAY), Type::OBJECT);
        assert_eq!(Type::widest(Type::BOOLEAN, Type::NUMBER), Type::NUMBER);
        assert_eq!(Type::widest_return_type(Type::BOOLEAN, Type::NUMBER), Type::OBJECT);
    }

    #[test]
    fn type_singletons_are_interned() {
        assert_eq!(Type::INT, Type::INT);
        assert!(std::ptr::eq(Type::INT.name(), Type::INT.name()));
    }
}
