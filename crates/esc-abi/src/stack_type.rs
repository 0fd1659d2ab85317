//! The bytecode-stack-category enum shared between the `Type` lattice
//! (`esc-types`) and the `BytecodeOps` instruction sink below. Kept
//! here, beneath both, so neither needs to depend on the other to
//! agree on vocabulary.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StackType {
    /// Object reference.
    A,
    /// 32-bit int.
    I,
    /// 64-bit long (category-2).
    J,
    /// 64-bit double (category-2).
    D,
    /// Boolean — signature-only, never an actual JVM-style stack slot
    /// kind in the target format, but needed to describe operand types.
    Z,
    /// Uninitialized slot.
    U,
}

impl StackType {
    /// Number of stack slots this category occupies: 1 or 2 —
    /// category-2 types are long and number/double.
    pub const fn slot_count(self) -> u8 {
        match self {
            StackType::J | StackType::D => 2,
            _ => 1,
        }
    }
}
