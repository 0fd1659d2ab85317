//! Dense flag words for `Block` and `Function` nodes, plus the
//! `FunctionKind` enum.

use bitflags::bitflags;

bitflags! {
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct BlockFlags: u32 {
        const NEEDS_SCOPE        = 1 << 0;
        const IS_TERMINAL        = 1 << 1;
        const IS_GLOBAL_SCOPE    = 1 << 2;
        const IS_SYNTHETIC       = 1 << 3;
        const IS_BODY            = 1 << 4;
        const IS_PARAMETER_BLOCK = 1 << 5;
        const IS_SWITCH_BLOCK    = 1 << 6;
        const IS_BREAKABLE       = 1 << 7;
    }
}

bitflags! {
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct FunctionFlags: u32 {
        const IS_PROGRAM               = 1 << 0;
        const IS_DECLARED              = 1 << 1;
        const USES_ARGUMENTS           = 1 << 2;
        const DEFINES_ARGUMENTS        = 1 << 3;
        const USES_SELF_SYMBOL         = 1 << 4;
        const USES_THIS                = 1 << 5;
        const HAS_EVAL                 = 1 << 6;
        const HAS_NESTED_EVAL          = 1 << 7;
        const USES_ANCESTOR_SCOPE      = 1 << 8;
        const IS_SPLIT                 = 1 << 9;
        const IS_DEOPTIMIZABLE         = 1 << 10;
        const IS_CACHED                = 1 << 11;
        const HAS_APPLY_TO_CALL_SPEC   = 1 << 12;
        const IS_ES6_METHOD            = 1 << 13;
        const IS_CLASS_CONSTRUCTOR     = 1 << 14;
        const IS_SUBCLASS_CONSTRUCTOR  = 1 << 15;
        const USES_NEW_TARGET          = 1 << 16;
        const HAS_EXPRESSION_BODY      = 1 << 17;
        const HAS_SCOPE_BLOCK          = 1 << 18;
        const HAS_FUNCTION_DECLARATIONS = 1 << 19;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FunctionKind {
    Normal,
    Script,
    Getter,
    Setter,
    Arrow,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CompileUnitId(pub u32);
