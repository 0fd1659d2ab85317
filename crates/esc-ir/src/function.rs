//! `Function`: source, identifier, parameters, body block, kind,
//! flags, compile unit, root class, return type, cache state.

use crate::block::BlockRef;
use crate::flags::{CompileUnitId, FunctionFlags, FunctionKind};
use crate::node_id::NodeMeta;
use crate::symbol::SymbolId;
use esc_common::Atom;
use esc_types::Type;
use std::rc::Rc;

#[derive(Clone, Debug, PartialEq)]
pub struct Parameter {
    pub name: Atom,
    pub symbol: Option<SymbolId>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Function {
    pub meta: NodeMeta,
    /// `None` for an anonymous function expression.
    pub name: Option<Atom>,
    pub parameters: Vec<Parameter>,
    pub body: BlockRef,
    pub kind: FunctionKind,
    pub flags: FunctionFlags,
    /// The target code object is created once per function split; the
    /// function holds it weakly via an ID, not ownership.
    pub compile_unit: Option<CompileUnitId>,
    pub return_type: Option<Type>,
    pub self_symbol: Option<SymbolId>,
}

impl Function {
    pub fn name_or_anonymous(&self) -> &'static str {
        if self.name.is_some() { "<named>" } else { "<anonymous>" }
    }

    /// `needsArguments`: `(uses_arguments OR has_eval) AND NOT
    /// defines_arguments AND NOT is_program`.
    pub fn needs_arguments(&self) -> bool {
        let f = self.flags;
        (f.contains(FunctionFlags::USES_ARGUMENTS) || f.contains(FunctionFlags::HAS_EVAL))
            && !f.contains(FunctionFlags::DEFINES_ARGUMENTS)
            && !f.contains(FunctionFlags::IS_PROGRAM)
    }

    /// `needsParentScope`: `uses_ancestor_scope OR has_deep_eval
    /// OR is_program`.
    pub fn needs_parent_scope(&self) -> bool {
        let f = self.flags;
        f.contains(FunctionFlags::USES_ANCESTOR_SCOPE)
            || f.contains(FunctionFlags::HAS_NESTED_EVAL)
            || f.contains(FunctionFlags::IS_PROGRAM)
    }

    /// `needsCallee`: `needsParentScope OR usesSelfSymbol OR isSplit`.
    pub fn needs_callee(&self) -> bool {
        self.needs_parent_scope() || self.flags.contains(FunctionFlags::USES_SELF_SYMBOL) || self.flags.contains(FunctionFlags::IS_SPLIT)
    }

    /// `isVarArg`: `needsArguments OR parameters.size > hostArgLimit`.
    pub fn is_var_arg(&self, host_arg_limit: usize) -> bool {
        self.needs_arguments() || self.parameters.len() > host_arg_limit
    }
}
