//! The symbol & scope pass: seeds every block's symbol table,
//! resolves `Ident` nodes to the `Symbol` they denote, and propagates
//! the function flags that depend on lexical structure —
//! `USES_THIS`/`USES_ARGUMENTS`/`HAS_EVAL`/`HAS_NESTED_EVAL`/
//! `USES_ANCESTOR_SCOPE`/`USES_SELF_SYMBOL`/`HAS_FUNCTION_DECLARATIONS`.
//!
//! Grounded on `tsz-binder`'s scope-stack walker: a single forward pass
//! that binds declarations on the way in and resolves references on
//! the way out, accumulating flags onto the enclosing function frame
//! rather than threading them through return values.

use crate::error::ScopeError;
use crate::hoist;
use esc_common::Atom;
use esc_ir::{
    Block, BlockFlags, BlockRef, CatchClause, CatchParameter, Expr, ExprRef, Function, FunctionFlags, IdentExpr,
    LcNode, LexicalContext, Stmt, StmtRef, Symbol, SymbolFlags, SymbolIdAllocator, SymbolTable, VarKind,
    VarStatement, Visitor, walk_function,
};
use std::rc::Rc;
use tracing::{Level, span};

/// The handful of identifier names the resolver must recognize by
/// spelling rather than by binding — interned once per compile and
/// handed to [`Resolver::new`].
#[derive(Clone, Copy, Debug)]
pub struct WellKnownNames {
    pub this_keyword: Atom,
    pub arguments: Atom,
    pub eval: Atom,
}

pub struct Resolver {
    names: WellKnownNames,
    next_symbol: SymbolIdAllocator,
    pub errors: Vec<ScopeError>,
}

impl Resolver {
    pub fn new(names: WellKnownNames) -> Self {
        Resolver { names, next_symbol: SymbolIdAllocator::new(), errors: Vec::new() }
    }

    pub fn resolve(&mut self, func: Rc<Function>) -> Rc<Function> {
        let _span = span!(Level::DEBUG, "resolve_scope", function = func.meta.id.0).entered();
        let mut lc = LexicalContext::new();
        walk_function(self, &mut lc, func)
    }

    fn declare(&mut self, symbols: &mut SymbolTable, name: Atom, flags: SymbolFlags) -> bool {
        if symbols.contains(name) {
            return false;
        }
        symbols.insert(Symbol::new(self.next_symbol.next(), name, flags));
        true
    }

    /// Walks the scope chain outward from the current block looking for
    /// `name`, returning the symbol it binds to plus whether the search
    /// crossed at least one function boundary to find it.
    fn lookup(lc: &LexicalContext, name: Atom) -> Option<(Symbol, bool)> {
        let mut crossed_function = false;
        for node in lc.ancestors_inner_to_outer() {
            match node {
                LcNode::Block(block) => {
                    if let Some(sym) = block.symbols.get(name) {
                        return Some((sym.clone(), crossed_function));
                    }
                }
                LcNode::Function(_) => crossed_function = true,
                LcNode::Stmt(_) => {}
            }
        }
        None
    }

    fn mark_function(lc: &mut LexicalContext, bits: FunctionFlags) {
        if let Some(func) = lc.current_function() {
            lc.set_flag(&LcNode::Function(func), bits.bits());
        }
    }
}

impl Visitor for Resolver {
    /// Populates `block`'s symbol table before it is pushed: function
    /// parameters, hoisted `var` names, and the self-symbol for a named
    /// function *expression* when `block` is that function's own body,
    /// plus every block's own `let`/`const` declarations.
    fn seed_block(&mut self, lc: &mut LexicalContext, block: BlockRef) -> BlockRef {
        let mut symbols = block.symbols.clone();
        let mut changed = false;

        if block.flags.contains(BlockFlags::IS_BODY) {
            if let Some(func) = lc.current_function() {
                if Rc::ptr_eq(&func.body, &block) {
                    for p in &func.parameters {
                        changed |= self.declare(&mut symbols, p.name, SymbolFlags::IS_PARAM);
                    }
                    let mut var_names = Vec::new();
                    hoist::scan_var_names(&block, &mut var_names);
                    for name in var_names {
                        changed |= self.declare(&mut symbols, name, SymbolFlags::IS_VAR);
                    }
                    if let Some(name) = func.name {
                        if !func.flags.contains(FunctionFlags::IS_DECLARED) {
                            changed |= self.declare(&mut symbols, name, SymbolFlags::IS_SELF);
                        }
                    }
                }
            }
        }

        for stmt in &block.statements {
            match &**stmt {
                Stmt::Var(v) if v.kind != VarKind::Var => {
                    if symbols.contains(v.name) {
                        self.errors.push(ScopeError::DuplicateBinding(v.name));
                    } else {
                        let flag = if v.kind == VarKind::Let { SymbolFlags::IS_LET } else { SymbolFlags::IS_CONST };
                        changed |= self.declare(&mut symbols, v.name, flag);
                    }
                }
                Stmt::Expression(es) => {
                    if let Expr::Function(f) = &*es.expression {
                        if f.flags.contains(FunctionFlags::IS_DECLARED) {
                            Self::mark_function(lc, FunctionFlags::HAS_FUNCTION_DECLARATIONS);
                        }
                    }
                }
                _ => {}
            }
        }

        if !changed {
            return block;
        }

        let needs_scope = symbols.iter().any(Symbol::is_block_scoped);
        if needs_scope {
            Self::mark_function(lc, FunctionFlags::HAS_SCOPE_BLOCK);
        }
        let flags = if needs_scope { block.flags | BlockFlags::NEEDS_SCOPE } else { block.flags };
        Rc::new(Block { symbols, flags, ..(*block).clone() })
    }

    /// Injects the exception binding into the catch body's symbol table
    /// before it is walked — a catch clause always introduces its own
    /// scope in ES5.1, whether or not the bound name is read.
    fn seed_catch(&mut self, lc: &mut LexicalContext, catch: CatchClause) -> CatchClause {
        let names: Vec<Atom> = match &catch.parameter {
            CatchParameter::Ident(name) => vec![*name],
            CatchParameter::ArrayPattern(names) | CatchParameter::ObjectPattern(names) => names.clone(),
        };
        let mut symbols = catch.body.symbols.clone();
        for name in names {
            self.declare(&mut symbols, name, SymbolFlags::IS_PARAM);
        }
        Self::mark_function(lc, FunctionFlags::HAS_SCOPE_BLOCK);
        let body = Rc::new(Block { symbols, flags: catch.body.flags | BlockFlags::NEEDS_SCOPE, ..(*catch.body).clone() });
        CatchClause { body, ..catch }
    }

    fn leave_stmt(&mut self, lc: &mut LexicalContext, stmt: StmtRef) -> StmtRef {
        if let Stmt::Var(v) = &*stmt {
            if v.symbol.is_none() {
                if let Some((symbol, _)) = Self::lookup(lc, v.name) {
                    return Rc::new(Stmt::Var(VarStatement { symbol: Some(symbol.id), ..v.clone() }));
                }
            }
        }
        stmt
    }

    fn leave_expr(&mut self, lc: &mut LexicalContext, expr: ExprRef) -> ExprRef {
        match &*expr {
            Expr::Ident(ident) => {
                if ident.name == self.names.this_keyword {
                    Self::mark_function(lc, FunctionFlags::USES_THIS);
                    return expr;
                }
                if ident.name == self.names.arguments {
                    Self::mark_function(lc, FunctionFlags::USES_ARGUMENTS);
                    return expr;
                }
                let Some((symbol, crossed_function)) = Self::lookup(lc, ident.name) else {
                    return expr;
                };
                if crossed_function {
                    Self::mark_function(lc, FunctionFlags::USES_ANCESTOR_SCOPE);
                } else if symbol.flags.contains(SymbolFlags::IS_SELF) {
                    Self::mark_function(lc, FunctionFlags::USES_SELF_SYMBOL);
                }
                if ident.symbol == Some(symbol.id) {
                    return expr;
                }
                Rc::new(Expr::Ident(IdentExpr { symbol: Some(symbol.id), ..ident.clone() }))
            }
            Expr::Call(call) => {
                let is_eval = matches!(&*call.callee, Expr::Ident(callee) if callee.name == self.names.eval);
                if !is_eval {
                    return expr;
                }
                Self::mark_function(lc, FunctionFlags::HAS_EVAL);
                for outer in lc.functions_inner_to_outer().skip(1) {
                    lc.set_flag(&LcNode::Function(outer), FunctionFlags::HAS_NESTED_EVAL.bits());
                }
                if call.eval_args.is_some() {
                    return expr;
                }
                Rc::new(Expr::Call(esc_ir::CallExpr { eval_args: Some(call.args.clone()), ..call.clone() }))
            }
            _ => expr,
        }
    }

    fn leave_function(&mut self, _lc: &mut LexicalContext, func: Rc<Function>) -> Rc<Function> {
        let mut updated = (*func).clone();
        let mut changed = false;
        for p in &mut updated.parameters {
            if p.symbol.is_none() {
                if let Some(sym) = updated.body.symbols.get(p.name) {
                    p.symbol = Some(sym.id);
                    changed = true;
                }
            }
        }
        if updated.self_symbol.is_none() && !updated.flags.contains(FunctionFlags::IS_DECLARED) {
            if let Some(name) = updated.name {
                if let Some(sym) = updated.body.symbols.get(name) {
                    if sym.flags.contains(SymbolFlags::IS_SELF) {
                        updated.self_symbol = Some(sym.id);
                        changed = true;
                    }
                }
            }
        }
        if changed { Rc::new(updated) } else { func }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use esc_common::Interner;
    use esc_ir::{ExpressionStatement, FunctionKind, NodeId, NodeMeta, Parameter};
    use esc_token::{Token, TokenKind};

    fn names(interner: &mut Interner) -> WellKnownNames {
        WellKnownNames { this_keyword: interner.intern("this"), arguments: interner.intern("arguments"), eval: interner.intern("eval") }
    }

    fn meta(id: u32) -> NodeMeta {
        NodeMeta { id: NodeId(id), token: Token::synthetic(TokenKind::Identifier), finish: 0 }
    }

    fn function_returning_param(param: Atom) -> Rc<Function> {
        let ident_expr = Rc::new(Expr::Ident(IdentExpr { meta: meta(1), name: param, symbol: None, is_function: false }));
        let body = Rc::new(Block {
            id: NodeId(2),
            token: Token::synthetic(TokenKind::LBrace),
            finish: 0,
            statements: vec![Rc::new(Stmt::Return(esc_ir::ReturnStatement { meta: meta(3), argument: Some(ident_expr), is_yield: false }))],
            symbols: SymbolTable::new(),
            flags: BlockFlags::IS_BODY,
            entry_label: None,
            break_label: None,
        });
        Rc::new(Function {
            meta: meta(0),
            name: None,
            parameters: vec![Parameter { name: param, symbol: None }],
            body,
            kind: FunctionKind::Normal,
            flags: esc_ir::FunctionFlags::empty(),
            compile_unit: None,
            return_type: None,
            self_symbol: None,
        })
    }

    #[test]
    fn resolves_identifier_to_parameter_symbol() {
        let mut interner = Interner::new();
        let p = interner.intern("p");
        let func = function_returning_param(p);
        let mut resolver = Resolver::new(names(&mut interner));
        let resolved = resolver.resolve(func);

        assert!(resolver.errors.is_empty());
        let param_symbol = resolved.parameters[0].symbol.expect("parameter must be resolved");
        let Stmt::Return(ret) = &*resolved.body.statements[0] else { panic!("expected return") };
        let Expr::Ident(ident) = &**ret.argument.as_ref().unwrap() else { panic!("expected ident") };
        assert_eq!(ident.symbol, Some(param_symbol));
    }

    #[test]
    fn hoisted_var_is_declared_and_resolved() {
        let mut interner = Interner::new();
        let x = interner.intern("x");
        let ident_use = Rc::new(Expr::Ident(IdentExpr { meta: meta(4), name: x, symbol: None, is_function: false }));
        let body = Rc::new(Block {
            id: NodeId(1),
            token: Token::synthetic(TokenKind::LBrace),
            finish: 0,
            statements: vec![
                Rc::new(Stmt::Var(VarStatement { meta: meta(2), kind: VarKind::Var, name: x, symbol: None, init: None })),
                Rc::new(Stmt::Expression(ExpressionStatement { meta: meta(3), expression: ident_use })),
            ],
            symbols: SymbolTable::new(),
            flags: BlockFlags::IS_BODY,
            entry_label: None,
            break_label: None,
        });
        let func = Rc::new(Function {
            meta: meta(0),
            name: None,
            parameters: vec![],
            body,
            kind: FunctionKind::Normal,
            flags: esc_ir::FunctionFlags::empty(),
            compile_unit: None,
            return_type: None,
            self_symbol: None,
        });

        let mut resolver = Resolver::new(names(&mut interner));
        let resolved = resolver.resolve(func);
        assert!(resolved.body.symbols.get(x).is_some());
        let Stmt::Expression(es) = &*resolved.body.statements[1] else { panic!() };
        let Expr::Ident(ident) = &*es.expression else { panic!() };
        assert!(ident.symbol.is_some());
    }

    #[test]
    fn this_and_arguments_set_function_flags_without_declaring_symbols() {
        let mut interner = Interner::new();
        let wk = names(&mut interner);
        let this_use = Rc::new(Expr::Ident(IdentExpr { meta: meta(1), name: wk.this_keyword, symbol: None, is_function: false }));
        let args_use = Rc::new(Expr::Ident(IdentExpr { meta: meta(2), name: wk.arguments, symbol: None, is_function: false }));
        let body = Rc::new(Block {
            id: NodeId(1),
            token: Token::synthetic(TokenKind::LBrace),
            finish: 0,
            statements: vec![
                Rc::new(Stmt::Expression(ExpressionStatement { meta: meta(3), expression: this_use })),
                Rc::new(Stmt::Expression(ExpressionStatement { meta: meta(4), expression: args_use })),
            ],
            symbols: SymbolTable::new(),
            flags: BlockFlags::IS_BODY,
            entry_label: None,
            break_label: None,
        });
        let func = Rc::new(Function {
            meta: meta(0),
            name: None,
            parameters: vec![],
            body,
            kind: FunctionKind::Normal,
            flags: esc_ir::FunctionFlags::empty(),
            compile_unit: None,
            return_type: None,
            self_symbol: None,
        });

        let mut resolver = Resolver::new(wk);
        let resolved = resolver.resolve(func);
        assert!(resolved.flags.contains(FunctionFlags::USES_THIS));
        assert!(resolved.flags.contains(FunctionFlags::USES_ARGUMENTS));
        assert!(resolved.body.symbols.get(wk.this_keyword).is_none(), "this must not become a declared symbol");
    }

    #[test]
    fn duplicate_lexical_binding_in_same_block_is_an_error() {
        let mut interner = Interner::new();
        let x = interner.intern("x");
        let body = Rc::new(Block {
            id: NodeId(1),
            token: Token::synthetic(TokenKind::LBrace),
            finish: 0,
            statements: vec![
                Rc::new(Stmt::Var(VarStatement { meta: meta(2), kind: VarKind::Let, name: x, symbol: None, init: None })),
                Rc::new(Stmt::Var(VarStatement { meta: meta(3), kind: VarKind::Const, name: x, symbol: None, init: None })),
            ],
            symbols: SymbolTable::new(),
            flags: BlockFlags::IS_BODY,
            entry_label: None,
            break_label: None,
        });
        let func = Rc::new(Function {
            meta: meta(0),
            name: None,
            parameters: vec![],
            body,
            kind: FunctionKind::Normal,
            flags: esc_ir::FunctionFlags::empty(),
            compile_unit: None,
            return_type: None,
            self_symbol: None,
        });

        let mut resolver = Resolver::new(names(&mut interner));
        resolver.resolve(func);
        assert_eq!(resolver.errors, vec![ScopeError::DuplicateBinding(x)]);
    }

    #[test]
    fn named_function_expression_sees_its_own_name_via_self_symbol() {
        let mut interner = Interner::new();
        let f_name = interner.intern("f");
        let self_use = Rc::new(Expr::Ident(IdentExpr { meta: meta(5), name: f_name, symbol: None, is_function: true }));
        let inner_body = Rc::new(Block {
            id: NodeId(2),
            token: Token::synthetic(TokenKind::LBrace),
            finish: 0,
            statements: vec![Rc::new(Stmt::Expression(ExpressionStatement { meta: meta(4), expression: self_use }))],
            symbols: SymbolTable::new(),
            flags: BlockFlags::IS_BODY,
            entry_label: None,
            break_label: None,
        });
        let inner_fn = Rc::new(Function {
            meta: meta(1),
            name: Some(f_name),
            parameters: vec![],
            body: inner_body,
            kind: FunctionKind::Normal,
            flags: esc_ir::FunctionFlags::empty(),
            compile_unit: None,
            return_type: None,
            self_symbol: None,
        });
        let outer_body = Rc::new(Block {
            id: NodeId(3),
            token: Token::synthetic(TokenKind::LBrace),
            finish: 0,
            statements: vec![Rc::new(Stmt::Expression(ExpressionStatement {
                meta: meta(6),
                expression: Rc::new(Expr::Function(inner_fn)),
            }))],
            symbols: SymbolTable::new(),
            flags: BlockFlags::IS_BODY,
            entry_label: None,
            break_label: None,
        });
        let outer_fn = Rc::new(Function {
            meta: meta(0),
            name: None,
            parameters: vec![],
            body: outer_body,
            kind: FunctionKind::Normal,
            flags: esc_ir::FunctionFlags::empty(),
            compile_unit: None,
            return_type: None,
            self_symbol: None,
        });

        let mut resolver = Resolver::new(names(&mut interner));
        let resolved = resolver.resolve(outer_fn);
        let Stmt::Expression(es) = &*resolved.body.statements[0] else { panic!() };
        let Expr::Function(inner) = &*es.expression else { panic!() };
        assert!(inner.flags.contains(FunctionFlags::USES_SELF_SYMBOL));
        assert!(inner.self_symbol.is_some());
    }
}
