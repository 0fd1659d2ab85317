//! A lightweight, self-contained type estimate per branch: the
//! full optimistic/pessimistic pinning machinery lives in `esc-opt`,
//! which this pass does not depend on (`esc-opt` depends on `esc-flow`
//! in the crate-layout table, not the reverse). To decide whether a
//! join point needs a conversion, the flow pass only needs *a* type
//! estimate per symbol per branch, not the deoptimization protocol
//! itself — so it tracks its own local `SymbolId -> Type` map by
//! replaying each branch's literal/operator types with the same
//! `get_type` rules `esc-ir`'s expression nodes already expose.

use esc_ir::{Expr, ExprRef, Stmt, StmtRef};
use esc_types::Type;
use rustc_hash::FxHashMap;

pub type TypeEnv = FxHashMap<esc_ir::SymbolId, Type>;

/// Estimates `expr`'s type given the current best-known types of the
/// symbols it reads. Falls back to `Type::UNKNOWN` for anything not
/// locally trackable (an unresolved ident, a call result with no
/// pinned type yet, ...).
pub fn infer_type(expr: &Expr, env: &TypeEnv) -> Type {
    match expr {
        Expr::Literal(lit) => lit.get_type(),
        Expr::Ident(ident) => ident.symbol.and_then(|s| env.get(&s).copied()).unwrap_or(Type::UNKNOWN),
        Expr::Access(n) => n.get_type(),
        Expr::Index(n) => n.get_type(),
        Expr::Call(n) => n.get_type(),
        Expr::Unary(n) => n.get_type(infer_type(&n.operand, env)),
        Expr::Binary(n) => n.get_type(infer_type(&n.lhs, env), infer_type(&n.rhs, env)),
        Expr::Ternary(n) => n.get_type(infer_type(&n.then_branch, env), infer_type(&n.else_branch, env)),
        Expr::JoinPredecessor(n) => infer_type(&n.expression, env),
        Expr::Runtime(n) => n.get_type(),
        Expr::Error(_) => Type::UNKNOWN,
        Expr::Function(_) => Type::OBJECT,
    }
}

/// Replays `stmt`'s assignments into `env` without crossing into a
/// nested function's own body (the same boundary `esc-scope::hoist`
/// draws), returning the resulting per-symbol type estimate at the
/// statement's exit.
pub fn apply_stmt(stmt: &StmtRef, env: &mut TypeEnv) {
    match &**stmt {
        Stmt::Var(v) => {
            if let (Some(symbol), Some(init)) = (v.symbol, &v.init) {
                env.insert(symbol, infer_type(init, env));
            }
        }
        Stmt::Expression(n) => apply_expr(&n.expression, env),
        Stmt::If(n) => {
            apply_expr(&n.test, env);
            let mut pass_env = env.clone();
            apply_stmt(&n.pass, &mut pass_env);
            let mut fail_env = env.clone();
            if let Some(fail) = &n.fail {
                apply_stmt(fail, &mut fail_env);
            }
            merge_into(env, &pass_env, &fail_env);
        }
        Stmt::Switch(n) => {
            apply_expr(&n.discriminant, env);
            for case in &n.cases {
                for s in &case.body {
                    apply_stmt(s, env);
                }
            }
        }
        Stmt::Loop(n) => {
            if let Some(init) = &n.init {
                apply_expr(init, env);
            }
            apply_stmt(&n.body, env);
        }
        Stmt::Try(n) => {
            for s in &n.body.statements {
                apply_stmt(s, env);
            }
            for c in &n.catches {
                for s in &c.body.statements {
                    apply_stmt(s, env);
                }
            }
            if let Some(finally) = &n.finally_body {
                for s in &finally.statements {
                    apply_stmt(s, env);
                }
            }
        }
        Stmt::Throw(n) => apply_expr(&n.argument, env),
        Stmt::Return(n) => {
            if let Some(arg) = &n.argument {
                apply_expr(arg, env);
            }
        }
        Stmt::Block(n) => {
            for s in &n.block.statements {
                apply_stmt(s, env);
            }
        }
        Stmt::Label(n) => apply_stmt(&n.body, env),
        Stmt::Break(_) | Stmt::Continue(_) => {}
    }
}

fn apply_expr(expr: &ExprRef, env: &mut TypeEnv) {
    use esc_ir::BinaryOp;
    if let Expr::Binary(n) = &**expr {
        apply_expr(&n.lhs, env);
        apply_expr(&n.rhs, env);
        if n.op == BinaryOp::Assign {
            if let Expr::Ident(ident) = &*n.lhs {
                if let Some(symbol) = ident.symbol {
                    env.insert(symbol, infer_type(&n.rhs, env));
                }
            }
        }
    }
    // Other expression kinds carry no direct assignment of their own;
    // their nested initializers are covered by the `Stmt::Var`/`If`
    // cases that hold them.
}

fn merge_into(env: &mut TypeEnv, pass_env: &TypeEnv, fail_env: &TypeEnv) {
    for (symbol, pass_ty) in pass_env {
        let fail_ty = fail_env.get(symbol).copied().unwrap_or(*pass_ty);
        env.insert(*symbol, Type::widest(*pass_ty, fail_ty));
    }
    for (symbol, fail_ty) in fail_env {
        env.entry(*symbol).or_insert(*fail_ty);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use esc_ir::{Literal, LiteralExpr, NodeId, NodeMeta};
    use esc_token::{Token, TokenKind};
    use std::rc::Rc;

    fn meta(id: u32) -> NodeMeta {
        NodeMeta { id: NodeId(id), token: Token::synthetic(TokenKind::Identifier), finish: 0 }
    }

    #[test]
    fn infer_type_resolves_through_ident_env() {
        let mut env = TypeEnv::default();
        env.insert(esc_ir::SymbolId(0), Type::INT);
        let ident = Expr::Ident(esc_ir::IdentExpr { meta: meta(0), name: {
            let mut i = esc_common::Interner::new();
            i.intern("x")
        }, symbol: Some(esc_ir::SymbolId(0)), is_function: false });
        assert_eq!(infer_type(&ident, &env), Type::INT);
    }

    #[test]
    fn infer_type_unknown_for_unresolved_ident() {
        let env = TypeEnv::default();
        let mut i = esc_common::Interner::new();
        let name = i.intern("y");
        let ident = Expr::Ident(esc_ir::IdentExpr { meta: meta(0), name, symbol: None, is_function: false });
        assert_eq!(infer_type(&ident, &env), Type::UNKNOWN);
    }

    #[test]
    fn literal_type_is_immediate() {
        let env = TypeEnv::default();
        let lit = Expr::Literal(LiteralExpr { meta: meta(0), value: Literal::Number(1.0) });
        assert_eq!(infer_type(&lit, &env), Type::NUMBER);
    }
}
