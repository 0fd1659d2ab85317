//! Visitors and the `accept`/walk dispatch.
//!
//! The contract: `enterX` returns `false` to skip a node's children;
//! `leaveX` returns the replacement (possibly the same node). Children
//! are visited in source order **except** `var` (init before name)
//! and do-while (body before test). A flag a nested pass
//! accumulates via `LexicalContext::set_flag` on a `Block`/`Function`
//! frame is folded into that node automatically when the walker pops
//! it — the node-replacement-in-lexical-context protocol — so
//! `leaveX` always sees the fully-flagged node, never the original.
//! Hooks take `&mut LexicalContext` rather than `&LexicalContext`
//! because a binder-style pass (`esc-scope`) needs to call
//! `set_flag`/`set_block_needs_scope` from inside them.

use crate::block::BlockRef;
use crate::expr::{CallExpr, Expr, ExprRef, IndexExpr, TernaryExpr, UnaryExpr};
use crate::expr::{AccessExpr, BinaryExpr, JoinPredecessorExpr, RuntimeExpr};
use crate::function::Function;
use crate::lexical_context::{LcNode, LexicalContext};
use crate::stmt::{
    BlockStatement, BreakStatement, CaseClause, CatchClause, ContinueStatement, ExpressionStatement, IfStatement,
    LabelStatement, LoopStatement, ReturnStatement, Stmt, StmtRef, SwitchStatement, ThrowStatement, TryStatement,
    VarStatement,
};
use std::rc::Rc;

#[allow(unused_variables)]
pub trait Visitor {
    /// Called just before `block` is pushed, with the *parent* frame
    /// already on the stack — a pass that needs to pre-declare a
    /// block's bindings before resolving its children installs
    /// the seeded block here instead of waiting for `leave_block`.
    fn seed_block(&mut self, lc: &mut LexicalContext, block: BlockRef) -> BlockRef {
        block
    }

    /// Called just before a `catch` clause's body is walked, with the
    /// `try`'s body already popped off the stack — lets a pass bind the
    /// exception parameter into the clause's body before `seed_block`
    /// sees it.
    fn seed_catch(&mut self, lc: &mut LexicalContext, catch: CatchClause) -> CatchClause {
        catch
    }

    fn enter_function(&mut self, lc: &mut LexicalContext, func: &Rc<Function>) -> bool {
        true
    }
    fn leave_function(&mut self, lc: &mut LexicalContext, func: Rc<Function>) -> Rc<Function> {
        func
    }

    fn enter_block(&mut self, lc: &mut LexicalContext, block: &BlockRef) -> bool {
        true
    }
    fn leave_block(&mut self, lc: &mut LexicalContext, block: BlockRef) -> BlockRef {
        block
    }

    fn enter_stmt(&mut self, lc: &mut LexicalContext, stmt: &StmtRef) -> bool {
        true
    }
    fn leave_stmt(&mut self, lc: &mut LexicalContext, stmt: StmtRef) -> StmtRef {
        stmt
    }

    fn enter_expr(&mut self, lc: &mut LexicalContext, expr: &ExprRef) -> bool {
        true
    }
    fn leave_expr(&mut self, lc: &mut LexicalContext, expr: ExprRef) -> ExprRef {
        expr
    }
}

pub fn walk_function(visitor: &mut dyn Visitor, lc: &mut LexicalContext, func: Rc<Function>) -> Rc<Function> {
    if !visitor.enter_function(lc, &func) {
        return func;
    }
    lc.push(LcNode::Function(func.clone()));
    let new_body = walk_block(visitor, lc, func.body.clone());
    // `pop` merges any flags a nested pass accumulated via `set_flag`
    // onto the node it popped — that *is* the flagged node, so there
    // is nothing left to `replace` on the way out.
    let LcNode::Function(flagged) = lc.pop() else { unreachable!() };
    let mut updated = (*flagged).clone();
    updated.body = new_body;
    visitor.leave_function(lc, Rc::new(updated))
}

pub fn walk_block(visitor: &mut dyn Visitor, lc: &mut LexicalContext, block: BlockRef) -> BlockRef {
    let block = visitor.seed_block(lc, block);
    if !visitor.enter_block(lc, &block) {
        return block;
    }
    lc.push(LcNode::Block(block.clone()));
    let new_statements: Vec<StmtRef> = block.statements.iter().map(|s| walk_stmt(visitor, lc, s.clone())).collect();
    let LcNode::Block(flagged) = lc.pop() else { unreachable!() };
    let updated = Rc::new(flagged.with_statements(new_statements));
    visitor.leave_block(lc, updated)
}

pub fn walk_stmt(visitor: &mut dyn Visitor, lc: &mut LexicalContext, stmt: StmtRef) -> StmtRef {
    if !visitor.enter_stmt(lc, &stmt) {
        return stmt;
    }
    let is_lc_bearing = matches!(&*stmt, Stmt::Loop(_) | Stmt::Switch(_) | Stmt::Try(_) | Stmt::Label(_));
    if is_lc_bearing {
        lc.push(LcNode::Stmt(stmt.clone()));
    }

    let walked = match &*stmt {
        Stmt::Expression(n) => Stmt::Expression(ExpressionStatement {
            meta: n.meta.clone(),
            expression: walk_expr(visitor, lc, n.expression.clone()),
        }),
        Stmt::Var(n) => {
            // Init before name — right-associative visit order.
            let init = n.init.clone().map(|i| walk_expr(visitor, lc, i));
            Stmt::Var(VarStatement { meta: n.meta.clone(), init, ..n.clone() })
        }
        Stmt::If(n) => {
            let test = walk_expr(visitor, lc, n.test.clone());
            let pass = walk_stmt(visitor, lc, n.pass.clone());
            let fail = n.fail.clone().map(|f| walk_stmt(visitor, lc, f));
            Stmt::If(IfStatement { meta: n.meta.clone(), test, pass, fail, conversion: n.conversion.clone() })
        }
        Stmt::Switch(n) => {
            let discriminant = walk_expr(visitor, lc, n.discriminant.clone());
            let cases = n
                .cases
                .iter()
                .map(|c| CaseClause {
                    meta: c.meta.clone(),
                    test: c.test.clone().map(|t| walk_expr(visitor, lc, t)),
                    body: c.body.iter().map(|s| walk_stmt(visitor, lc, s.clone())).collect(),
                })
                .collect();
            Stmt::Switch(SwitchStatement { meta: n.meta.clone(), discriminant, cases, ..n.clone() })
        }
        Stmt::Loop(n) => {
            if n.form == crate::stmt::LoopForm::DoWhile {
                // do-while: body before test.
                let body = walk_stmt(visitor, lc, n.body.clone());
                let test = n.test.clone().map(|t| walk_expr(visitor, lc, t));
                Stmt::Loop(LoopStatement { meta: n.meta.clone(), body, test, ..n.clone() })
            } else {
                let init = n.init.clone().map(|i| walk_expr(visitor, lc, i));
                let test = n.test.clone().map(|t| walk_expr(visitor, lc, t));
                let update = n.update.clone().map(|u| walk_expr(visitor, lc, u));
                let body = walk_stmt(visitor, lc, n.body.clone());
                Stmt::Loop(LoopStatement { meta: n.meta.clone(), init, test, update, body, ..n.clone() })
            }
        }
        Stmt::Try(n) => {
            let body = walk_block(visitor, lc, n.body.clone());
            let catches = n
                .catches
                .iter()
                .map(|c| {
                    let seeded = visitor.seed_catch(lc, c.clone());
                    CatchClause {
                        meta: seeded.meta.clone(),
                        parameter: seeded.parameter.clone(),
                        condition: seeded.condition.clone().map(|e| walk_expr(visitor, lc, e)),
                        body: walk_block(visitor, lc, seeded.body.clone()),
                        is_synthetic_rethrow: seeded.is_synthetic_rethrow,
                    }
                })
                .collect();
            let finally_body = n.finally_body.clone().map(|b| walk_block(visitor, lc, b));
            Stmt::Try(TryStatement { meta: n.meta.clone(), body, catches, finally_body, inlined_finallies: n.inlined_finallies.clone() })
        }
        Stmt::Throw(n) => Stmt::Throw(ThrowStatement { meta: n.meta.clone(), argument: walk_expr(visitor, lc, n.argument.clone()) }),
        Stmt::Return(n) => Stmt::Return(ReturnStatement {
            meta: n.meta.clone(),
            argument: n.argument.clone().map(|a| walk_expr(visitor, lc, a)),
            is_yield: n.is_yield,
        }),
        Stmt::Break(n) => Stmt::Break(BreakStatement { meta: n.meta.clone(), label: n.label.clone() }),
        Stmt::Continue(n) => Stmt::Continue(ContinueStatement { meta: n.meta.clone(), label: n.label.clone() }),
        Stmt::Block(n) => Stmt::Block(BlockStatement { meta: n.meta.clone(), block: walk_block(visitor, lc, n.block.clone()) }),
        Stmt::Label(n) => Stmt::Label(LabelStatement { meta: n.meta.clone(), name: n.name.clone(), body: walk_stmt(visitor, lc, n.body.clone()) }),
    };

    let replacement = Rc::new(walked);
    if is_lc_bearing {
        lc.replace(&LcNode::Stmt(stmt.clone()), LcNode::Stmt(replacement.clone()));
        let LcNode::Stmt(popped) = lc.pop() else { unreachable!() };
        visitor.leave_stmt(lc, popped)
    } else {
        visitor.leave_stmt(lc, replacement)
    }
}

pub fn walk_expr(visitor: &mut dyn Visitor, lc: &mut LexicalContext, expr: ExprRef) -> ExprRef {
    if !visitor.enter_expr(lc, &expr) {
        return expr;
    }
    let walked = match &*expr {
        Expr::Literal(_) | Expr::Ident(_) | Expr::Error(_) => return visitor.leave_expr(lc, expr),
        Expr::Access(n) => Expr::Access(AccessExpr { base: walk_expr(visitor, lc, n.base.clone()), ..n.clone() }),
        Expr::Index(n) => {
            let base = walk_expr(visitor, lc, n.base.clone());
            let index = walk_expr(visitor, lc, n.index.clone());
            Expr::Index(IndexExpr { base, index, ..n.clone() })
        }
        Expr::Call(n) => {
            let callee = walk_expr(visitor, lc, n.callee.clone());
            let args = n.args.iter().map(|a| walk_expr(visitor, lc, a.clone())).collect();
            Expr::Call(CallExpr { callee, args, ..n.clone() })
        }
        Expr::Unary(n) => Expr::Unary(UnaryExpr { operand: walk_expr(visitor, lc, n.operand.clone()), ..n.clone() }),
        Expr::Binary(n) => {
            let lhs = walk_expr(visitor, lc, n.lhs.clone());
            let rhs = walk_expr(visitor, lc, n.rhs.clone());
            Expr::Binary(BinaryExpr { lhs, rhs, ..n.clone() })
        }
        Expr::Ternary(n) => {
            let test = walk_expr(visitor, lc, n.test.clone());
            let then_branch = walk_expr(visitor, lc, n.then_branch.clone());
            let else_branch = walk_expr(visitor, lc, n.else_branch.clone());
            Expr::Ternary(TernaryExpr { meta: n.meta.clone(), test, then_branch, else_branch })
        }
        Expr::JoinPredecessor(n) => {
            Expr::JoinPredecessor(JoinPredecessorExpr { expression: walk_expr(visitor, lc, n.expression.clone()), ..n.clone() })
        }
        Expr::Runtime(n) => {
            let args = n.args.iter().map(|a| walk_expr(visitor, lc, a.clone())).collect();
            Expr::Runtime(RuntimeExpr { meta: n.meta.clone(), request: n.request, args })
        }
        Expr::Function(f) => {
            let walked_fn = walk_function(visitor, lc, f.clone());
            return visitor.leave_expr(lc, Rc::new(Expr::Function(walked_fn)));
        }
    };
    visitor.leave_expr(lc, Rc::new(walked))
}

/// A visitor that renders every `Block`'s statement count, used as a
/// smoke test double for the walk functions above.
#[derive(Default)]
pub struct CountingVisitor {
    pub blocks_entered: u32,
    pub exprs_entered: u32,
}

impl Visitor for CountingVisitor {
    fn enter_block(&mut self, _lc: &mut LexicalContext, _block: &BlockRef) -> bool {
        self.blocks_entered += 1;
        true
    }

    fn enter_expr(&mut self, _lc: &mut LexicalContext, _expr: &ExprRef) -> bool {
        self.exprs_entered += 1;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::Block;
    use crate::expr::{Expr, Literal, LiteralExpr};
    use crate::flags::BlockFlags;
    use crate::node_id::{NodeId, NodeMeta};
    use crate::symbol::SymbolTable;
    use esc_token::{Token, TokenKind};

    fn meta(id: u32) -> NodeMeta {
        NodeMeta { id: NodeId(id), token: Token::synthetic(TokenKind::Identifier), finish: 0 }
    }

    #[test]
    fn walk_block_visits_every_expression_and_rebuilds_unchanged() {
        let expr_stmt = Rc::new(Stmt::Expression(ExpressionStatement {
            meta: meta(0),
            expression: Rc::new(Expr::Literal(LiteralExpr { meta: meta(1), value: Literal::Number(1.0) })),
        }));
        let block = Rc::new(Block {
            id: NodeId(2),
            token: Token::synthetic(TokenKind::LBrace),
            finish: 0,
            statements: vec![expr_stmt],
            symbols: SymbolTable::new(),
            flags: BlockFlags::IS_BODY,
            entry_label: None,
            break_label: None,
        });

        let mut lc = LexicalContext::new();
        let mut visitor = CountingVisitor::default();
        let result = walk_block(&mut visitor, &mut lc, block.clone());

        assert_eq!(visitor.blocks_entered, 1);
        assert_eq!(visitor.exprs_entered, 1);
        assert_eq!(result.statements.len(), 1);
        assert_eq!(lc.depth(), 0, "lexical context must be balanced after the walk");
    }

    struct ReplaceNumberWith42;
    impl Visitor for ReplaceNumberWith42 {
        fn leave_expr(&mut self, _lc: &mut LexicalContext, expr: ExprRef) -> ExprRef {
            match &*expr {
                Expr::Literal(l) if matches!(l.value, Literal::Number(n) if n != 42.0) => {
                    Rc::new(Expr::Literal(LiteralExpr { meta: l.meta.clone(), value: Literal::Number(42.0) }))
                }
                _ => expr,
            }
        }
    }

    #[test]
    fn leave_expr_replacement_propagates_into_rebuilt_block() {
        let expr_stmt = Rc::new(Stmt::Expression(ExpressionStatement {
            meta: meta(0),
            expression: Rc::new(Expr::Literal(LiteralExpr { meta: meta(1), value: Literal::Number(1.0) })),
        }));
        let block = Rc::new(Block {
            id: NodeId(2),
            token: Token::synthetic(TokenKind::LBrace),
            finish: 0,
            statements: vec![expr_stmt],
            symbols: SymbolTable::new(),
            flags: BlockFlags::IS_BODY,
            entry_label: None,
            break_label: None,
        });

        let mut lc = LexicalContext::new();
        let mut visitor = ReplaceNumberWith42;
        let result = walk_block(&mut visitor, &mut lc, block);

        let Stmt::Expression(stmt) = &*result.statements[0] else { panic!() };
        let Expr::Literal(lit) = &*stmt.expression else { panic!() };
        assert_eq!(lit.value, Literal::Number(42.0));
    }
}
