//! `var` hoisting scan: collects every `var`-kind declaration
//! reachable from a function body without crossing into a nested
//! function expression's own body — the scan never touches `Expr`
//! nodes, so a `function` expression nested inside an initializer is
//! skipped for free.

use esc_common::Atom;
use esc_ir::{BlockRef, LoopStatement, Stmt, StmtRef, VarKind};

pub fn scan_var_names(block: &BlockRef, out: &mut Vec<Atom>) {
    for stmt in &block.statements {
        scan_stmt(stmt, out);
    }
}

fn scan_stmt(stmt: &StmtRef, out: &mut Vec<Atom>) {
    match &**stmt {
        Stmt::Var(v) if v.kind == VarKind::Var => out.push(v.name),
        Stmt::Var(_) => {}
        Stmt::If(n) => {
            scan_stmt(&n.pass, out);
            if let Some(fail) = &n.fail {
                scan_stmt(fail, out);
            }
        }
        Stmt::Switch(n) => {
            for case in &n.cases {
                for s in &case.body {
                    scan_stmt(s, out);
                }
            }
        }
        Stmt::Loop(LoopStatement { body, .. }) => scan_stmt(body, out),
        Stmt::Try(n) => {
            scan_var_names(&n.body, out);
            for c in &n.catches {
                scan_var_names(&c.body, out);
            }
            if let Some(finally) = &n.finally_body {
                scan_var_names(finally, out);
            }
        }
        Stmt::Block(n) => scan_var_names(&n.block, out),
        Stmt::Label(n) => scan_stmt(&n.body, out),
        Stmt::Expression(_) | Stmt::Throw(_) | Stmt::Return(_) | Stmt::Break(_) | Stmt::Continue(_) => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use esc_common::Interner;
    use esc_ir::{
        Block, ExpressionStatement, Expr, FunctionKind, IfStatement, LoopForm, NodeId, NodeMeta, Parameter,
        SymbolTable, VarStatement,
    };
    use esc_token::{Token, TokenKind};
    use std::rc::Rc;

    fn meta(id: u32) -> NodeMeta {
        NodeMeta { id: NodeId(id), token: Token::synthetic(TokenKind::Identifier), finish: 0 }
    }

    fn var_stmt(id: u32, kind: VarKind, name: Atom) -> StmtRef {
        Rc::new(Stmt::Var(VarStatement { meta: meta(id), kind, name, symbol: None, init: None }))
    }

    #[test]
    fn hoists_through_nested_control_flow_but_not_functions() {
        let mut interner = Interner::new();
        let outer_var = interner.intern("x");
        let inner_var = interner.intern("y");
        let nested_fn_var = interner.intern("z");
        let let_binding = interner.intern("w");

        let nested_fn_body = Rc::new(Block {
            id: NodeId(100),
            token: Token::synthetic(TokenKind::LBrace),
            finish: 0,
            statements: vec![var_stmt(101, VarKind::Var, nested_fn_var)],
            symbols: SymbolTable::new(),
            flags: esc_ir::BlockFlags::IS_BODY,
            entry_label: None,
            break_label: None,
        });
        let nested_fn = Rc::new(esc_ir::Function {
            meta: meta(102),
            name: None,
            parameters: vec![Parameter { name: interner.intern("p"), symbol: None }],
            body: nested_fn_body,
            kind: FunctionKind::Normal,
            flags: esc_ir::FunctionFlags::empty(),
            compile_unit: None,
            return_type: None,
            self_symbol: None,
        });
        let nested_fn_stmt = Rc::new(Stmt::Expression(ExpressionStatement {
            meta: meta(103),
            expression: Rc::new(Expr::Function(nested_fn)),
        }));

        let if_stmt = Rc::new(Stmt::If(IfStatement {
            meta: meta(1),
            test: Rc::new(Expr::Literal(esc_ir::LiteralExpr { meta: meta(2), value: esc_ir::Literal::Boolean(true) })),
            pass: var_stmt(3, VarKind::Var, inner_var),
            fail: None,
            conversion: esc_ir::ConversionChain::new(),
        }));
        let loop_stmt = Rc::new(Stmt::Loop(LoopStatement {
            meta: meta(4),
            form: LoopForm::While,
            init: None,
            test: None,
            update: None,
            body: var_stmt(5, VarKind::Let, let_binding),
            continue_label: Rc::from("L0"),
            break_label: Rc::from("L1"),
            controls_flow_escapes: false,
            conversion: esc_ir::ConversionChain::new(),
            iterator_symbol: None,
            per_iteration_scope: false,
        }));
        let body = Rc::new(Block {
            id: NodeId(0),
            token: Token::synthetic(TokenKind::LBrace),
            finish: 0,
            statements: vec![var_stmt(0, VarKind::Var, outer_var), if_stmt, loop_stmt, nested_fn_stmt],
            symbols: SymbolTable::new(),
            flags: esc_ir::BlockFlags::IS_BODY,
            entry_label: None,
            break_label: None,
        });

        let mut found = Vec::new();
        scan_var_names(&body, &mut found);

        assert_eq!(found, vec![outer_var, inner_var]);
        assert!(!found.contains(&nested_fn_var), "must not cross into a nested function body");
        assert!(!found.contains(&let_binding), "must not collect let/const");

        let names: Vec<&str> = found.iter().map(|a| interner.resolve(*a)).collect();
        assert_eq!(names, vec!["x", "y"]);
    }
}
