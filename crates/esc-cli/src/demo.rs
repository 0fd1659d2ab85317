//! A hand-built sample program: this workspace carries no
//! lexer/parser, so the CLI driver exercises the pipeline against a
//! small constructed `Function` rather than one parsed from the file
//! it is given. The file's text still flows through
//! `esc_common::Source` for its digest — source text, URL, digest,
//! and length — even though this crate never lowers that text to IR.
//!
//! Builds the equivalent of:
//! ```js
//! function demo(x) {
//!   var y = x ? 1 : 2;
//!   if (x) {
//!     return y;
//!   }
//!   return 0;
//! }
//! ```

use esc_common::Interner;
use esc_ir::{
    Block, BlockFlags, BlockRef, ConversionChain, Expr, ExprRef, Function, FunctionFlags, FunctionKind, IdentExpr,
    IfStatement, Literal, LiteralExpr, NodeIdAllocator, NodeMeta, Parameter, ReturnStatement, Stmt, StmtRef,
    SymbolTable, TernaryExpr, VarKind, VarStatement,
};
use esc_token::{Token, TokenKind};
use esc_types::Type;
use std::rc::Rc;

fn literal(ids: &mut NodeIdAllocator, value: f64) -> ExprRef {
    Rc::new(Expr::Literal(LiteralExpr {
        meta: NodeMeta { id: ids.next(), token: Token::synthetic(TokenKind::NumericLiteral), finish: 0 },
        value: Literal::Number(value),
    }))
}

fn ident(ids: &mut NodeIdAllocator, interner: &mut Interner, name: &str) -> ExprRef {
    Rc::new(Expr::Ident(IdentExpr {
        meta: NodeMeta { id: ids.next(), token: Token::synthetic(TokenKind::Identifier), finish: 0 },
        name: interner.intern(name),
        symbol: None,
        is_function: false,
    }))
}

fn return_stmt(ids: &mut NodeIdAllocator, argument: Option<ExprRef>) -> StmtRef {
    Rc::new(Stmt::Return(ReturnStatement {
        meta: NodeMeta { id: ids.next(), token: Token::synthetic(TokenKind::Return), finish: 0 },
        argument,
        is_yield: false,
    }))
}

/// Builds the `demo(x)` function described at module level.
pub fn build(ids: &mut NodeIdAllocator, interner: &mut Interner) -> Rc<Function> {
    let x_name = interner.intern("x");
    let y_name = interner.intern("y");

    let ternary = Rc::new(Expr::Ternary(TernaryExpr {
        meta: NodeMeta { id: ids.next(), token: Token::synthetic(TokenKind::Question), finish: 0 },
        test: ident(ids, interner, "x"),
        then_branch: literal(ids, 1.0),
        else_branch: literal(ids, 2.0),
    }));

    let var_y = Rc::new(Stmt::Var(VarStatement {
        meta: NodeMeta { id: ids.next(), token: Token::synthetic(TokenKind::Var), finish: 0 },
        kind: VarKind::Var,
        name: y_name,
        symbol: None,
        init: Some(ternary),
    }));

    let return_y = return_stmt(ids, Some(ident(ids, interner, "y")));
    let if_stmt = Rc::new(Stmt::If(IfStatement {
        meta: NodeMeta { id: ids.next(), token: Token::synthetic(TokenKind::If), finish: 0 },
        test: ident(ids, interner, "x"),
        pass: return_y,
        fail: None,
        conversion: ConversionChain::new(),
    }));

    let return_zero = return_stmt(ids, Some(literal(ids, 0.0)));

    let body: BlockRef = Rc::new(Block {
        id: ids.next(),
        token: Token::synthetic(TokenKind::LBrace),
        finish: 0,
        statements: vec![var_y, if_stmt, return_zero],
        symbols: SymbolTable::new(),
        flags: BlockFlags::IS_BODY,
        entry_label: None,
        break_label: None,
    });
    Rc::new(Function {
        meta: NodeMeta { id: ids.next(), token: Token::synthetic(TokenKind::Function), finish: 0 },
        name: Some(interner.intern("demo")),
        parameters: vec![Parameter { name: x_name, symbol: None }],
        body,
        kind: FunctionKind::Normal,
        flags: FunctionFlags::empty(),
        compile_unit: None,
        return_type: Some(Type::NUMBER),
        self_symbol: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_a_function_with_three_statements() {
        let mut ids = NodeIdAllocator::new();
        let mut interner = Interner::new();
        let func = build(&mut ids, &mut interner);
        assert_eq!(func.body.statements.len(), 3);
        assert_eq!(func.name_or_anonymous(), "<named>");
    }
}
