//! Switch-statement flow facts: the jump-table lowering
//! prerequisite (`unique_integer`) and the discriminant holder symbol.

use esc_ir::{CaseClause, Expr, Literal};
use rustc_hash::FxHashSet;

/// `true` iff every non-default case's test is an `INT`-valued literal
/// constant and no two cases share a value — the prerequisite the
/// jump-table lowering checks before it can skip a linear compare
/// chain.
pub fn compute_unique_integer(cases: &[CaseClause]) -> bool {
    let mut seen: FxHashSet<i32> = FxHashSet::default();
    for case in cases {
        let Some(test) = &case.test else {
            continue;
        };
        let Expr::Literal(lit) = &**test else {
            return false;
        };
        let Literal::Number(n) = lit.value else {
            return false;
        };
        if n.fract() != 0.0 || n < i32::MIN as f64 || n > i32::MAX as f64 {
            return false;
        }
        if !seen.insert(n as i32) {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use esc_ir::{LiteralExpr, NodeId, NodeMeta};
    use esc_token::{Token, TokenKind};
    use std::rc::Rc;

    fn meta(id: u32) -> NodeMeta {
        NodeMeta { id: NodeId(id), token: Token::synthetic(TokenKind::Identifier), finish: 0 }
    }

    fn int_case(id: u32, n: f64) -> CaseClause {
        CaseClause {
            meta: meta(id),
            test: Some(Rc::new(Expr::Literal(LiteralExpr { meta: meta(id), value: Literal::Number(n) }))),
            body: vec![],
        }
    }

    #[test]
    fn unique_integer_true_for_distinct_int_literals() {
        let cases = vec![int_case(0, 1.0), int_case(1, 2.0), CaseClause { meta: meta(2), test: None, body: vec![] }];
        assert!(compute_unique_integer(&cases));
    }

    #[test]
    fn unique_integer_false_on_duplicate() {
        let cases = vec![int_case(0, 1.0), int_case(1, 1.0)];
        assert!(!compute_unique_integer(&cases));
    }

    #[test]
    fn unique_integer_false_on_non_integer_literal() {
        let cases = vec![int_case(0, 1.5)];
        assert!(!compute_unique_integer(&cases));
    }

    #[test]
    fn unique_integer_false_on_non_literal_test() {
        let mut interner = esc_common::Interner::new();
        let name = interner.intern("x");
        let ident = Rc::new(Expr::Ident(esc_ir::IdentExpr { meta: meta(0), name, symbol: None, is_function: false }));
        let cases = vec![CaseClause { meta: meta(0), test: Some(ident), body: vec![] }];
        assert!(!compute_unique_integer(&cases));
    }
}
