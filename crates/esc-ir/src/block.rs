//! `Block`: ordered statements plus an insertion-ordered
//! symbol table, entry/break labels, and a dense flag word.

use crate::flags::BlockFlags;
use crate::node_id::NodeId;
use crate::stmt::{Stmt, StmtRef};
use crate::symbol::SymbolTable;
use esc_token::Token;
use std::rc::Rc;

pub type BlockRef = Rc<Block>;

#[derive(Clone, Debug, PartialEq)]
pub struct Block {
    pub id: NodeId,
    pub token: Token,
    pub finish: u32,
    pub statements: Vec<StmtRef>,
    pub symbols: SymbolTable,
    pub flags: BlockFlags,
    /// Label name this block re-enters on `continue` (loop bodies).
    pub entry_label: Option<Rc<str>>,
    /// Label name a `break` targets to exit this block.
    pub break_label: Option<Rc<str>>,
}

impl Block {
    /// Terminal iff the last statement is terminal and the block is
    /// not itself breakable.
    pub fn is_terminal(&self) -> bool {
        if self.flags.contains(BlockFlags::IS_BREAKABLE) {
            return false;
        }
        matches!(self.statements.last().map(|s| s.is_terminal()), Some(true))
    }

    /// Sum of `slotCount()` over symbols with assigned slots.
    pub fn next_slot(&self) -> u32 {
        self.symbols.next_slot()
    }

    pub fn with_statements(&self, statements: Vec<StmtRef>) -> Block {
        if statements.len() == self.statements.len() && statements.iter().zip(&self.statements).all(|(a, b)| Rc::ptr_eq(a, b)) {
            return self.clone();
        }
        Block { statements, ..self.clone() }
    }

    pub fn with_flags(&self, flags: BlockFlags) -> Block {
        if self.flags == flags {
            return self.clone();
        }
        Block { flags, ..self.clone() }
    }

    pub fn with_symbols(&self, symbols: SymbolTable) -> Block {
        if self.symbols == symbols {
            return self.clone();
        }
        Block { symbols, ..self.clone() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::{Expr, IdentExpr, NodeMeta};
    use crate::stmt::{ExpressionStatement, Stmt};
    use esc_common::Interner;
    use esc_token::TokenKind;
    use std::rc::Rc;

    fn empty_block(flags: BlockFlags) -> Block {
        Block {
            id: NodeId(0),
            token: Token::synthetic(TokenKind::LBrace),
            finish: 0,
            statements: vec![],
            symbols: SymbolTable::new(),
            flags,
            entry_label: None,
            break_label: None,
        }
    }

    #[test]
    fn breakable_block_is_never_terminal() {
        let mut interner = Interner::new();
        let atom = interner.intern("x");
        let ident = Rc::new(Expr::Ident(IdentExpr {
            meta: NodeMeta { id: NodeId(1), token: Token::synthetic(TokenKind::Identifier), finish: 0 },
            name: atom,
            symbol: None,
            is_function: false,
        }));
        let mut block = empty_block(BlockFlags::IS_BREAKABLE);
        block.statements.push(Rc::new(Stmt::Expression(ExpressionStatement {
            meta: crate::node_id::NodeMeta { id: NodeId(2), token: Token::synthetic(TokenKind::Semicolon), finish: 0 },
            expression: ident,
        })));
        assert!(!block.is_terminal());
    }

    #[test]
    fn next_slot_sums_assigned_symbol_slots() {
        use crate::symbol::{Symbol, SymbolFlags, SymbolId};
        let mut interner = Interner::new();
        let mut symbols = SymbolTable::new();
        let mut a = Symbol::new(SymbolId(0), interner.intern("a"), SymbolFlags::IS_VAR);
        a.slots.set(esc_types::Type::INT, 0);
        let mut b = Symbol::new(SymbolId(1), interner.intern("b"), SymbolFlags::IS_VAR);
        b.slots.set(esc_types::Type::NUMBER, 1);
        symbols.insert(a);
        symbols.insert(b);
        let block = Block { symbols, ..empty_block(BlockFlags::empty()) };
        assert_eq!(block.next_slot(), 1 + 2);
    }
}
