//! The lexical context walker: a stack of enclosing IR nodes
//! with per-frame flag accumulation, used by every analysis pass.
//!
//! Growth is `Vec`'s native doubling — no custom growth code is
//! needed for that.
//!
//! All operations here are assertions: violating them is a programmer
//! error in a pass, not a runtime condition a caller should recover
//! from.

use crate::block::{Block, BlockRef};
use crate::flags::{BlockFlags, FunctionFlags};
use crate::function::Function;
use crate::stmt::{LoopStatement, Stmt, StmtRef};
use std::rc::Rc;

/// A node that may sit on the lexical-context stack. Block and
/// Function are the flag-bearing structural nodes; the
/// control-flow statement kinds (`If`/loop/switch/try/label) are
/// tracked for ancestor queries (`getCurrentLoop`, `getBreakable`,
/// `getInlinedFinally`, ...) but carry no frame-accumulated flags of
/// their own.
#[derive(Clone)]
pub enum LcNode {
    Block(BlockRef),
    Function(Rc<Function>),
    Stmt(StmtRef),
}

impl LcNode {
    fn identity_eq(&self, other: &LcNode) -> bool {
        match (self, other) {
            (LcNode::Block(a), LcNode::Block(b)) => Rc::ptr_eq(a, b),
            (LcNode::Function(a), LcNode::Function(b)) => Rc::ptr_eq(a, b),
            (LcNode::Stmt(a), LcNode::Stmt(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

struct Frame {
    node: LcNode,
    /// OR-accumulated flag bits, applied to the node's own flags field
    /// on pop (Block/Function only).
    flags: u32,
}

#[derive(Default)]
pub struct LexicalContext {
    stack: Vec<Frame>,
}

impl LexicalContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Pushes `node`. Asserts it is not already present.
    pub fn push(&mut self, node: LcNode) {
        assert!(
            !self.stack.iter().any(|f| f.node.identity_eq(&node)),
            "node pushed onto lexical context while already present"
        );
        self.stack.push(Frame { node, flags: 0 });
    }

    /// Pops the top frame, applying any accumulated flags to the
    /// node's own flags field and returning the (possibly replaced)
    /// node the pass must install into its parent.
    pub fn pop(&mut self) -> LcNode {
        let frame = self.stack.pop().expect("pop on empty lexical context");
        match frame.node {
            LcNode::Block(block) if frame.flags != 0 => {
                let extra = BlockFlags::from_bits_truncate(frame.flags);
                LcNode::Block(Rc::new(block.with_flags(block.flags | extra)))
            }
            LcNode::Function(func) if frame.flags != 0 => {
                let extra = FunctionFlags::from_bits_truncate(frame.flags);
                let mut updated = (*func).clone();
                updated.flags |= extra;
                LcNode::Function(Rc::new(updated))
            }
            other => other,
        }
    }

    /// OR-accumulates `bits` onto the frame currently holding `node`
    /// (matched by identity), asserting it is present.
    pub fn set_flag(&mut self, node: &LcNode, bits: u32) {
        let frame = self
            .stack
            .iter_mut()
            .rev()
            .find(|f| f.node.identity_eq(node))
            .expect("setFlag on a node not present in the lexical context");
        frame.flags |= bits;
    }

    pub fn get_flags(&self, node: &LcNode) -> u32 {
        self.stack.iter().rev().find(|f| f.node.identity_eq(node)).map(|f| f.flags).unwrap_or(0)
    }

    /// Applies the top frame's accumulated flags into its node and
    /// returns the (possibly replaced) node, without popping —
    /// `leaveX` uses this mid-traversal.
    pub fn apply_top_flags(&self) -> LcNode {
        let frame = self.stack.last().expect("applyTopFlags on empty lexical context");
        match &frame.node {
            LcNode::Block(block) if frame.flags != 0 => {
                let extra = BlockFlags::from_bits_truncate(frame.flags);
                LcNode::Block(Rc::new(block.with_flags(block.flags | extra)))
            }
            LcNode::Function(func) if frame.flags != 0 => {
                let extra = FunctionFlags::from_bits_truncate(frame.flags);
                let mut updated = (**func).clone();
                updated.flags |= extra;
                LcNode::Function(Rc::new(updated))
            }
            other => other.clone(),
        }
    }

    /// Sets `NEEDS_SCOPE` on `block`'s frame and, atomically,
    /// `HAS_SCOPE_BLOCK` on the nearest enclosing function frame.
    pub fn set_block_needs_scope(&mut self, block: &LcNode) {
        self.set_flag(block, BlockFlags::NEEDS_SCOPE.bits());
        if let Some(func) = self.current_function_node() {
            self.set_flag(&func, FunctionFlags::HAS_SCOPE_BLOCK.bits());
        }
    }

    /// Swaps the top element, asserting `old` is the current top
    /// — used by the node-replacement-in-lexical-
    /// context protocol.
    pub fn replace(&mut self, old: &LcNode, new: LcNode) {
        let top = self.stack.last_mut().expect("replace on empty lexical context");
        assert!(top.node.identity_eq(old), "replace: `old` is not the top of the lexical context");
        top.node = new;
    }

    fn current_function_node(&self) -> Option<LcNode> {
        self.stack.iter().rev().find_map(|f| match &f.node {
            LcNode::Function(func) => Some(LcNode::Function(func.clone())),
            _ => None,
        })
    }

    pub fn current_function(&self) -> Option<Rc<Function>> {
        self.stack.iter().rev().find_map(|f| match &f.node {
            LcNode::Function(func) => Some(func.clone()),
            _ => None,
        })
    }

    pub fn outermost_function(&self) -> Option<Rc<Function>> {
        self.stack.iter().find_map(|f| match &f.node {
            LcNode::Function(func) => Some(func.clone()),
            _ => None,
        })
    }

    pub fn current_block(&self) -> Option<BlockRef> {
        self.stack.iter().rev().find_map(|f| match &f.node {
            LcNode::Block(block) => Some(block.clone()),
            _ => None,
        })
    }

    /// All enclosing blocks, nearest first — the scope chain a pass
    /// like `esc-scope`'s identifier resolution walks.
    pub fn blocks_inner_to_outer(&self) -> impl Iterator<Item = BlockRef> + '_ {
        self.stack.iter().rev().filter_map(|f| match &f.node {
            LcNode::Block(block) => Some(block.clone()),
            _ => None,
        })
    }

    /// All enclosing functions, nearest first, paired with the blocks
    /// strictly inside each one.
    pub fn functions_inner_to_outer(&self) -> impl Iterator<Item = Rc<Function>> + '_ {
        self.stack.iter().rev().filter_map(|f| match &f.node {
            LcNode::Function(func) => Some(func.clone()),
            _ => None,
        })
    }

    /// Every frame's node, nearest first, with no filtering — unlike
    /// `blocks_inner_to_outer`/`functions_inner_to_outer` this
    /// preserves the interleaving of Block/Function/Stmt frames, which
    /// is what a pass needs to notice "this lookup crossed a function
    /// boundary" while walking outward.
    pub fn ancestors_inner_to_outer(&self) -> impl Iterator<Item = LcNode> + '_ {
        self.stack.iter().rev().map(|f| f.node.clone())
    }

    pub fn parent_block(&self) -> Option<BlockRef> {
        let mut seen_first = false;
        self.stack.iter().rev().find_map(|f| match &f.node {
            LcNode::Block(block) => {
                if seen_first {
                    Some(block.clone())
                } else {
                    seen_first = true;
                    None
                }
            }
            _ => None,
        })
    }

    pub fn current_loop(&self) -> Option<Rc<LoopStatement>> {
        self.stack.iter().rev().find_map(|f| match &f.node {
            LcNode::Stmt(stmt) => match &**stmt {
                Stmt::Loop(l) => Some(Rc::new(l.clone())),
                _ => None,
            },
            _ => None,
        })
    }

    pub fn in_loop(&self) -> bool {
        self.current_loop().is_some()
    }

    /// Nearest unlabeled break target, or the matching labeled one.
    pub fn get_breakable(&self, label: Option<&str>) -> Option<StmtRef> {
        self.stack.iter().rev().find_map(|f| match &f.node {
            LcNode::Stmt(stmt) => match (&**stmt, label) {
                (Stmt::Label(l), Some(want)) if &*l.name == want => Some(stmt.clone()),
                (Stmt::Loop(_) | Stmt::Switch(_), None) => Some(stmt.clone()),
                _ => None,
            },
            _ => None,
        })
    }

    /// `getContinueTo`: continue resolves only to loops.
    pub fn get_continue_to(&self, label: Option<&str>) -> Option<StmtRef> {
        self.stack.iter().rev().find_map(|f| match &f.node {
            LcNode::Stmt(stmt) => match &**stmt {
                Stmt::Loop(l) if label.is_none_or(|want| &*l.continue_label == want) => Some(stmt.clone()),
                _ => None,
            },
            _ => None,
        })
    }

    pub fn get_inlined_finally(&self, label: &str) -> Option<BlockRef> {
        self.stack.iter().rev().find_map(|f| match &f.node {
            LcNode::Stmt(stmt) => match &**stmt {
                Stmt::Try(t) => t.get_inlined_finally(label).cloned(),
                _ => None,
            },
            _ => None,
        })
    }

    /// `inUnprotectedSwitchContext`: the current frame is a
    /// block whose parent is a switch.
    pub fn in_unprotected_switch_context(&self) -> bool {
        let mut last_was_block = false;
        for frame in self.stack.iter().rev() {
            match &frame.node {
                LcNode::Block(_) if !last_was_block => {
                    last_was_block = true;
                }
                LcNode::Stmt(stmt) if last_was_block => {
                    return matches!(&**stmt, Stmt::Switch(_));
                }
                _ => return false,
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::Block;
    use crate::flags::FunctionKind;
    use crate::node_id::{NodeId, NodeMeta};
    use crate::symbol::SymbolTable;
    use esc_token::{Token, TokenKind};

    fn block(id: u32, flags: BlockFlags) -> BlockRef {
        Rc::new(Block {
            id: NodeId(id),
            token: Token::synthetic(TokenKind::LBrace),
            finish: 0,
            statements: vec![],
            symbols: SymbolTable::new(),
            flags,
            entry_label: None,
            break_label: None,
        })
    }

    fn function(id: u32, flags: FunctionFlags, body: BlockRef) -> Rc<Function> {
        Rc::new(Function {
            meta: NodeMeta { id: NodeId(id), token: Token::synthetic(TokenKind::Function), finish: 0 },
            name: None,
            parameters: vec![],
            body,
            kind: FunctionKind::Normal,
            flags,
            compile_unit: None,
            return_type: None,
            self_symbol: None,
        })
    }

    #[test]
    fn set_block_needs_scope_is_atomic_with_enclosing_function() {
        let mut lc = LexicalContext::new();
        let b = block(1, BlockFlags::IS_BODY);
        let f = function(0, FunctionFlags::empty(), b.clone());
        lc.push(LcNode::Function(f.clone()));
        lc.push(LcNode::Block(b.clone()));

        lc.set_block_needs_scope(&LcNode::Block(b.clone()));

        let popped_block = lc.pop();
        let LcNode::Block(popped_block) = popped_block else { panic!("expected block") };
        assert!(popped_block.flags.contains(BlockFlags::NEEDS_SCOPE));

        let popped_fn = lc.pop();
        let LcNode::Function(popped_fn) = popped_fn else { panic!("expected function") };
        assert!(popped_fn.flags.contains(FunctionFlags::HAS_SCOPE_BLOCK));
    }

    #[test]
    #[should_panic(expected = "already present")]
    fn push_asserts_node_not_already_present() {
        let mut lc = LexicalContext::new();
        let b = block(1, BlockFlags::empty());
        lc.push(LcNode::Block(b.clone()));
        lc.push(LcNode::Block(b));
    }

    #[test]
    fn current_function_walks_to_nearest_enclosing() {
        let mut lc = LexicalContext::new();
        let b1 = block(1, BlockFlags::empty());
        let f = function(0, FunctionFlags::empty(), b1.clone());
        lc.push(LcNode::Function(f.clone()));
        lc.push(LcNode::Block(b1));
        assert!(lc.current_function().is_some());
        assert!(Rc::ptr_eq(&lc.current_function().unwrap(), &f));
    }
}
