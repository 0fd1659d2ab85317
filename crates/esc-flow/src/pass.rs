//! The flow pass: a `Visitor` that installs loop/switch/try
//! control facts and join-predecessor conversions.

use crate::label::LabelAllocator;
use crate::switch;
use crate::types::{self, TypeEnv};
use esc_ir::{
    BreakStatement, CaseClause, ContinueStatement, Function, IfStatement, InlinedFinally, LcNode, LexicalContext,
    LocalVariableConversion, LoopStatement, NodeId, Stmt, StmtRef, SwitchStatement, SymbolIdAllocator, TryStatement,
    Visitor, walk_function,
};
use esc_types::Type;
use rustc_hash::FxHashMap;
use std::rc::Rc;
use tracing::{Level, span};

/// A `break`/`continue` whose target lies outside the nearest
/// enclosing `try`/`finally` it is lexically inside — the codegen
/// stage (out of scope here) must route execution through that
/// `try`'s inlined finally label before actually exiting.
#[derive(Clone, Debug)]
pub struct RoutedExit {
    pub label: Rc<str>,
    pub stmt: StmtRef,
}

pub struct FlowPass {
    labels: LabelAllocator,
    next_symbol: SymbolIdAllocator,
    try_labels: FxHashMap<NodeId, Rc<str>>,
    pub routed_exits: Vec<RoutedExit>,
}

impl FlowPass {
    pub fn new() -> Self {
        FlowPass { labels: LabelAllocator::new(), next_symbol: SymbolIdAllocator::new(), try_labels: FxHashMap::default(), routed_exits: Vec::new() }
    }

    pub fn run(&mut self, func: Rc<Function>) -> Rc<Function> {
        let _span = span!(Level::DEBUG, "flow_pass", function = func.meta.id.0).entered();
        let mut lc = LexicalContext::new();
        walk_function(self, &mut lc, func)
    }

    /// The nearest enclosing `try`/`finally` statement lexically between
    /// the current position and `target` (exclusive of `target` itself),
    /// or `None` if `target` is reached first.
    fn nearest_crossed_try(lc: &LexicalContext, target: &StmtRef) -> Option<StmtRef> {
        for node in lc.ancestors_inner_to_outer() {
            if let LcNode::Stmt(s) = node {
                if Rc::ptr_eq(&s, target) {
                    return None;
                }
                if let Stmt::Try(t) = &*s {
                    if t.finally_body.is_some() {
                        return Some(s);
                    }
                }
            }
        }
        None
    }

    /// Join-predecessor conversions for a two-edge `If`: each
    /// branch's effect is simulated independently from a blank type
    /// environment, and any symbol whose estimated type differs
    /// between branches gets a conversion from the fail/fallthrough
    /// edge's type up to the widened type, attached to the `If` node's
    /// own `conversion` field (the edge the data model exposes).
    fn if_conversions(n: &IfStatement) -> esc_ir::ConversionChain {
        let mut pass_env = TypeEnv::default();
        types::apply_stmt(&n.pass, &mut pass_env);
        let mut fail_env = TypeEnv::default();
        if let Some(fail) = &n.fail {
            types::apply_stmt(fail, &mut fail_env);
        }

        let mut chain = esc_ir::ConversionChain::new();
        for (symbol, &pass_ty) in &pass_env {
            let fail_ty = fail_env.get(symbol).copied().unwrap_or(Type::UNKNOWN);
            if pass_ty == fail_ty {
                continue;
            }
            let widened = Type::widest(pass_ty, fail_ty);
            if fail_ty != widened {
                chain.push(LocalVariableConversion { symbol: *symbol, from: fail_ty, to: widened });
            }
        }
        chain
    }
}

impl Default for FlowPass {
    fn default() -> Self {
        Self::new()
    }
}

impl Visitor for FlowPass {
    fn enter_stmt(&mut self, _lc: &mut LexicalContext, stmt: &StmtRef) -> bool {
        if let Stmt::Try(n) = &**stmt {
            if n.finally_body.is_some() {
                self.try_labels.entry(n.meta.id).or_insert_with(|| self.labels.next());
            }
        }
        true
    }

    fn leave_stmt(&mut self, lc: &mut LexicalContext, stmt: StmtRef) -> StmtRef {
        match &*stmt {
            Stmt::If(n) => {
                let conversion = Self::if_conversions(n);
                if conversion == n.conversion {
                    stmt
                } else {
                    Rc::new(Stmt::If(IfStatement { conversion, ..n.clone() }))
                }
            }
            Stmt::Loop(n) => {
                let continue_label = if n.continue_label.is_empty() { self.labels.next() } else { n.continue_label.clone() };
                let break_label = if n.break_label.is_empty() { self.labels.next() } else { n.break_label.clone() };
                if Rc::ptr_eq(&continue_label, &n.continue_label) && Rc::ptr_eq(&break_label, &n.break_label) {
                    stmt
                } else {
                    Rc::new(Stmt::Loop(LoopStatement { continue_label, break_label, ..n.clone() }))
                }
            }
            Stmt::Switch(n) => {
                let tag_symbol = n.tag_symbol.or_else(|| Some(self.next_symbol.next()));
                let unique_integer = switch::compute_unique_integer(&n.cases);
                let default_index = n.cases.iter().position(|c: &CaseClause| c.test.is_none()).map(|i| i as i32).unwrap_or(-1);
                if tag_symbol == n.tag_symbol && unique_integer == n.unique_integer && default_index == n.default_index {
                    stmt
                } else {
                    Rc::new(Stmt::Switch(SwitchStatement { tag_symbol, unique_integer, default_index, ..n.clone() }))
                }
            }
            Stmt::Try(n) if n.finally_body.is_some() => {
                let label = self.try_labels.get(&n.meta.id).cloned().unwrap_or_else(|| self.labels.next());
                if n.inlined_finallies.iter().any(|f| f.label == label) {
                    stmt
                } else {
                    let mut inlined_finallies = n.inlined_finallies.clone();
                    inlined_finallies.push(InlinedFinally { label, body: n.finally_body.clone().unwrap() });
                    Rc::new(Stmt::Try(TryStatement { inlined_finallies, ..n.clone() }))
                }
            }
            Stmt::Break(BreakStatement { label, .. }) => {
                if let Some(target) = lc.get_breakable(label.as_deref()) {
                    if let Some(crossed) = Self::nearest_crossed_try(lc, &target) {
                        if let Stmt::Try(t) = &*crossed {
                            if let Some(finally_label) = self.try_labels.get(&t.meta.id) {
                                self.routed_exits.push(RoutedExit { label: finally_label.clone(), stmt: stmt.clone() });
                            }
                        }
                    }
                }
                stmt
            }
            Stmt::Continue(ContinueStatement { label, .. }) => {
                if let Some(target) = lc.get_continue_to(label.as_deref()) {
                    if let Some(crossed) = Self::nearest_crossed_try(lc, &target) {
                        if let Stmt::Try(t) = &*crossed {
                            if let Some(finally_label) = self.try_labels.get(&t.meta.id) {
                                self.routed_exits.push(RoutedExit { label: finally_label.clone(), stmt: stmt.clone() });
                            }
                        }
                    }
                }
                stmt
            }
            _ => stmt,
        }
    }
}
