//! Statement node family.

use crate::block::BlockRef;
use crate::conversion::ConversionChain;
use crate::expr::ExprRef;
use crate::node_id::NodeMeta;
use crate::symbol::SymbolId;
use std::rc::Rc;

pub type StmtRef = Rc<Stmt>;

#[derive(Clone, Debug, PartialEq)]
pub struct ExpressionStatement {
    pub meta: NodeMeta,
    pub expression: ExprRef,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VarKind {
    Var,
    Let,
    Const,
}

#[derive(Clone, Debug, PartialEq)]
pub struct VarStatement {
    pub meta: NodeMeta,
    pub kind: VarKind,
    pub name: esc_common::Atom,
    pub symbol: Option<SymbolId>,
    pub init: Option<ExprRef>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct IfStatement {
    pub meta: NodeMeta,
    pub test: ExprRef,
    pub pass: StmtRef,
    pub fail: Option<StmtRef>,
    /// Join-predecessor conversion on the false-and-fallthrough edge.
    pub conversion: ConversionChain,
}

impl IfStatement {
    pub fn is_terminal(&self, pass_terminal: bool, fail_terminal: Option<bool>) -> bool {
        pass_terminal && fail_terminal.unwrap_or(false)
    }

    pub fn with_test(&self, test: ExprRef) -> IfStatement {
        if Rc::ptr_eq(&self.test, &test) {
            return self.clone();
        }
        IfStatement { test, ..self.clone() }
    }

    pub fn with_pass(&self, pass: StmtRef) -> IfStatement {
        if Rc::ptr_eq(&self.pass, &pass) {
            return self.clone();
        }
        IfStatement { pass, ..self.clone() }
    }

    pub fn with_fail(&self, fail: Option<StmtRef>) -> IfStatement {
        let unchanged = match (&self.fail, &fail) {
            (Some(a), Some(b)) => Rc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        };
        if unchanged {
            return self.clone();
        }
        IfStatement { fail, ..self.clone() }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CaseClause {
    pub meta: NodeMeta,
    /// `None` for the `default:` clause.
    pub test: Option<ExprRef>,
    pub body: Vec<StmtRef>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SwitchStatement {
    pub meta: NodeMeta,
    pub discriminant: ExprRef,
    pub cases: Vec<CaseClause>,
    /// `-1` if no `default:` clause is present.
    pub default_index: i32,
    pub tag_symbol: Option<SymbolId>,
    /// True iff every case test is an `INT` literal constant with no
    /// duplicates — the jump-table lowering prerequisite.
    pub unique_integer: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LoopForm {
    While,
    DoWhile,
    For,
    ForIn,
    ForOf,
    ForEach,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LoopStatement {
    pub meta: NodeMeta,
    pub form: LoopForm,
    pub init: Option<ExprRef>,
    /// `None` means an infinite loop (no test clause).
    pub test: Option<ExprRef>,
    pub update: Option<ExprRef>,
    pub body: StmtRef,
    pub continue_label: Rc<str>,
    pub break_label: Rc<str>,
    pub controls_flow_escapes: bool,
    pub conversion: ConversionChain,
    pub iterator_symbol: Option<SymbolId>,
    pub per_iteration_scope: bool,
}

impl LoopStatement {
    /// `mustEnter()`: do-while always; `while` with no test
    /// always; `for` without a test always; for-in/for-of/for-each
    /// never (the iterable may be empty).
    pub fn must_enter(&self) -> bool {
        match self.form {
            LoopForm::DoWhile => true,
            LoopForm::While | LoopForm::For => self.test.is_none(),
            LoopForm::ForIn | LoopForm::ForOf | LoopForm::ForEach => false,
        }
    }

    /// For-in-or-of with a per-iteration scope needs a scope creator.
    pub fn needs_scope_creator(&self) -> bool {
        matches!(self.form, LoopForm::ForIn | LoopForm::ForOf) && self.per_iteration_scope
    }

    pub fn with_body(&self, body: StmtRef) -> LoopStatement {
        if Rc::ptr_eq(&self.body, &body) {
            return self.clone();
        }
        LoopStatement { body, ..self.clone() }
    }

    pub fn with_test(&self, test: Option<ExprRef>) -> LoopStatement {
        let unchanged = match (&self.test, &test) {
            (Some(a), Some(b)) => Rc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        };
        if unchanged {
            return self.clone();
        }
        LoopStatement { test, ..self.clone() }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum CatchParameter {
    Ident(esc_common::Atom),
    ArrayPattern(Vec<esc_common::Atom>),
    ObjectPattern(Vec<esc_common::Atom>),
}

#[derive(Clone, Debug, PartialEq)]
pub struct CatchClause {
    pub meta: NodeMeta,
    pub parameter: CatchParameter,
    pub condition: Option<ExprRef>,
    pub body: BlockRef,
    /// Auto-generated catch-all around an inlined finally: the thrown
    /// value must not be wrapped/unwrapped.
    pub is_synthetic_rethrow: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct InlinedFinally {
    pub label: Rc<str>,
    pub body: BlockRef,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TryStatement {
    pub meta: NodeMeta,
    pub body: BlockRef,
    pub catches: Vec<CatchClause>,
    pub finally_body: Option<BlockRef>,
    pub inlined_finallies: Vec<InlinedFinally>,
}

impl TryStatement {
    /// `getInlinedFinally(label)`: returns the body inside the
    /// label with the given name, if any.
    pub fn get_inlined_finally(&self, label: &str) -> Option<&BlockRef> {
        self.inlined_finallies.iter().find(|f| &*f.label == label).map(|f| &f.body)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ThrowStatement {
    pub meta: NodeMeta,
    pub argument: ExprRef,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ReturnStatement {
    pub meta: NodeMeta,
    pub argument: Option<ExprRef>,
    pub is_yield: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct BreakStatement {
    pub meta: NodeMeta,
    pub label: Option<Rc<str>>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ContinueStatement {
    pub meta: NodeMeta,
    pub label: Option<Rc<str>>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LabelStatement {
    pub meta: NodeMeta,
    pub name: Rc<str>,
    pub body: StmtRef,
}

#[derive(Clone, Debug, PartialEq)]
pub struct BlockStatement {
    pub meta: NodeMeta,
    pub block: BlockRef,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Stmt {
    Expression(ExpressionStatement),
    Var(VarStatement),
    If(IfStatement),
    Switch(SwitchStatement),
    Loop(LoopStatement),
    Try(TryStatement),
    Throw(ThrowStatement),
    Return(ReturnStatement),
    Break(BreakStatement),
    Continue(ContinueStatement),
    Block(BlockStatement),
    Label(LabelStatement),
}

impl Stmt {
    pub fn meta(&self) -> &NodeMeta {
        match self {
            Stmt::Expression(n) => &n.meta,
            Stmt::Var(n) => &n.meta,
            Stmt::If(n) => &n.meta,
            Stmt::Switch(n) => &n.meta,
            Stmt::Loop(n) => &n.meta,
            Stmt::Try(n) => &n.meta,
            Stmt::Throw(n) => &n.meta,
            Stmt::Return(n) => &n.meta,
            Stmt::Break(n) => &n.meta,
            Stmt::Continue(n) => &n.meta,
            Stmt::Block(n) => &n.meta,
            Stmt::Label(n) => &n.meta,
        }
    }

    /// `Throw`/`Return` are always terminal; `Label`/`Block` defer to
    /// their body. `If`/loop/switch terminality depends on
    /// nested analysis done by the pass that owns control-flow facts,
    /// so this conservative check only covers the unconditionally
    /// terminal node kinds plus simple pass-through wrappers.
    pub fn is_terminal(&self) -> bool {
        match self {
            Stmt::Throw(_) | Stmt::Return(_) | Stmt::Break(_) | Stmt::Continue(_) => true,
            Stmt::Label(n) => n.body.is_terminal(),
            Stmt::Block(n) => n.block.is_terminal(),
            _ => false,
        }
    }
}
