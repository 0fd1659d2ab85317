//! Expression node family.
//!
//! Nodes are reached through [`ExprRef`] (`Rc<Expr>`): cloning a
//! reference is a refcount bump, and the copy-with-field-setters
//! protocol compares the *old* `Rc` against the
//! *new* one with `Rc::ptr_eq` to decide whether to return the
//! original node or allocate a replacement.

use crate::conversion::ConversionChain;
use crate::function::Function;
use crate::node_id::NodeId;
pub use crate::node_id::NodeMeta;
use crate::program_point::ProgramPoint;
use crate::runtime_request::RuntimeRequest;
use crate::symbol::SymbolId;
use esc_token::{Token, TokenKind};
use esc_types::Type;
use std::rc::Rc;

pub type ExprRef = Rc<Expr>;

#[derive(Clone, Debug, PartialEq)]
pub enum Literal {
    Null,
    Undefined,
    Boolean(bool),
    Number(f64),
    String(Rc<str>),
    /// A literal whose precise value is deferred to the lexer token
    /// that produced it (e.g. a numeric literal parsed lazily).
    LexerToken(Token),
    Array(ArrayLiteral),
}

#[derive(Clone, Debug, PartialEq)]
pub struct ArrayLiteral {
    pub elements: Vec<Option<ExprRef>>,
    /// Precomputed widest-of-elements type; boolean collapses to
    /// `OBJECT`.
    pub element_type: Type,
    /// Indices whose value must be evaluated at runtime rather than
    /// folded into `presets`.
    pub postsets: Vec<u32>,
    pub initialized: bool,
}

impl ArrayLiteral {
    pub fn compute_element_type(elements: &[Option<ExprRef>], literal_type: impl Fn(&Expr) -> Type) -> Type {
        let mut ty = Type::UNKNOWN;
        for el in elements.iter().flatten() {
            let el_ty = literal_type(el);
            let el_ty = if el_ty.is_boolean() { Type::OBJECT } else { el_ty };
            ty = Type::widest(ty, el_ty);
        }
        ty
    }

    /// The preset array's element `Type`: `INT_ARRAY`, `NUMBER_ARRAY`,
    /// or `OBJECT_ARRAY`, chosen per `element_type`.
    pub fn preset_array_type(&self) -> Type {
        match self.element_type {
            Type::INT => Type::INT_ARRAY,
            Type::NUMBER | Type::LONG => Type::NUMBER_ARRAY,
            _ => Type::OBJECT_ARRAY,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct LiteralExpr {
    pub meta: NodeMeta,
    pub value: Literal,
}

impl LiteralExpr {
    /// `isAlwaysTrue`/`isAlwaysFalse` collapse to this for primitives
    /// with a statically-known truthiness.
    pub fn is_always_true(&self) -> Option<bool> {
        match &self.value {
            Literal::Boolean(b) => Some(*b),
            Literal::Number(n) => Some(esc_common::numeric::number_to_boolean(*n)),
            Literal::String(s) => Some(esc_common::numeric::string_to_boolean(s)),
            Literal::Null | Literal::Undefined => Some(false),
            _ => None,
        }
    }

    pub fn get_type(&self) -> Type {
        match &self.value {
            Literal::Null => Type::OBJECT,
            Literal::Undefined => Type::UNDEFINED,
            Literal::Boolean(_) => Type::BOOLEAN,
            Literal::Number(_) => Type::NUMBER,
            Literal::String(_) => Type::STRING,
            Literal::LexerToken(tok) => match tok.kind() {
                TokenKind::NumericLiteral => Type::NUMBER,
                _ => Type::STRING,
            },
            Literal::Array(_) => Type::OBJECT_ARRAY,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct IdentExpr {
    pub meta: NodeMeta,
    pub name: esc_common::Atom,
    pub symbol: Option<SymbolId>,
    pub is_function: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct AccessExpr {
    pub meta: NodeMeta,
    pub base: ExprRef,
    pub property: esc_common::Atom,
    pub is_function: bool,
    pub is_super: bool,
    pub program_point: ProgramPoint,
    pub pinned_type: Option<Type>,
}

impl AccessExpr {
    pub fn get_type(&self) -> Type {
        self.pinned_type.unwrap_or(Type::OBJECT)
    }

    pub fn with_base(&self, base: ExprRef) -> AccessExpr {
        if Rc::ptr_eq(&self.base, &base) {
            return self.clone();
        }
        AccessExpr { base, ..self.clone() }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct IndexExpr {
    pub meta: NodeMeta,
    pub base: ExprRef,
    pub index: ExprRef,
    pub is_function: bool,
    pub is_super: bool,
    pub program_point: ProgramPoint,
    pub pinned_type: Option<Type>,
}

impl IndexExpr {
    pub fn get_type(&self) -> Type {
        self.pinned_type.unwrap_or(Type::OBJECT)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CallExpr {
    pub meta: NodeMeta,
    pub callee: ExprRef,
    pub args: Vec<ExprRef>,
    pub is_new: bool,
    pub is_apply_to_call: bool,
    /// Present iff the callee is literally the identifier `eval`.
    pub eval_args: Option<Vec<ExprRef>>,
    pub program_point: ProgramPoint,
    pub pinned_type: Option<Type>,
}

impl CallExpr {
    pub fn most_optimistic_type(&self) -> Type {
        Type::INT
    }

    pub fn most_pessimistic_type(&self) -> Type {
        Type::OBJECT
    }

    pub fn can_be_optimistic(&self) -> bool {
        self.program_point.is_valid()
    }

    pub fn get_type(&self) -> Type {
        self.pinned_type.unwrap_or(Type::OBJECT)
    }

    pub fn with_args(&self, args: Vec<ExprRef>) -> CallExpr {
        if args.len() == self.args.len() && args.iter().zip(&self.args).all(|(a, b)| Rc::ptr_eq(a, b)) {
            return self.clone();
        }
        CallExpr { args, ..self.clone() }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Add,
    Sub,
    Not,
    Delete,
    BitNot,
    Void,
    Typeof,
    PreIncrement,
    PreDecrement,
    PostIncrement,
    PostDecrement,
}

#[derive(Clone, Debug, PartialEq)]
pub struct UnaryExpr {
    pub meta: NodeMeta,
    pub op: UnaryOp,
    pub operand: ExprRef,
    pub program_point: ProgramPoint,
    pub pinned_type: Option<Type>,
}

impl UnaryExpr {
    /// Widest-operation type rules.
    pub fn most_pessimistic_type(&self, operand_type: Type) -> Type {
        match self.op {
            UnaryOp::Add if operand_type.is_boolean() => Type::INT,
            UnaryOp::Add if operand_type.is_object() => Type::NUMBER,
            UnaryOp::Add if operand_type.is_numeric() => operand_type,
            UnaryOp::Add => Type::NUMBER,
            UnaryOp::Sub => Type::NUMBER,
            UnaryOp::Not | UnaryOp::Delete => Type::BOOLEAN,
            UnaryOp::BitNot => Type::INT,
            UnaryOp::Void => Type::UNDEFINED,
            UnaryOp::Typeof => Type::STRING,
            UnaryOp::PreIncrement | UnaryOp::PreDecrement | UnaryOp::PostIncrement | UnaryOp::PostDecrement => {
                Type::NUMBER
            }
        }
    }

    pub fn most_optimistic_type(&self, operand_type: Type) -> Type {
        match self.op {
            UnaryOp::PreIncrement | UnaryOp::PreDecrement | UnaryOp::PostIncrement | UnaryOp::PostDecrement => {
                Type::INT
            }
            UnaryOp::Add | UnaryOp::Sub => Type::INT,
            _ => self.most_pessimistic_type(operand_type),
        }
    }

    /// `canBeOptimistic` iff most-optimistic != most-pessimistic.
    pub fn can_be_optimistic(&self, operand_type: Type) -> bool {
        self.most_optimistic_type(operand_type) != self.most_pessimistic_type(operand_type)
    }

    pub fn get_type(&self, operand_type: Type) -> Type {
        let widest = self.most_pessimistic_type(operand_type);
        match self.pinned_type {
            Some(pinned) => Type::narrowest(widest, Type::widest(pinned, operand_type)),
            None => widest,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    ShiftLeft,
    ShiftRight,
    UnsignedShiftRight,
    BitAnd,
    BitOr,
    BitXor,
    Instanceof,
    In,
    Assign,
    Comma,
    And,
    Or,
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
    Ne,
    EqStrict,
    NeStrict,
}

impl BinaryOp {
    pub fn is_comparison(self) -> bool {
        matches!(
            self,
            BinaryOp::Lt | BinaryOp::Le | BinaryOp::Gt | BinaryOp::Ge | BinaryOp::Eq | BinaryOp::Ne | BinaryOp::EqStrict | BinaryOp::NeStrict
        )
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct BinaryExpr {
    pub meta: NodeMeta,
    pub op: BinaryOp,
    pub lhs: ExprRef,
    pub rhs: ExprRef,
    pub pinned_type: Option<Type>,
    pub program_point: ProgramPoint,
}

impl BinaryExpr {
    pub fn with_lhs(&self, lhs: ExprRef) -> BinaryExpr {
        if Rc::ptr_eq(&self.lhs, &lhs) {
            return self.clone();
        }
        BinaryExpr { lhs, ..self.clone() }
    }

    pub fn with_rhs(&self, rhs: ExprRef) -> BinaryExpr {
        if Rc::ptr_eq(&self.rhs, &rhs) {
            return self.clone();
        }
        BinaryExpr { rhs, ..self.clone() }
    }

    pub fn with_pinned_type(&self, pinned_type: Option<Type>) -> BinaryExpr {
        if self.pinned_type == pinned_type {
            return self.clone();
        }
        BinaryExpr { pinned_type, ..self.clone() }
    }

    /// `true` until both operand types are known for `+`/`+=`: ADD's type is undecided until `decide_type` resolves it.
    pub fn is_add_undecided(&self) -> bool {
        self.op == BinaryOp::Add
    }

    /// `decideType`: resolves an optimistic
    /// ADD's type once both operand types are finalized.
    pub fn decide_type(lhs: Type, rhs: Type) -> Type {
        if lhs == Type::STRING || lhs == Type::CHARSEQUENCE || rhs == Type::STRING || rhs == Type::CHARSEQUENCE {
            return Type::CHARSEQUENCE;
        }
        let lhs = if lhs.is_boolean() { Type::INT } else if lhs == Type::UNDEFINED { Type::NUMBER } else { lhs };
        let rhs = if rhs.is_boolean() { Type::INT } else if rhs == Type::UNDEFINED { Type::NUMBER } else { rhs };
        if lhs.is_object() || rhs.is_object() {
            return Type::OBJECT;
        }
        // Conservatively widened past the operands' own width to NUMBER:
        // an INT+INT result that overflows its width would otherwise
        // immediately re-deopt, defeating the point of resolving ADD here.
        Type::widest(Type::NUMBER, Type::widest(lhs, rhs))
    }

    /// Widest-operation type by operator, given already-computed
    /// operand types. For `Add` this is the pessimistic view: callers
    /// needing the optimistic-undecided behavior use [`Self::decide_type`].
    pub fn most_pessimistic_type(&self, lhs_type: Type, rhs_type: Type) -> Type {
        use BinaryOp::*;
        match self.op {
            Add => {
                if lhs_type == Type::STRING || rhs_type == Type::STRING {
                    Type::CHARSEQUENCE
                } else if lhs_type.is_boolean() && rhs_type.is_boolean() {
                    Type::INT
                } else if lhs_type.is_numeric() && rhs_type.is_numeric() {
                    Type::NUMBER
                } else {
                    Type::OBJECT
                }
            }
            UnsignedShiftRight => Type::NUMBER,
            ShiftLeft | ShiftRight | BitAnd | BitOr | BitXor => Type::INT,
            Div | Rem => Type::NUMBER,
            Mul | Sub => {
                if lhs_type.is_boolean() && rhs_type.is_boolean() {
                    Type::INT
                } else {
                    Type::NUMBER
                }
            }
            Instanceof => Type::BOOLEAN,
            Lt | Le | Gt | Ge | Eq | Ne | EqStrict | NeStrict | In => Type::BOOLEAN,
            Assign => rhs_type,
            Comma => rhs_type,
            And | Or => Type::widest_return_type(lhs_type, rhs_type),
        }
    }

    pub fn most_optimistic_type(&self, lhs_type: Type, rhs_type: Type) -> Type {
        use BinaryOp::*;
        match self.op {
            Add | Sub | Mul | ShiftLeft | BitAnd | BitOr | BitXor => Type::INT,
            _ => self.most_pessimistic_type(lhs_type, rhs_type),
        }
    }

    /// `canBeOptimistic`: differs between optimistic/pessimistic,
    /// or is an undecided ADD.
    pub fn can_be_optimistic(&self, lhs_type: Type, rhs_type: Type) -> bool {
        self.is_add_undecided() || self.most_optimistic_type(lhs_type, rhs_type) != self.most_pessimistic_type(lhs_type, rhs_type)
    }

    pub fn get_type(&self, lhs_type: Type, rhs_type: Type) -> Type {
        if self.is_add_undecided() {
            return Self::decide_type(lhs_type, rhs_type);
        }
        let widest = self.most_pessimistic_type(lhs_type, rhs_type);
        match self.pinned_type {
            Some(pinned) => {
                let narrowed = Type::narrowest(widest, Type::widest(pinned, Type::widest(lhs_type, rhs_type)));
                narrowed
            }
            None => widest,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TernaryExpr {
    pub meta: NodeMeta,
    pub test: ExprRef,
    pub then_branch: ExprRef,
    pub else_branch: ExprRef,
}

impl TernaryExpr {
    pub fn get_type(&self, then_type: Type, else_type: Type) -> Type {
        Type::widest_return_type(then_type, else_type)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct JoinPredecessorExpr {
    pub meta: NodeMeta,
    pub expression: ExprRef,
    pub conversion: ConversionChain,
}

impl JoinPredecessorExpr {
    pub fn with_conversion(&self, conversion: ConversionChain) -> JoinPredecessorExpr {
        if self.conversion == conversion {
            return self.clone();
        }
        JoinPredecessorExpr { conversion, ..self.clone() }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RuntimeExpr {
    pub meta: NodeMeta,
    pub request: RuntimeRequest,
    pub args: Vec<ExprRef>,
}

impl RuntimeExpr {
    pub fn get_type(&self) -> Type {
        self.request.return_type()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ErrorExpr {
    pub meta: NodeMeta,
    pub message: Rc<str>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Literal(LiteralExpr),
    Ident(IdentExpr),
    Access(AccessExpr),
    Index(IndexExpr),
    Call(CallExpr),
    Unary(UnaryExpr),
    Binary(BinaryExpr),
    Ternary(TernaryExpr),
    JoinPredecessor(JoinPredecessorExpr),
    Runtime(RuntimeExpr),
    Error(ErrorExpr),
    Function(Rc<Function>),
}

impl Expr {
    pub fn meta(&self) -> &NodeMeta {
        match self {
            Expr::Literal(n) => &n.meta,
            Expr::Ident(n) => &n.meta,
            Expr::Access(n) => &n.meta,
            Expr::Index(n) => &n.meta,
            Expr::Call(n) => &n.meta,
            Expr::Unary(n) => &n.meta,
            Expr::Binary(n) => &n.meta,
            Expr::Ternary(n) => &n.meta,
            Expr::JoinPredecessor(n) => &n.meta,
            Expr::Runtime(n) => &n.meta,
            Expr::Error(n) => &n.meta,
            Expr::Function(f) => &f.meta,
        }
    }

    pub fn id(&self) -> NodeId {
        self.meta().id
    }

    /// Debug renderer.
    pub fn to_debug_string(&self) -> String {
        match self {
            Expr::Literal(n) => format!("{:?}", n.value),
            Expr::Ident(n) => format!("ident#{:?}", n.name),
            Expr::Access(n) => format!("{}.<prop>", n.base.to_debug_string()),
            Expr::Index(n) => format!("{}[{}]", n.base.to_debug_string(), n.index.to_debug_string()),
            Expr::Call(n) => format!(
                "{}{}({})",
                if n.is_new { "new " } else { "" },
                n.callee.to_debug_string(),
                n.args.iter().map(|a| a.to_debug_string()).collect::<Vec<_>>().join(", ")
            ),
            Expr::Unary(n) => format!("{:?}({})", n.op, n.operand.to_debug_string()),
            Expr::Binary(n) => format!("({} {:?} {})", n.lhs.to_debug_string(), n.op, n.rhs.to_debug_string()),
            Expr::Ternary(n) => format!(
                "({} ? {} : {})",
                n.test.to_debug_string(),
                n.then_branch.to_debug_string(),
                n.else_branch.to_debug_string()
            ),
            Expr::JoinPredecessor(n) => n.expression.to_debug_string(),
            Expr::Runtime(n) => format!("{:?}({})", n.request, n.args.iter().map(|a| a.to_debug_string()).collect::<Vec<_>>().join(", ")),
            Expr::Error(n) => format!("<error: {}>", n.message),
            Expr::Function(f) => format!("function {}", f.name_or_anonymous()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta(id: u32) -> NodeMeta {
        NodeMeta { id: NodeId(id), token: Token::synthetic(TokenKind::Identifier), finish: 0 }
    }

    fn lit(id: u32, n: f64) -> ExprRef {
        Rc::new(Expr::Literal(LiteralExpr { meta: meta(id), value: Literal::Number(n) }))
    }

    #[test]
    fn with_lhs_returns_same_instance_when_unchanged() {
        let lhs = lit(0, 1.0);
        let rhs = lit(1, 2.0);
        let bin = BinaryExpr { meta: meta(2), op: BinaryOp::Add, lhs: lhs.clone(), rhs: rhs.clone(), pinned_type: None, program_point: ProgramPoint::INVALID };
        let same = bin.with_lhs(lhs.clone());
        assert!(Rc::ptr_eq(&same.lhs, &lhs));
        assert!(Rc::ptr_eq(&same.rhs, &rhs));

        let other = lit(3, 3.0);
        let replaced = bin.with_lhs(other.clone());
        assert!(Rc::ptr_eq(&replaced.lhs, &other));
        assert!(Rc::ptr_eq(&replaced.rhs, &rhs), "unrelated field must be untouched");
    }

    #[test]
    fn unary_pinned_type_does_not_narrow_past_the_operand_widened_bound() {
        let unary =
            UnaryExpr { meta: meta(0), op: UnaryOp::Sub, operand: lit(1, 1.0), program_point: ProgramPoint::INVALID, pinned_type: Some(Type::INT) };
        assert_eq!(unary.get_type(Type::NUMBER), Type::NUMBER, "pinned INT can't narrow below the NUMBER operand's own widest result");
    }

    #[test]
    fn unary_pinned_type_narrows_when_operand_already_fits() {
        let unary =
            UnaryExpr { meta: meta(0), op: UnaryOp::Sub, operand: lit(1, 1.0), program_point: ProgramPoint::INVALID, pinned_type: Some(Type::INT) };
        assert_eq!(unary.get_type(Type::INT), Type::INT);
    }

    #[test]
    fn optimistic_add_decides_string_concat_vs_numeric_widening() {
        assert_eq!(BinaryExpr::decide_type(Type::INT, Type::STRING), Type::CHARSEQUENCE);
        assert_eq!(BinaryExpr::decide_type(Type::INT, Type::INT), Type::NUMBER);
        assert_eq!(BinaryExpr::decide_type(Type::OBJECT, Type::INT), Type::OBJECT);
    }

    #[test]
    fn array_literal_element_type_collapses_boolean_to_object() {
        let elems = vec![Some(Rc::new(Expr::Literal(LiteralExpr { meta: meta(0), value: Literal::Boolean(true) })))];
        let ty = ArrayLiteral::compute_element_type(&elems, |e| match e {
            Expr::Literal(l) => l.get_type(),
            _ => Type::OBJECT,
        });
        assert_eq!(ty, Type::OBJECT);
    }
}
