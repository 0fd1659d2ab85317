//! `Runtime` node requests: the fallback "ask the runtime to do
//! this op" enum.

use esc_types::Type;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RuntimeRequest {
    Add,
    Eq,
    EqStrict,
    Ne,
    NeStrict,
    Lt,
    Le,
    Gt,
    Ge,
    In,
    Instanceof,
    IsUndefined,
    IsNotUndefined,
    Typeof,
    ReferenceError,
    New,
    Debugger,
    GetTemplateObject,
}

impl RuntimeRequest {
    /// The return type determined by the request.
    pub fn return_type(self) -> Type {
        use RuntimeRequest::*;
        match self {
            Add => Type::OBJECT,
            Eq | EqStrict | Ne | NeStrict | Lt | Le | Gt | Ge | In | Instanceof | IsUndefined | IsNotUndefined => {
                Type::BOOLEAN
            }
            Typeof => Type::STRING,
            ReferenceError | Debugger => Type::UNDEFINED,
            New | GetTemplateObject => Type::OBJECT,
        }
    }

    /// Reverses a comparison request (`a < b` <-> `b > a`), used when
    /// the codegen boundary prefers operands in a canonical order.
    pub fn reverse(self) -> Option<RuntimeRequest> {
        use RuntimeRequest::*;
        Some(match self {
            Lt => Gt,
            Gt => Lt,
            Le => Ge,
            Ge => Le,
            Eq => Eq,
            EqStrict => EqStrict,
            Ne => Ne,
            NeStrict => NeStrict,
            _ => return None,
        })
    }

    /// Inverts a comparison request (`a < b` <-> `!(a < b)` i.e. `a >= b`).
    pub fn invert(self) -> Option<RuntimeRequest> {
        use RuntimeRequest::*;
        Some(match self {
            Lt => Ge,
            Le => Gt,
            Gt => Le,
            Ge => Lt,
            Eq => Ne,
            Ne => Eq,
            EqStrict => NeStrict,
            NeStrict => EqStrict,
            IsUndefined => IsNotUndefined,
            IsNotUndefined => IsUndefined,
            _ => return None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reverse_and_invert_are_involutions_over_comparisons() {
        for req in [RuntimeRequest::Lt, RuntimeRequest::Le, RuntimeRequest::Gt, RuntimeRequest::Ge] {
            assert_eq!(req.reverse().and_then(RuntimeRequest::reverse), Some(req));
            assert_eq!(req.invert().and_then(RuntimeRequest::invert), Some(req));
        }
    }
}
