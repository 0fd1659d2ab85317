//! Numeric/object conversion policy. The actual
//! instruction emission is delegated to the `BytecodeOps` sink; this
//! module only decides *whether* a conversion is legal and which
//! `StackType` pair to hand the sink.

use crate::lattice::Type;
use esc_abi::BytecodeOps;
use esc_common::diagnostics::DiagnosticCategory;
use esc_common::{Diagnostic, Span};

/// Emits `ops.convert(from, to)` if the conversion is legal for the
/// representations involved, otherwise returns an
/// `UnsupportedOperation` diagnostic.
pub fn convert(ops: &mut dyn BytecodeOps, from: Type, to: Type, span: Span) -> Result<(), Diagnostic> {
    if from == to {
        return Ok(());
    }
    if from == Type::UNKNOWN || to == Type::UNKNOWN || from == Type::SLOT_2 || to == Type::SLOT_2 {
        return Err(unsupported(from, to, span));
    }
    let (Some(from_st), Some(to_st)) = (from.get_bytecode_stack_type(), to.get_bytecode_stack_type()) else {
        return Err(unsupported(from, to, span));
    };
    ops.convert(from_st, to_st);
    Ok(())
}

fn unsupported(from: Type, to: Type, span: Span) -> Diagnostic {
    Diagnostic::new(
        DiagnosticCategory::UnsupportedOperation,
        "unsupported.conversion",
        String::new(),
        span,
        format!("cannot convert {from:?} to {to:?}"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use esc_abi::RecordingBytecodeOps;

    #[test]
    fn converts_between_numeric_and_object() {
        let mut ops = RecordingBytecodeOps::default();
        convert(&mut ops, Type::INT, Type::NUMBER, Span::dummy()).unwrap();
        convert(&mut ops, Type::NUMBER, Type::OBJECT, Span::dummy()).unwrap();
        assert_eq!(ops.instructions, vec!["convert I -> D", "convert D -> A"]);
    }

    #[test]
    fn rejects_unknown_and_slot2() {
        let mut ops = RecordingBytecodeOps::default();
        assert!(convert(&mut ops, Type::UNKNOWN, Type::INT, Span::dummy()).is_err());
        assert!(convert(&mut ops, Type::SLOT_2, Type::INT, Span::dummy()).is_err());
    }

    #[test]
    fn same_type_conversion_is_a_no_op() {
        let mut ops = RecordingBytecodeOps::default();
        convert(&mut ops, Type::INT, Type::INT, Span::dummy()).unwrap();
        assert!(ops.instructions.is_empty());
    }
}
