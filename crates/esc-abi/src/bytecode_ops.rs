//! `BytecodeOps` — the instruction sink the compiler core emits into.
//! The concrete target instruction set is deliberately out of scope
//!; the core only needs this trait.

use crate::stack_type::StackType;

/// A compile-time constant value the codegen backend can load via
/// `ldc`-equivalent. Mirrors the handful of literal kinds the IR's
/// `Literal<T>` family can hold.
#[derive(Clone, Debug, PartialEq)]
pub enum ConstantValue {
    Int(i32),
    Long(i64),
    Double(f64),
    Str(String),
    Bool(bool),
}

/// Arithmetic operators accepted by `BytecodeOps::arithmetic`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArithmeticOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Neg,
}

/// Comparison flavor: `cmpg` pushes 1 when either operand is NaN,
/// `cmpl` pushes -1 — the two variants the JVM-style `fcmpg`/`fcmpl`
/// distinction requires for correct `<`/`<=` vs `>`/`>=` lowering.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompareMode {
    Cmpg,
    Cmpl,
}

/// Abstract sink for the instructions the compiler core's codegen
/// boundary emits. A concrete backend (bytecode emitter, interpreter,
/// textual dumper for tests) implements this; the core never
/// references concrete opcodes.
pub trait BytecodeOps {
    fn load_slot(&mut self, slot: u32, ty: StackType);
    fn store_slot(&mut self, slot: u32, ty: StackType);
    fn ldc(&mut self, value: ConstantValue);
    fn load_undefined(&mut self);
    /// Load a forced initializer value for a `let`/`const` binding
    /// observed before its temporal-dead-zone initialization completes.
    fn load_forced_initializer(&mut self);
    fn arithmetic(&mut self, op: ArithmeticOp, ty: StackType);
    fn cmp(&mut self, mode: CompareMode, ty: StackType);
    fn convert(&mut self, from: StackType, to: StackType);
    fn do_return(&mut self, ty: StackType);
    fn aload(&mut self, element: StackType);
    fn astore(&mut self, element: StackType);
    fn newarray(&mut self, element: StackType, len_slot: u32);
}

/// A `BytecodeOps` implementation that records the instruction stream
/// as a flat list, useful for golden-output tests of passes that emit
/// through the trait without needing a real backend.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct RecordingBytecodeOps {
    pub instructions: Vec<String>,
}

impl BytecodeOps for RecordingBytecodeOps {
    fn load_slot(&mut self, slot: u32, ty: StackType) {
        self.instructions.push(format!("load_slot {slot} {ty:?}"));
    }
    fn store_slot(&mut self, slot: u32, ty: StackType) {
        self.instructions.push(format!("store_slot {slot} {ty:?}"));
    }
    fn ldc(&mut self, value: ConstantValue) {
        self.instructions.push(format!("ldc {value:?}"));
    }
    fn load_undefined(&mut self) {
        self.instructions.push("load_undefined".into());
    }
    fn load_forced_initializer(&mut self) {
        self.instructions.push("load_forced_initializer".into());
    }
    fn arithmetic(&mut self, op: ArithmeticOp, ty: StackType) {
        self.instructions.push(format!("arithmetic {op:?} {ty:?}"));
    }
    fn cmp(&mut self, mode: CompareMode, ty: StackType) {
        self.instructions.push(format!("cmp {mode:?} {ty:?}"));
    }
    fn convert(&mut self, from: StackType, to: StackType) {
        self.instructions.push(format!("convert {from:?} -> {to:?}"));
    }
    fn do_return(&mut self, ty: StackType) {
        self.instructions.push(format!("return {ty:?}"));
    }
    fn aload(&mut self, element: StackType) {
        self.instructions.push(format!("aload {element:?}"));
    }
    fn astore(&mut self, element: StackType) {
        self.instructions.push(format!("astore {element:?}"));
    }
    fn newarray(&mut self, element: StackType, len_slot: u32) {
        self.instructions.push(format!("newarray {element:?} len_slot={len_slot}"));
    }
}
