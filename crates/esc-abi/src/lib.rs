//! External collaborator traits the compiler core depends on but does
//! not implement. Each trait here is a boundary: the core calls
//! through it, a host embedder or a test double provides the body.

pub mod bytecode_ops;
pub mod code_cache;
pub mod linker_services;
pub mod method_handle;
pub mod regexp_factory;
pub mod stack_type;

pub use bytecode_ops::{ArithmeticOp, BytecodeOps, CompareMode, ConstantValue, RecordingBytecodeOps};
pub use code_cache::{CacheKey, CodeCache, CodeCacheError};
pub use linker_services::{ConversionPreference, LinkerServices};
pub use method_handle::{MethodHandle, MethodHandleFunctionality};
pub use regexp_factory::{RegExpFactory, RegExpHandle};
pub use stack_type::StackType;
