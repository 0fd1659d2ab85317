//! The host-boundary mirror contract: `AbstractJsObject`, the
//! `Mirror` wrapper that swaps the ambient global around every
//! boundary-crossing operation, the `Bindings` map view, and the
//! `EngineException` user-visible failure contract.

pub mod bindings;
pub mod engine_exception;
pub mod error;
pub mod mirror;
pub mod object;

pub use bindings::Bindings;
pub use engine_exception::EngineException;
pub use error::HostError;
pub use mirror::{current_global, AmbientGlobalGuard, Mirror};
pub use object::{AbstractJsObject, Hint, JsValue, ObjectHandle};
