//! Engine factory, configuration, and the compile pipeline over the
//! `esc-*` analysis crates — a "pure glue" layer, kept thin and
//! separable from the crates it wires together.

pub mod demo;
pub mod error;
pub mod factory;
pub mod options;
pub mod pipeline;

pub use error::EngineError;
pub use factory::{EngineFactory, EngineParameter};
pub use options::EngineOptions;
pub use pipeline::Pipeline;
