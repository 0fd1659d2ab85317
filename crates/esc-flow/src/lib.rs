//! The flow pass: installs loop continue/break labels,
//! switch tag symbols and jump-table eligibility, try/finally inlining
//! labels, and two-edge `If` join-predecessor conversions.

pub mod label;
pub mod pass;
pub mod switch;
pub mod types;

pub use label::LabelAllocator;
pub use pass::{FlowPass, RoutedExit};
pub use types::{infer_type, TypeEnv};
