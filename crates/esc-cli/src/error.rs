//! The CLI-boundary error taxonomy: every typed error a pipeline
//! stage can raise, composed into one enum and, at the binary edge,
//! into an `anyhow::Error` chain.

use esc_cache::CodeCacheError;
use esc_scope::ScopeError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("scope resolution failed: {0}")]
    Scope(#[from] ScopeError),

    #[error("code cache error: {0}")]
    Cache(#[from] CodeCacheError),

    #[error("regex factory error: {0}")]
    Regex(#[from] esc_abi::RegExpFactoryError),

    #[error("host boundary error: {0}")]
    Host(#[from] esc_host::HostError),

    #[error("uncaught script exception: {0}")]
    Engine(#[from] esc_host::EngineException),

    #[error("unknown engine parameter: {0}")]
    UnknownParameter(String),
}
