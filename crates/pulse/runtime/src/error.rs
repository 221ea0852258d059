//! Runtime errors

use pulse_types::ConfigError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RuntimeError {
    /// A component lock was poisoned by a panicking holder.
    #[error("Lock poisoned: {0}")]
    LockPoisoned(&'static str),

    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

pub type RuntimeResult<T> = Result<T, RuntimeError>;
