//! CLI command implementations.

pub mod browse;

use bazaar_storefront::error::AppError;
use thiserror::Error;

/// Errors surfaced by a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Setup or catalog failure.
    #[error(transparent)]
    App(#[from] AppError),

    /// A list finished in the failed state; carries the shopper-facing message.
    #[error("{0}")]
    Load(String),
}
