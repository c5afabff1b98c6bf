use thiserror::Error;

use fixtura_generate::GenerationError;

/// Errors raised by fixture stores and the populate loop.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("generation error: {0}")]
    Generation(#[from] GenerationError),
    #[error("record error: {0}")]
    Record(#[from] fixtura_core::Error),
    /// The store refused a write, e.g. a unique key violation in memory.
    #[error("rejected: {0}")]
    Rejected(String),
}
