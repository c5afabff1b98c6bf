use thiserror::Error;

/// Core error type shared across fixtura crates.
#[derive(Debug, Error)]
pub enum Error {
    /// A generated record violates the fixture invariants.
    #[error("invalid record for customer {customer_id}: {reason}")]
    InvalidRecord { customer_id: i32, reason: String },
    /// Catch-all error for unexpected failures.
    #[error("other error: {0}")]
    Other(String),
}

/// Convenience alias for results returned by fixtura crates.
pub type Result<T> = std::result::Result<T, Error>;
