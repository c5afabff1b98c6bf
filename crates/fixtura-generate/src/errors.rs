use thiserror::Error;

use fixtura_core::DocumentType;

/// Errors emitted while synthesizing fixtures.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("invalid options: {0}")]
    InvalidOptions(String),
    #[error(
        "no free {document_type} number for customer {customer_id} after {attempts} attempts"
    )]
    DocumentNumberExhausted {
        customer_id: i32,
        document_type: DocumentType,
        attempts: u32,
    },
    #[error(transparent)]
    Record(#[from] fixtura_core::Error),
}
