//! Core contracts for fixtura.
//!
//! Defines the customer and identity-document records, the column contracts
//! of the destination tables, record validation, and the connection
//! redaction helper shared by the store and the CLI.

pub mod error;
pub mod model;
pub mod redaction;
pub mod tables;
pub mod validation;

pub use error::{Error, Result};
pub use model::{Customer, CustomerStatus, DocumentType, FixtureRecord, IdentityDocument};
pub use redaction::{RedactedConnection, redact_connection_string};
pub use validation::{
    MAX_PHONE_LEN, MAX_VALIDITY_DAYS, MIN_VALIDITY_DAYS, validate_document_number,
    validate_record,
};
