use std::collections::HashSet;

use fixtura_core::DocumentType;

use crate::errors::GenerationError;

/// Number of candidate numbers tried per record before giving up.
pub const MAX_NUMBER_ATTEMPTS: u32 = 100;

const DNI_BASE: u64 = 10_000_000;
const DNI_STRIDE: u64 = 100_000;
const PASSPORT_BASE: u64 = 1_000_000;
const PASSPORT_STRIDE: u64 = 100_000;
const FOREIGNER_CARD_BASE: u64 = 100_000_000;
const FOREIGNER_CARD_STRIDE: u64 = 1_000_000;

/// Candidate document number for `customer_id` on the given attempt.
///
/// Attempt 0 is the base number; each further attempt shifts it by a
/// type-specific stride.
pub fn document_number(doc_type: DocumentType, customer_id: i32, attempt: u32) -> String {
    let id = u64::from(customer_id.unsigned_abs());
    let attempt = u64::from(attempt);
    match doc_type {
        DocumentType::Dni => format!("{:08}", DNI_BASE + id + attempt * DNI_STRIDE),
        DocumentType::Passport => {
            format!("P{:07}", PASSPORT_BASE + id + attempt * PASSPORT_STRIDE)
        }
        DocumentType::ForeignerCard => {
            (FOREIGNER_CARD_BASE + id + attempt * FOREIGNER_CARD_STRIDE).to_string()
        }
    }
}

/// Document numbers handed out during one run.
#[derive(Debug, Default, Clone)]
pub struct DocumentNumberRegistry {
    used: HashSet<String>,
    collisions: u64,
}

impl DocumentNumberRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the first free candidate for `customer_id`.
    pub fn claim(
        &mut self,
        doc_type: DocumentType,
        customer_id: i32,
    ) -> Result<String, GenerationError> {
        for attempt in 0..MAX_NUMBER_ATTEMPTS {
            let candidate = document_number(doc_type, customer_id, attempt);
            if self.used.insert(candidate.clone()) {
                return Ok(candidate);
            }
            self.collisions += 1;
        }

        Err(GenerationError::DocumentNumberExhausted {
            customer_id,
            document_type: doc_type,
            attempts: MAX_NUMBER_ATTEMPTS,
        })
    }

    /// Mark a number as taken without generating it.
    pub fn reserve(&mut self, number: impl Into<String>) -> bool {
        self.used.insert(number.into())
    }

    pub fn len(&self) -> usize {
        self.used.len()
    }

    /// Candidates rejected because they were already taken.
    pub fn collisions(&self) -> u64 {
        self.collisions
    }
}
