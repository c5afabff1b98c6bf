use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use fixtura_core::{CustomerStatus, DocumentType};

use crate::locales::LocaleKey;

/// Relative weights for customer status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusWeights {
    pub active: u32,
    pub inactive: u32,
}

impl Default for StatusWeights {
    fn default() -> Self {
        Self {
            active: 3,
            inactive: 1,
        }
    }
}

impl StatusWeights {
    pub fn entries(&self) -> [(CustomerStatus, u32); 2] {
        [
            (CustomerStatus::Active, self.active),
            (CustomerStatus::Inactive, self.inactive),
        ]
    }
}

/// Relative weights for identity document types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentWeights {
    pub dni: u32,
    pub passport: u32,
    pub foreigner_card: u32,
}

impl Default for DocumentWeights {
    fn default() -> Self {
        Self {
            dni: 3,
            passport: 1,
            foreigner_card: 1,
        }
    }
}

impl DocumentWeights {
    pub fn entries(&self) -> [(DocumentType, u32); 3] {
        [
            (DocumentType::Dni, self.dni),
            (DocumentType::Passport, self.passport),
            (DocumentType::ForeignerCard, self.foreigner_card),
        ]
    }
}

/// Options for the fixture generator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateOptions {
    /// Locale for names, phones and email domains.
    pub locale: LocaleKey,
    /// RNG seed; a random one is drawn when absent.
    pub seed: Option<u64>,
    /// Instant registrations are counted back from.
    pub reference_time: NaiveDateTime,
    /// Registrations fall within this many days before `reference_time`.
    pub registration_window_days: u32,
    pub status_weights: StatusWeights,
    pub document_weights: DocumentWeights,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            locale: LocaleKey::default(),
            seed: None,
            reference_time: Utc::now().naive_utc(),
            registration_window_days: 365 * 5,
            status_weights: StatusWeights::default(),
            document_weights: DocumentWeights::default(),
        }
    }
}
