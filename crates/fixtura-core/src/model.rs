use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Lifecycle status of a customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CustomerStatus {
    Active,
    Inactive,
}

impl CustomerStatus {
    /// Value stored in the `estado` column.
    pub fn as_db_str(self) -> &'static str {
        match self {
            Self::Active => "activo",
            Self::Inactive => "inactivo",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }
}

impl fmt::Display for CustomerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of identity document; decides the document number format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    /// National identity card, at least 8 digits.
    Dni,
    /// Passport, `P` followed by at least 7 digits.
    Passport,
    /// Foreigner card, at least 9 digits.
    ForeignerCard,
}

impl DocumentType {
    /// Value stored in the `tipo_documento` column.
    pub fn as_db_str(self) -> &'static str {
        match self {
            Self::Dni => "DNI",
            Self::Passport => "Pasaporte",
            Self::ForeignerCard => "Carnet Extranjeria",
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_db_str())
    }
}

/// Row for the customers table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub registered_at: NaiveDateTime,
    pub status: CustomerStatus,
}

/// Row for the identity documents table, owned by exactly one customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityDocument {
    pub customer_id: i32,
    pub document_type: DocumentType,
    pub number: String,
    pub issued_on: NaiveDate,
    pub expires_on: NaiveDate,
}

/// A customer together with its identity document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixtureRecord {
    pub customer: Customer,
    pub document: IdentityDocument,
}

impl FixtureRecord {
    pub fn customer_id(&self) -> i32 {
        self.customer.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn db_values_keep_the_stored_vocabulary() {
        assert_eq!(DocumentType::Dni.as_db_str(), "DNI");
        assert_eq!(DocumentType::Passport.as_db_str(), "Pasaporte");
        assert_eq!(DocumentType::ForeignerCard.as_db_str(), "Carnet Extranjeria");
        assert_eq!(CustomerStatus::Active.as_db_str(), "activo");
        assert_eq!(CustomerStatus::Inactive.as_db_str(), "inactivo");
    }

    #[test]
    fn status_serializes_as_snake_case() {
        let encoded = serde_json::to_string(&CustomerStatus::Inactive).expect("serialize");
        assert_eq!(encoded, "\"inactive\"");
        assert_eq!(CustomerStatus::Active.as_db_str(), "activo");
    }
}
