use crate::error::{Error, Result};
use crate::model::{DocumentType, FixtureRecord};

/// Width of the `telefono` column.
pub const MAX_PHONE_LEN: usize = 15;

/// Shortest document validity, three years.
pub const MIN_VALIDITY_DAYS: i64 = 365 * 3;

/// Longest document validity, ten years.
pub const MAX_VALIDITY_DAYS: i64 = 365 * 10;

/// Validate a generated record before it is written.
///
/// This checks:
/// - the document belongs to the customer
/// - the email has a local part and a domain
/// - the phone fits the column
/// - the document number matches its type
/// - the expiry date falls 3 to 10 years after the issue date
pub fn validate_record(record: &FixtureRecord) -> Result<()> {
    let customer = &record.customer;
    let document = &record.document;

    if customer.id <= 0 {
        return Err(invalid(customer.id, "customer id must be positive"));
    }

    if document.customer_id != customer.id {
        return Err(invalid(
            customer.id,
            format!("document owned by customer {}", document.customer_id),
        ));
    }

    match customer.email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => {}
        _ => {
            return Err(invalid(
                customer.id,
                format!("malformed email '{}'", customer.email),
            ));
        }
    }

    if customer.phone.chars().count() > MAX_PHONE_LEN {
        return Err(invalid(
            customer.id,
            format!("phone longer than {MAX_PHONE_LEN} characters"),
        ));
    }

    validate_document_number(document.document_type, &document.number)
        .map_err(|reason| invalid(customer.id, reason))?;

    let validity = (document.expires_on - document.issued_on).num_days();
    if !(MIN_VALIDITY_DAYS..=MAX_VALIDITY_DAYS).contains(&validity) {
        return Err(invalid(
            customer.id,
            format!("document validity of {validity} days outside 3..=10 years"),
        ));
    }

    Ok(())
}

/// Check that `number` has the shape required by `doc_type`.
///
/// Widths are minimums: numbers are zero-padded to the width and grow past
/// it for large customer ids or late attempts.
pub fn validate_document_number(
    doc_type: DocumentType,
    number: &str,
) -> std::result::Result<(), String> {
    let digits_at_least =
        |value: &str, width: usize| value.len() >= width && value.bytes().all(|b| b.is_ascii_digit());
    let valid = match doc_type {
        DocumentType::Dni => digits_at_least(number, 8),
        DocumentType::Passport => number
            .strip_prefix('P')
            .is_some_and(|digits| digits_at_least(digits, 7)),
        DocumentType::ForeignerCard => digits_at_least(number, 9),
    };

    if valid {
        Ok(())
    } else {
        Err(format!("malformed {doc_type} number '{number}'"))
    }
}

fn invalid(customer_id: i32, reason: impl Into<String>) -> Error {
    Error::InvalidRecord {
        customer_id,
        reason: reason.into(),
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Days, NaiveDate};

    use super::*;
    use crate::model::{Customer, CustomerStatus, IdentityDocument};

    fn sample_record() -> FixtureRecord {
        let issued_on = NaiveDate::from_ymd_opt(2023, 5, 17).unwrap_or_default();
        FixtureRecord {
            customer: Customer {
                id: 42,
                first_name: "Lucia".to_string(),
                last_name: "Ramos".to_string(),
                email: "lucia.ramos42@gmail.com".to_string(),
                phone: "+34 612 345 678".to_string(),
                registered_at: issued_on.and_hms_opt(9, 30, 0).unwrap_or_default(),
                status: CustomerStatus::Active,
            },
            document: IdentityDocument {
                customer_id: 42,
                document_type: DocumentType::Dni,
                number: "10000042".to_string(),
                issued_on,
                expires_on: issued_on + Days::new(2000),
            },
        }
    }

    #[test]
    fn accepts_well_formed_record() {
        assert!(validate_record(&sample_record()).is_ok());
    }

    #[test]
    fn rejects_foreign_document_owner() {
        let mut record = sample_record();
        record.document.customer_id = 7;
        assert!(matches!(
            validate_record(&record),
            Err(Error::InvalidRecord { customer_id: 42, .. })
        ));
    }

    #[test]
    fn rejects_expiry_before_three_years() {
        let mut record = sample_record();
        record.document.expires_on = record.document.issued_on + Days::new(30);
        assert!(validate_record(&record).is_err());

        record.document.expires_on = record.document.issued_on;
        assert!(validate_record(&record).is_err());
    }

    #[test]
    fn document_number_shapes() {
        assert!(validate_document_number(DocumentType::Dni, "10000001").is_ok());
        assert!(validate_document_number(DocumentType::Dni, "1000001").is_err());
        assert!(validate_document_number(DocumentType::Passport, "P1000001").is_ok());
        assert!(validate_document_number(DocumentType::Passport, "1000001").is_err());
        assert!(validate_document_number(DocumentType::ForeignerCard, "100000001").is_ok());
        assert!(validate_document_number(DocumentType::ForeignerCard, "P00000001").is_err());
    }

    #[test]
    fn document_numbers_may_outgrow_their_width() {
        assert!(validate_document_number(DocumentType::Passport, "P10000000").is_ok());
        assert!(validate_document_number(DocumentType::Dni, "100000000").is_ok());
        assert!(validate_document_number(DocumentType::ForeignerCard, "2247483647").is_ok());
        assert!(validate_document_number(DocumentType::Passport, "P1000000x").is_err());
        assert!(validate_document_number(DocumentType::Passport, "P").is_err());
    }

    #[test]
    fn rejects_long_phone() {
        let mut record = sample_record();
        record.customer.phone = "+34 612 345 678 9".to_string();
        assert!(validate_record(&record).is_err());
    }
}
