use std::ops::Range;

use chrono::Days;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use fixtura_core::{
    Customer, CustomerStatus, DocumentType, FixtureRecord, IdentityDocument, MAX_PHONE_LEN,
    MAX_VALIDITY_DAYS, MIN_VALIDITY_DAYS,
};

use crate::documents::DocumentNumberRegistry;
use crate::errors::GenerationError;
use crate::faker::{PersonaFaker, email_slug, truncate_chars};
use crate::model::GenerateOptions;
use crate::weighted::WeightedChoice;

/// Synthesizes fixture records for one run.
///
/// Customer ids are `index + 1`. All randomness flows from a single ChaCha8
/// stream, so the same seed, reference time and locale reproduce the same
/// records when indexes are requested in the same order.
#[derive(Debug)]
pub struct FixtureGenerator {
    options: GenerateOptions,
    seed: u64,
    rng: ChaCha8Rng,
    faker: PersonaFaker,
    statuses: WeightedChoice<CustomerStatus>,
    document_types: WeightedChoice<DocumentType>,
    numbers: DocumentNumberRegistry,
}

impl FixtureGenerator {
    pub fn new(options: GenerateOptions) -> Result<Self, GenerationError> {
        let statuses = WeightedChoice::new(&options.status_weights.entries(), "status weights")?;
        let document_types =
            WeightedChoice::new(&options.document_weights.entries(), "document weights")?;
        let seed = options.seed.unwrap_or_else(|| rand::rng().random());

        Ok(Self {
            faker: PersonaFaker::new(options.locale),
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
            statuses,
            document_types,
            numbers: DocumentNumberRegistry::new(),
            options,
        })
    }

    /// Seed actually in use, including a drawn one.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn options(&self) -> &GenerateOptions {
        &self.options
    }

    pub fn document_numbers(&self) -> &DocumentNumberRegistry {
        &self.numbers
    }

    /// Registry access for numbers already held outside this run.
    pub fn document_numbers_mut(&mut self) -> &mut DocumentNumberRegistry {
        &mut self.numbers
    }

    pub fn record(&mut self, index: u64) -> Result<FixtureRecord, GenerationError> {
        let customer_id = index
            .checked_add(1)
            .and_then(|id| i32::try_from(id).ok())
            .ok_or_else(|| {
                GenerationError::InvalidOptions(format!(
                    "record index {index} exceeds the customer id range"
                ))
            })?;

        let first_name = self.faker.first_name(&mut self.rng);
        let last_name = self.faker.last_name(&mut self.rng);
        let domain = self.faker.free_email_domain(&mut self.rng);
        let email = format!(
            "{}.{}{customer_id}@{domain}",
            email_slug(&first_name),
            email_slug(&last_name)
        );
        let phone = truncate_chars(&self.faker.phone_number(&mut self.rng), MAX_PHONE_LEN);
        let status = self.statuses.sample(&mut self.rng);

        let days_back = self
            .rng
            .random_range(0..=self.options.registration_window_days);
        let registered_at = self
            .options
            .reference_time
            .checked_sub_days(Days::new(u64::from(days_back)))
            .ok_or_else(|| {
                GenerationError::InvalidOptions(
                    "registration window reaches before the supported date range".to_string(),
                )
            })?;

        let document_type = self.document_types.sample(&mut self.rng);
        let number = self.numbers.claim(document_type, customer_id)?;
        let issued_on = registered_at.date();
        let validity_days = self
            .rng
            .random_range(MIN_VALIDITY_DAYS..=MAX_VALIDITY_DAYS)
            .unsigned_abs();
        let expires_on = issued_on
            .checked_add_days(Days::new(validity_days))
            .ok_or_else(|| {
                GenerationError::InvalidOptions(
                    "document expiry falls outside the supported date range".to_string(),
                )
            })?;

        Ok(FixtureRecord {
            customer: Customer {
                id: customer_id,
                first_name,
                last_name,
                email,
                phone,
                registered_at,
                status,
            },
            document: IdentityDocument {
                customer_id,
                document_type,
                number,
                issued_on,
                expires_on,
            },
        })
    }

    /// Records for every index in `range`, in order.
    pub fn batch(&mut self, range: Range<u64>) -> Result<Vec<FixtureRecord>, GenerationError> {
        let start = range.start;
        let end = range.end;
        let records = range
            .map(|index| self.record(index))
            .collect::<Result<Vec<_>, _>>()?;
        debug!(
            start,
            end,
            numbers_claimed = self.numbers.len(),
            "batch synthesized"
        );
        Ok(records)
    }
}
