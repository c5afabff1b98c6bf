use std::collections::{BTreeMap, HashMap, HashSet};

use async_trait::async_trait;

use fixtura_core::{Customer, FixtureRecord, IdentityDocument};

use crate::errors::StoreError;
use crate::store::{FixtureStore, StoreCounts};

/// In-memory store with the unique keys of the SQL schema.
///
/// Batches are applied all-or-nothing. Failures can be injected for the
/// clear step or for a given batch (0-based) to exercise the abort paths.
#[derive(Debug, Default)]
pub struct MemoryStore {
    customers: BTreeMap<i32, Customer>,
    documents: Vec<IdentityDocument>,
    fail_clear: bool,
    fail_batch: Option<u64>,
    batches_attempted: u64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-filled with rows from an earlier run.
    pub fn with_records(records: impl IntoIterator<Item = FixtureRecord>) -> Self {
        let mut store = Self::new();
        for record in records {
            store.customers.insert(record.customer.id, record.customer);
            store.documents.push(record.document);
        }
        store
    }

    /// Make every `clear` call fail.
    pub fn failing_clear(mut self) -> Self {
        self.fail_clear = true;
        self
    }

    /// Make the `batch`-th `insert_batch` call fail.
    pub fn failing_batch(mut self, batch: u64) -> Self {
        self.fail_batch = Some(batch);
        self
    }

    pub fn documents(&self) -> &[IdentityDocument] {
        &self.documents
    }

    pub fn batches_attempted(&self) -> u64 {
        self.batches_attempted
    }

    fn check_batch(&self, records: &[FixtureRecord]) -> Result<(), StoreError> {
        let mut ids = HashSet::new();
        for record in records {
            let id = record.customer.id;
            if self.customers.contains_key(&id) || !ids.insert(id) {
                return Err(StoreError::Rejected(format!(
                    "duplicate customer id {id}"
                )));
            }
            if record.document.customer_id != id {
                return Err(StoreError::Rejected(format!(
                    "document references unknown customer {}",
                    record.document.customer_id
                )));
            }
        }

        let mut numbers: HashSet<&str> = self
            .documents
            .iter()
            .map(|document| document.number.as_str())
            .collect();
        for record in records {
            if !numbers.insert(record.document.number.as_str()) {
                return Err(StoreError::Rejected(format!(
                    "duplicate document number {}",
                    record.document.number
                )));
            }
        }

        Ok(())
    }
}

#[async_trait]
impl FixtureStore for MemoryStore {
    fn engine(&self) -> &'static str {
        "memory"
    }

    async fn clear(&mut self) -> Result<(), StoreError> {
        if self.fail_clear {
            return Err(StoreError::Rejected("clear refused".to_string()));
        }
        self.documents.clear();
        self.customers.clear();
        Ok(())
    }

    async fn insert_batch(&mut self, records: &[FixtureRecord]) -> Result<u64, StoreError> {
        let batch = self.batches_attempted;
        self.batches_attempted += 1;
        if self.fail_batch == Some(batch) {
            return Err(StoreError::Rejected(format!("batch {batch} refused")));
        }

        self.check_batch(records)?;
        for record in records {
            self.customers
                .insert(record.customer.id, record.customer.clone());
            self.documents.push(record.document.clone());
        }
        Ok(records.len() as u64)
    }

    async fn count_customers(&mut self) -> Result<i64, StoreError> {
        Ok(self.customers.len() as i64)
    }

    async fn counts(&mut self) -> Result<StoreCounts, StoreError> {
        let mut occurrences: HashMap<&str, u32> = HashMap::new();
        for document in &self.documents {
            *occurrences.entry(document.number.as_str()).or_insert(0) += 1;
        }

        Ok(StoreCounts {
            customers: self.customers.len() as i64,
            documents: self.documents.len() as i64,
            duplicate_document_numbers: occurrences.values().filter(|count| **count > 1).count()
                as i64,
        })
    }
}
