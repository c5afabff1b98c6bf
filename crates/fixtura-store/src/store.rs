use async_trait::async_trait;
use serde::Serialize;

use fixtura_core::FixtureRecord;

use crate::errors::StoreError;

/// Row counts observed in the destination tables.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StoreCounts {
    pub customers: i64,
    pub documents: i64,
    /// Document numbers occurring more than once.
    pub duplicate_document_numbers: i64,
}

/// Destination for fixture records.
///
/// Every method is one unit of work: a failed call leaves the tables as they
/// were before it.
#[async_trait]
pub trait FixtureStore: Send {
    /// Engine identifier (e.g. `postgres`).
    fn engine(&self) -> &'static str;

    /// Delete every document and customer row.
    async fn clear(&mut self) -> Result<(), StoreError>;

    /// Insert customers and their documents, committing on success.
    async fn insert_batch(&mut self, records: &[FixtureRecord]) -> Result<u64, StoreError>;

    /// Rows in the primary table.
    async fn count_customers(&mut self) -> Result<i64, StoreError>;

    async fn counts(&mut self) -> Result<StoreCounts, StoreError>;
}
