use std::ops::Range;
use std::time::Instant;

use serde::Serialize;
use tracing::{error, info, warn};

use fixtura_core::validate_record;
use fixtura_generate::{BatchPlan, FixtureGenerator};

use crate::errors::StoreError;
use crate::store::FixtureStore;

/// Size of a populate run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PopulateOptions {
    pub records: u64,
    pub batch_size: u64,
}

impl Default for PopulateOptions {
    fn default() -> Self {
        Self {
            records: 20_000,
            batch_size: 1_000,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PopulateStatus {
    Completed,
    Aborted,
}

/// The batch that stopped a run.
#[derive(Debug, Clone, Serialize)]
pub struct BatchFailure {
    pub batch: u64,
    pub start_index: u64,
    pub end_index: u64,
    pub error: String,
}

/// Outcome of a populate run.
#[derive(Debug, Clone, Serialize)]
pub struct PopulateReport {
    pub status: PopulateStatus,
    pub engine: String,
    pub seed: u64,
    pub records_requested: u64,
    pub batch_size: u64,
    pub batches_planned: u64,
    pub batches_committed: u64,
    pub rows_inserted: u64,
    pub cleared: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clear_error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<BatchFailure>,
    /// Rows counted in the primary table after the last batch.
    pub final_count: i64,
    pub document_number_collisions: u64,
    pub duration_ms: u64,
}

/// Clear the store, insert `options.records` fixtures batch by batch, then
/// count the primary table.
///
/// A failed clear is logged and the run continues. The first failed batch
/// stops the loop; batches committed before it stay in place. Only the
/// final count can make this function return an error.
pub async fn populate<S>(
    store: &mut S,
    generator: &mut FixtureGenerator,
    options: PopulateOptions,
) -> Result<PopulateReport, StoreError>
where
    S: FixtureStore + ?Sized,
{
    let started = Instant::now();
    let plan = BatchPlan::new(options.records, options.batch_size)?;

    let clear_error = match store.clear().await {
        Ok(()) => {
            info!(event = "tables_cleared", engine = store.engine());
            None
        }
        Err(err) => {
            warn!(event = "clear_failed", error = %err);
            Some(err.to_string())
        }
    };

    info!(
        event = "populate_started",
        records = plan.total(),
        batch_size = plan.batch_size(),
        batches = plan.batch_count(),
        seed = generator.seed()
    );

    let mut batches_committed = 0_u64;
    let mut rows_inserted = 0_u64;
    let mut failure = None;

    for (batch, range) in plan.ranges().enumerate() {
        let batch = batch as u64;
        match insert_range(store, generator, range.clone()).await {
            Ok(inserted) => {
                batches_committed += 1;
                rows_inserted += inserted;
                info!(
                    event = "batch_committed",
                    batch,
                    inserted = rows_inserted,
                    total = plan.total()
                );
            }
            Err(err) => {
                error!(event = "batch_failed", batch, error = %err);
                failure = Some(BatchFailure {
                    batch,
                    start_index: range.start,
                    end_index: range.end,
                    error: err.to_string(),
                });
                break;
            }
        }
    }

    let final_count = store.count_customers().await?;
    let status = if failure.is_some() {
        PopulateStatus::Aborted
    } else {
        PopulateStatus::Completed
    };
    let duration_ms = started.elapsed().as_millis() as u64;

    info!(
        event = "populate_finished",
        status = ?status,
        final_count,
        rows_inserted,
        duration_ms
    );

    Ok(PopulateReport {
        status,
        engine: store.engine().to_string(),
        seed: generator.seed(),
        records_requested: plan.total(),
        batch_size: plan.batch_size(),
        batches_planned: plan.batch_count(),
        batches_committed,
        rows_inserted,
        cleared: clear_error.is_none(),
        clear_error,
        failure,
        final_count,
        document_number_collisions: generator.document_numbers().collisions(),
        duration_ms,
    })
}

async fn insert_range<S>(
    store: &mut S,
    generator: &mut FixtureGenerator,
    range: Range<u64>,
) -> Result<u64, StoreError>
where
    S: FixtureStore + ?Sized,
{
    let records = generator.batch(range)?;
    for record in &records {
        validate_record(record)?;
    }
    store.insert_batch(&records).await
}
