use chrono::NaiveDate;

use fixtura_core::DocumentType;
use fixtura_generate::{
    DocumentWeights, FixtureGenerator, GenerateOptions, LocaleKey, MAX_NUMBER_ATTEMPTS,
    document_number,
};
use fixtura_store::{
    FixtureStore, MemoryStore, PopulateOptions, PopulateStatus, populate,
};

fn generator(seed: u64) -> FixtureGenerator {
    FixtureGenerator::new(GenerateOptions {
        locale: LocaleKey::EnUs,
        seed: Some(seed),
        reference_time: NaiveDate::from_ymd_opt(2025, 1, 20)
            .and_then(|date| date.and_hms_opt(10, 0, 0))
            .unwrap_or_default(),
        ..GenerateOptions::default()
    })
    .expect("generator")
}

#[tokio::test]
async fn inserts_twenty_thousand_records_in_twenty_batches() {
    let mut store = MemoryStore::new();
    let mut generator = generator(1);

    let report = populate(&mut store, &mut generator, PopulateOptions::default())
        .await
        .expect("populate");

    assert_eq!(report.status, PopulateStatus::Completed);
    assert_eq!(report.batches_planned, 20);
    assert_eq!(report.batches_committed, 20);
    assert_eq!(store.batches_attempted(), 20);
    assert_eq!(report.rows_inserted, 20_000);
    assert_eq!(report.final_count, 20_000);
    assert_eq!(report.seed, 1);

    let counts = store.counts().await.expect("counts");
    assert_eq!(counts.documents, 20_000);
    assert_eq!(counts.duplicate_document_numbers, 0);
}

#[tokio::test]
async fn clear_removes_rows_from_a_previous_run() {
    let previous = generator(2).batch(0..50).expect("records");
    let mut store = MemoryStore::with_records(previous).failing_batch(0);
    assert_eq!(store.count_customers().await.expect("count"), 50);

    let report = populate(
        &mut store,
        &mut generator(3),
        PopulateOptions {
            records: 10,
            batch_size: 5,
        },
    )
    .await
    .expect("populate");

    assert!(report.cleared);
    assert_eq!(report.final_count, 0);
    assert!(store.documents().is_empty());
}

#[tokio::test]
async fn failed_clear_is_reported_and_the_run_continues() {
    let mut store = MemoryStore::new().failing_clear();
    let report = populate(
        &mut store,
        &mut generator(4),
        PopulateOptions {
            records: 30,
            batch_size: 10,
        },
    )
    .await
    .expect("populate");

    assert!(!report.cleared);
    assert!(report.clear_error.is_some());
    assert_eq!(report.status, PopulateStatus::Completed);
    assert_eq!(report.final_count, 30);
}

#[tokio::test]
async fn failed_batch_abandons_the_rest_and_keeps_earlier_batches() {
    let mut store = MemoryStore::new().failing_batch(2);
    let report = populate(
        &mut store,
        &mut generator(5),
        PopulateOptions {
            records: 5_000,
            batch_size: 1_000,
        },
    )
    .await
    .expect("populate");

    assert_eq!(report.status, PopulateStatus::Aborted);
    assert_eq!(report.batches_committed, 2);
    assert_eq!(store.batches_attempted(), 3);
    assert_eq!(report.final_count, 2_000);

    let failure = report.failure.expect("failure recorded");
    assert_eq!(failure.batch, 2);
    assert_eq!(failure.start_index, 2_000);
    assert_eq!(failure.end_index, 3_000);
}

#[tokio::test]
async fn exhausted_document_numbers_abort_the_run() {
    let mut generator = FixtureGenerator::new(GenerateOptions {
        document_weights: DocumentWeights {
            dni: 0,
            passport: 1,
            foreigner_card: 0,
        },
        ..generator(8).options().clone()
    })
    .expect("generator");
    for attempt in 0..MAX_NUMBER_ATTEMPTS {
        generator
            .document_numbers_mut()
            .reserve(document_number(DocumentType::Passport, 2_501, attempt));
    }

    let mut store = MemoryStore::new();
    let report = populate(
        &mut store,
        &mut generator,
        PopulateOptions {
            records: 5_000,
            batch_size: 1_000,
        },
    )
    .await
    .expect("populate");

    assert_eq!(report.status, PopulateStatus::Aborted);
    assert_eq!(report.batches_committed, 2);
    assert_eq!(store.batches_attempted(), 2);
    assert_eq!(report.final_count, 2_000);
    assert_eq!(report.document_number_collisions, u64::from(MAX_NUMBER_ATTEMPTS));

    let failure = report.failure.expect("failure recorded");
    assert_eq!(failure.batch, 2);
    assert_eq!(failure.start_index, 2_000);
    assert!(failure.error.contains("customer 2501"), "{}", failure.error);
}

#[tokio::test]
async fn populate_through_a_trait_object() {
    let mut store: Box<dyn FixtureStore> = Box::new(MemoryStore::new());
    let report = populate(
        store.as_mut(),
        &mut generator(6),
        PopulateOptions {
            records: 7,
            batch_size: 3,
        },
    )
    .await
    .expect("populate");

    assert_eq!(report.engine, "memory");
    assert_eq!(report.batches_planned, 3);
    assert_eq!(report.final_count, 7);
}

#[tokio::test]
async fn memory_store_rejects_duplicate_document_numbers() {
    let mut records = generator(7).batch(0..2).expect("records");
    records[1].document.number = records[0].document.number.clone();

    let mut store = MemoryStore::new();
    let result = store.insert_batch(&records).await;
    assert!(result.is_err());
    assert_eq!(store.count_customers().await.expect("count"), 0);
}
