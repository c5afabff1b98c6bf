use std::{env, fs};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use sqlx::{Connection, PgConnection};

use fixtura_generate::{FixtureGenerator, GenerateOptions, LocaleKey};
use fixtura_store::{
    FixtureStore, PopulateOptions, PopulateStatus, PostgresStore, StoreError, populate,
};

const SCHEMA_FIXTURE: &str = "../../fixtures/sql/postgres/001_schema.sql";

fn database_url() -> Option<String> {
    env::var("TEST_DATABASE_URL")
        .or_else(|_| env::var("DATABASE_URL"))
        .ok()
}

async fn reset_schema(url: &str) -> Result<()> {
    let mut conn = PgConnection::connect(url)
        .await
        .context("connecting to Postgres")?;
    let script = fs::read_to_string(SCHEMA_FIXTURE)
        .with_context(|| format!("reading fixture {SCHEMA_FIXTURE}"))?;

    for statement in script.split(';') {
        let sql = statement.trim();
        if sql.is_empty() {
            continue;
        }
        sqlx::query(sql)
            .execute(&mut conn)
            .await
            .with_context(|| format!("executing fixture {SCHEMA_FIXTURE}"))?;
    }

    conn.close().await?;
    Ok(())
}

#[tokio::test]
async fn populates_postgres_tables_twice() -> Result<()> {
    let Some(url) = database_url() else {
        eprintln!("skipping: set TEST_DATABASE_URL or DATABASE_URL to run Postgres tests");
        return Ok(());
    };
    reset_schema(&url).await?;

    let options = GenerateOptions {
        locale: LocaleKey::PtBr,
        seed: Some(42),
        reference_time: NaiveDate::from_ymd_opt(2025, 2, 1)
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .unwrap_or_default(),
        ..GenerateOptions::default()
    };
    let run = PopulateOptions {
        records: 2_500,
        batch_size: 1_000,
    };

    let mut store = PostgresStore::connect_url(&url).await?;
    for _ in 0..2 {
        let mut generator = FixtureGenerator::new(options.clone())?;
        let report = populate(&mut store, &mut generator, run).await?;
        assert_eq!(report.status, PopulateStatus::Completed);
        assert!(report.cleared);
        assert_eq!(report.batches_committed, 3);
        assert_eq!(report.final_count, 2_500);
    }

    let counts = store.counts().await?;
    assert_eq!(counts.customers, 2_500);
    assert_eq!(counts.documents, 2_500);
    assert_eq!(counts.duplicate_document_numbers, 0);

    // A batch rejected by the unique key leaves no rows and reports the
    // constraint violation itself.
    let mut generator = FixtureGenerator::new(options)?;
    let mut rejected = generator.batch(2_500..2_502)?;
    rejected[1].document.number = rejected[0].document.number.clone();
    match store.insert_batch(&rejected).await {
        Err(StoreError::Database(sqlx::Error::Database(err))) => {
            assert!(err.is_unique_violation(), "unexpected error: {err}");
        }
        other => panic!("expected a unique violation, got {other:?}"),
    }
    assert_eq!(store.counts().await?.customers, 2_500);

    store.close().await?;
    Ok(())
}
