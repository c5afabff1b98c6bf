use async_trait::async_trait;
use sqlx::postgres::{PgConnectOptions, PgConnection, Postgres};
use sqlx::{ConnectOptions, Connection, Transaction};
use tracing::warn;

use fixtura_core::FixtureRecord;
use fixtura_core::tables::{CUSTOMERS_TABLE, DOCUMENTS_TABLE};

use crate::errors::StoreError;
use crate::store::{FixtureStore, StoreCounts};

mod queries;

/// Store backed by a single PostgreSQL connection held for the whole run.
#[derive(Debug)]
pub struct PostgresStore {
    conn: PgConnection,
}

impl PostgresStore {
    /// Open the connection described by `options`.
    pub async fn connect(options: &PgConnectOptions) -> Result<Self, StoreError> {
        let conn = options.connect().await?;
        Ok(Self { conn })
    }

    /// Open a connection from a `postgres://` URL.
    pub async fn connect_url(url: &str) -> Result<Self, StoreError> {
        let conn = PgConnection::connect(url).await?;
        Ok(Self { conn })
    }

    /// Close the connection gracefully.
    pub async fn close(self) -> Result<(), StoreError> {
        self.conn.close().await?;
        Ok(())
    }
}

#[async_trait]
impl FixtureStore for PostgresStore {
    fn engine(&self) -> &'static str {
        "postgres"
    }

    async fn clear(&mut self) -> Result<(), StoreError> {
        let mut tx = self.conn.begin().await?;
        match queries::delete_all(&mut tx).await {
            Ok(()) => {
                tx.commit().await?;
                Ok(())
            }
            Err(err) => {
                rollback(tx, "clear").await;
                Err(err.into())
            }
        }
    }

    async fn insert_batch(&mut self, records: &[FixtureRecord]) -> Result<u64, StoreError> {
        if records.is_empty() {
            return Ok(0);
        }

        let mut tx = self.conn.begin().await?;
        let result = async {
            let inserted = queries::insert_customers(&mut tx, records).await?;
            queries::insert_documents(&mut tx, records).await?;
            Ok::<_, sqlx::Error>(inserted)
        }
        .await;

        match result {
            Ok(inserted) => {
                tx.commit().await?;
                Ok(inserted)
            }
            Err(err) => {
                rollback(tx, "insert_batch").await;
                Err(err.into())
            }
        }
    }

    async fn count_customers(&mut self) -> Result<i64, StoreError> {
        Ok(queries::count_rows(&mut self.conn, CUSTOMERS_TABLE).await?)
    }

    async fn counts(&mut self) -> Result<StoreCounts, StoreError> {
        Ok(StoreCounts {
            customers: queries::count_rows(&mut self.conn, CUSTOMERS_TABLE).await?,
            documents: queries::count_rows(&mut self.conn, DOCUMENTS_TABLE).await?,
            duplicate_document_numbers: queries::count_duplicate_document_numbers(&mut self.conn)
                .await?,
        })
    }
}

/// Roll back after a failed statement. A rollback failure is only logged so
/// the statement's error is the one reported.
async fn rollback(tx: Transaction<'_, Postgres>, operation: &str) {
    if let Err(err) = tx.rollback().await {
        warn!(event = "rollback_failed", operation, error = %err);
    }
}
