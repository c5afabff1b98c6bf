use sqlx::postgres::PgConnection;
use sqlx::{Postgres, QueryBuilder};

use fixtura_core::FixtureRecord;
use fixtura_core::tables::{
    CUSTOMER_COLUMNS, CUSTOMERS_TABLE, DOCUMENT_COLUMNS, DOCUMENT_NUMBER_COLUMN, DOCUMENTS_TABLE,
    column_list,
};

/// Bind parameter limit of the Postgres wire protocol.
const MAX_BIND_PARAMS: usize = u16::MAX as usize;

pub async fn delete_all(conn: &mut PgConnection) -> Result<(), sqlx::Error> {
    // Documents reference customers, so they go first.
    sqlx::query(&format!("DELETE FROM {DOCUMENTS_TABLE}"))
        .execute(&mut *conn)
        .await?;
    sqlx::query(&format!("DELETE FROM {CUSTOMERS_TABLE}"))
        .execute(&mut *conn)
        .await?;
    Ok(())
}

pub async fn insert_customers(
    conn: &mut PgConnection,
    records: &[FixtureRecord],
) -> Result<u64, sqlx::Error> {
    let mut inserted = 0;
    for chunk in records.chunks(rows_per_statement(CUSTOMER_COLUMNS.len())) {
        let mut builder: QueryBuilder<'_, Postgres> = QueryBuilder::new(format!(
            "INSERT INTO {CUSTOMERS_TABLE} ({}) ",
            column_list(CUSTOMER_COLUMNS)
        ));
        builder.push_values(chunk, |mut row, record| {
            let customer = &record.customer;
            row.push_bind(customer.id)
                .push_bind(customer.first_name.as_str())
                .push_bind(customer.last_name.as_str())
                .push_bind(customer.email.as_str())
                .push_bind(customer.phone.as_str())
                .push_bind(customer.registered_at)
                .push_bind(customer.status.as_db_str());
        });
        inserted += builder.build().execute(&mut *conn).await?.rows_affected();
    }
    Ok(inserted)
}

pub async fn insert_documents(
    conn: &mut PgConnection,
    records: &[FixtureRecord],
) -> Result<u64, sqlx::Error> {
    let mut inserted = 0;
    for chunk in records.chunks(rows_per_statement(DOCUMENT_COLUMNS.len())) {
        let mut builder: QueryBuilder<'_, Postgres> = QueryBuilder::new(format!(
            "INSERT INTO {DOCUMENTS_TABLE} ({}) ",
            column_list(DOCUMENT_COLUMNS)
        ));
        builder.push_values(chunk, |mut row, record| {
            let document = &record.document;
            row.push_bind(document.customer_id)
                .push_bind(document.document_type.as_db_str())
                .push_bind(document.number.as_str())
                .push_bind(document.issued_on)
                .push_bind(document.expires_on);
        });
        inserted += builder.build().execute(&mut *conn).await?.rows_affected();
    }
    Ok(inserted)
}

pub async fn count_rows(conn: &mut PgConnection, table: &str) -> Result<i64, sqlx::Error> {
    let sql = format!("SELECT COUNT(*) FROM {table}");
    sqlx::query_scalar(&sql).fetch_one(&mut *conn).await
}

pub async fn count_duplicate_document_numbers(
    conn: &mut PgConnection,
) -> Result<i64, sqlx::Error> {
    let sql = format!(
        "SELECT COUNT(*) FROM (SELECT {DOCUMENT_NUMBER_COLUMN} FROM {DOCUMENTS_TABLE} \
         GROUP BY {DOCUMENT_NUMBER_COLUMN} HAVING COUNT(*) > 1) AS duplicated"
    );
    sqlx::query_scalar(&sql).fetch_one(&mut *conn).await
}

fn rows_per_statement(columns: usize) -> usize {
    (MAX_BIND_PARAMS / columns).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statements_stay_under_bind_limit() {
        let rows = rows_per_statement(CUSTOMER_COLUMNS.len());
        assert!(rows * CUSTOMER_COLUMNS.len() <= MAX_BIND_PARAMS);
        assert!(rows >= 1_000);
    }
}
