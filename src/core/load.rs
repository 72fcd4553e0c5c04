use crate::domain::model::{canonical_columns, DatabaseConfig, Record};
use crate::utils::error::{EtlError, Result};
use sqlx::mysql::{MySql, MySqlConnectOptions, MySqlConnection};
use sqlx::{ConnectOptions, Connection, QueryBuilder};
use std::time::Duration;
use tracing::{debug, error, info, warn};

const QUERY_TIMEOUT: Duration = Duration::from_secs(60);

/// Inserts the whole batch into `table` through one connection opened for
/// this call. Returns the number of rows the server confirmed inserted.
///
/// An empty batch is a no-op; the orchestrator never gets here with one, but
/// direct callers must not pay for a connection either.
pub async fn insert_batch(db: &DatabaseConfig, table: &str, batch: &[Record]) -> Result<u64> {
    if batch.is_empty() {
        debug!("empty batch, nothing to insert into {table}");
        return Ok(0);
    }

    match tokio::time::timeout(QUERY_TIMEOUT, connect_and_insert(db, table, batch)).await {
        Ok(result) => result,
        Err(_) => {
            let err = EtlError::Load {
                message: format!(
                    "insert into {} timed out after {}s",
                    table,
                    QUERY_TIMEOUT.as_secs()
                ),
            };
            error!("{err}");
            Err(err)
        }
    }
}

async fn connect_and_insert(db: &DatabaseConfig, table: &str, batch: &[Record]) -> Result<u64> {
    let options = MySqlConnectOptions::new()
        .host(&db.host)
        .port(db.port)
        .database(&db.database)
        .username(&db.user)
        .password(&db.password);

    let mut conn: MySqlConnection = match options.connect().await {
        Ok(conn) => conn,
        Err(e) => {
            let err = load_error("connect", e);
            error!("{err}");
            return Err(err);
        }
    };
    info!("connected to database {} at {}", db.database, db.host);

    let result = run_insert(&mut conn, table, batch).await;

    // The connection is scoped to this call; release it on every path.
    if let Err(e) = conn.close().await {
        warn!("error closing database connection: {e}");
    } else {
        debug!("database connection closed");
    }

    if let Err(err) = &result {
        error!("{err}");
    }
    result
}

async fn run_insert(conn: &mut MySqlConnection, table: &str, batch: &[Record]) -> Result<u64> {
    let mut tx = conn
        .begin()
        .await
        .map_err(|e| load_error("begin transaction", e))?;

    let mut builder: QueryBuilder<MySql> = QueryBuilder::new(insert_prefix(table));
    builder.push_values(batch, |mut row, record| {
        for column in canonical_columns() {
            row.push_bind(text_value(record.get(column)));
        }
    });

    let rows = builder
        .build()
        .execute(&mut *tx)
        .await
        .map_err(|e| load_error("insert", e))?
        .rows_affected();

    tx.commit().await.map_err(|e| load_error("commit", e))?;
    Ok(rows)
}

fn load_error(action: &str, err: sqlx::Error) -> EtlError {
    EtlError::Load {
        message: format!("{action}: {err}"),
    }
}

/// Statement head with backtick-quoted identifiers. Table and column names
/// come from configuration and the static rename table, never from scraped
/// input; only row values are bound as parameters.
fn insert_prefix(table: &str) -> String {
    let columns = canonical_columns()
        .map(|column| format!("`{}`", column))
        .collect::<Vec<_>>()
        .join(", ");
    format!("INSERT INTO `{}` ({}) ", table, columns)
}

fn text_value(value: Option<&serde_json::Value>) -> String {
    match value {
        Some(serde_json::Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
        None => String::new(),
    }
}
