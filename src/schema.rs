//! Database schema management for `weather-metrics`.
//!
//! Ensures required tables and indexes exist before serving requests.
//! Applied once on startup from `main.rs`.

use anyhow::Result;
use sqlx::SqlitePool;

// ---

/// Create or update the database schema (idempotent).
///
/// Creates the `sensors` table and the `metrics` table that references it.
/// Safe to call on every startup; no-op if objects already exist.
///
/// Errors are propagated if any SQL execution fails.
pub async fn create_schema(pool: &SqlitePool) -> Result<()> {
    // ---
    let mut tx = pool.begin().await?;

    // Registry of measurement sources served by `POST /sensors`
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS sensors (
            sensor_id  INTEGER   PRIMARY KEY AUTOINCREMENT,
            name       TEXT      NOT NULL,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        );
        "#,
    )
    .execute(&mut *tx)
    .await?;

    // Time-stamped readings; sensor_id is a real storage-level constraint so
    // an insert with an unknown sensor aborts inside its own transaction.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS metrics (
            metric_id    INTEGER   PRIMARY KEY AUTOINCREMENT,
            sensor_id    INTEGER   NOT NULL REFERENCES sensors (sensor_id),
            created_at   TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            metric_name  TEXT      NOT NULL,
            metric_value REAL      NOT NULL
        );
        "#,
    )
    .execute(&mut *tx)
    .await?;

    // Basic indexes for the grouped aggregation query
    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_metrics_sensor_id
            ON metrics (sensor_id);
        "#,
    )
    .execute(&mut *tx)
    .await?;

    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_metrics_created_at
            ON metrics (created_at);
        "#,
    )
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(())
}
