//! Sample-data seeding for local development.
//!
//! Run once at startup after schema creation. A fresh database gets three
//! sensors and a spread of readings at varying day offsets so the query
//! endpoint has something to aggregate; a database that already has sensors
//! is left untouched so restarts do not duplicate rows.

use anyhow::Result;
use chrono::{Duration, NaiveDateTime, Utc};
use sqlx::{Sqlite, SqlitePool, Transaction};

// ---

pub async fn insert_sample_data(pool: &SqlitePool) -> Result<()> {
    // ---
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sensors")
        .fetch_one(pool)
        .await?;
    if count > 0 {
        tracing::debug!("Sensors already present, skipping sample data");
        return Ok(());
    }

    let now = Utc::now().naive_utc();
    let mut tx = pool.begin().await?;

    for name in ["Sensor A", "Sensor B", "Sensor C"] {
        sqlx::query("INSERT INTO sensors (name, created_at) VALUES ($1, $2)")
            .bind(name)
            .bind(now)
            .execute(&mut *tx)
            .await?;
    }

    let samples: [(i64, i64, &str, f64); 9] = [
        (1, 3, "temperature", 32.0),
        (1, 3, "humidity", 15.0),
        (1, 3, "precipitation", 35.0),
        (1, 2, "temperature", 15.0),
        (2, 60, "wind speed", 35.0),
        (2, 30, "wind speed", 12.0),
        (2, 30, "temperature", 25.0),
        (3, 30, "temperature", 22.0),
        (3, 15, "temperature", 15.0),
    ];

    for (sensor_id, days_ago, metric_name, metric_value) in samples {
        insert_metric(
            &mut tx,
            sensor_id,
            now - Duration::days(days_ago),
            metric_name,
            metric_value,
        )
        .await?;
    }

    tx.commit().await?;
    tracing::info!("Inserted sample data: 3 sensors, 9 metrics");
    Ok(())
}

async fn insert_metric(
    tx: &mut Transaction<'_, Sqlite>,
    sensor_id: i64,
    created_at: NaiveDateTime,
    metric_name: &str,
    metric_value: f64,
) -> Result<()> {
    // ---
    sqlx::query(
        r#"
        INSERT INTO metrics (sensor_id, created_at, metric_name, metric_value)
        VALUES ($1, $2, $3, $4)
        "#,
    )
    .bind(sensor_id)
    .bind(created_at)
    .bind(metric_name)
    .bind(metric_value)
    .execute(&mut **tx)
    .await?;
    Ok(())
}
