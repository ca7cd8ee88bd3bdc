//! Sensor registration endpoint.

use axum::{
    extract::rejection::JsonRejection, extract::State, http::StatusCode, routing::post, Json,
    Router,
};
use chrono::Utc;
use sqlx::SqlitePool;
use tracing::info;

use crate::error::ApiError;
use crate::models::SensorRecord;
use crate::validate::SensorCreate;

// ---

pub fn router() -> Router<SqlitePool> {
    // ---
    Router::new().route("/sensors", post(create_sensor))
}

/// Handle `POST /sensors`.
///
/// Validates the payload, inserts the sensor in its own transaction, and
/// returns the stored row including the assigned id and timestamp.
async fn create_sensor(
    State(pool): State<SqlitePool>,
    payload: Result<Json<SensorCreate>, JsonRejection>,
) -> Result<(StatusCode, Json<SensorRecord>), ApiError> {
    // ---
    let Json(payload) = payload.map_err(ApiError::from_body_rejection)?;
    let payload = payload.validate()?;

    let mut tx = pool.begin().await?;

    let created: SensorRecord = sqlx::query_as(
        r#"
        INSERT INTO sensors (name, created_at)
        VALUES ($1, $2)
        RETURNING sensor_id, name, created_at
        "#,
    )
    .bind(&payload.name)
    .bind(Utc::now().naive_utc())
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;

    info!("POST /sensors - created sensor {}", created.sensor_id);
    Ok((StatusCode::CREATED, Json(created)))
}
