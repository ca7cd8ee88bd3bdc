//! Metric recording and aggregate query endpoints.

use axum::{
    extract::rejection::JsonRejection, extract::Query, extract::State, http::StatusCode,
    routing::get, routing::post, Json, Router,
};
use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::ApiError;
use crate::models::AggregateRow;
use crate::query;
use crate::validate::{MetricCreate, RawMetricQuery};

// ---

pub fn router() -> Router<SqlitePool> {
    // ---
    Router::new()
        .route("/metrics", post(create_metric))
        .route("/metrics/query", get(query_metrics))
}

/// Handle `POST /metrics`.
///
/// The insert runs in its own transaction; a foreign-key violation (unknown
/// `sensor_id`) rolls it back and surfaces as a 409 conflict. On success the
/// validated payload is echoed back without the stored row's id.
async fn create_metric(
    State(pool): State<SqlitePool>,
    payload: Result<Json<MetricCreate>, JsonRejection>,
) -> Result<(StatusCode, Json<MetricCreate>), ApiError> {
    // ---
    let Json(payload) = payload.map_err(ApiError::from_body_rejection)?;
    let payload = payload.validate()?;

    let mut tx = pool.begin().await?;

    let inserted = sqlx::query(
        r#"
        INSERT INTO metrics (sensor_id, created_at, metric_name, metric_value)
        VALUES ($1, $2, $3, $4)
        "#,
    )
    .bind(payload.sensor_id)
    .bind(Utc::now().naive_utc())
    .bind(&payload.metric_name)
    .bind(payload.metric_value)
    .execute(&mut *tx)
    .await;

    match inserted {
        Ok(_) => {
            tx.commit().await?;
            info!(
                "POST /metrics - recorded '{}' for sensor {}",
                payload.metric_name, payload.sensor_id
            );
            Ok((StatusCode::CREATED, Json(payload)))
        }
        Err(e) if is_foreign_key_violation(&e) => {
            tx.rollback().await?;
            Err(ApiError::Conflict(
                "Integrity error: Sensor id doesn't exist.".to_string(),
            ))
        }
        Err(e) => Err(e.into()),
    }
}

/// Handle `GET /metrics/query`.
///
/// Validation turns the flat query string into a typed filter (or a 422 with
/// every violation listed); the query layer then runs one grouped aggregate
/// read and maps an empty result to 404.
async fn query_metrics(
    State(pool): State<SqlitePool>,
    Query(params): Query<RawMetricQuery>,
) -> Result<Json<Vec<AggregateRow>>, ApiError> {
    // ---
    debug!("GET /metrics/query - params: {:?}", params);

    let filter = params.validate()?;
    let rows = query::run(&pool, &filter).await?;

    info!("GET /metrics/query - returning {} groups", rows.len());
    Ok(Json(rows))
}

// ---

fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    // ---
    err.as_database_error()
        .map(|db| db.is_foreign_key_violation())
        .unwrap_or(false)
}
