use axum::Router;
use sqlx::SqlitePool;

mod metrics;
mod root;
mod sensors;

// ---

pub fn router(pool: SqlitePool) -> Router {
    // ---
    Router::new()
        .merge(root::router())
        .merge(sensors::router())
        .merge(metrics::router())
        .with_state(pool)
}
