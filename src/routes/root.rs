// src/routes/root.rs
//! Root endpoint for the weather metrics API.
//!
//! A trivial descriptive response with no business logic, useful for a quick
//! "is it up" check from a browser or curl. It is a sibling module in the
//! `routes` directory; the gateway (`mod.rs`) merges its subrouter so that
//! `main.rs` does not need to know about individual endpoints.

use axum::{routing::get, Json, Router};
use serde::Serialize;

/// JSON response body for the `/` endpoint.
#[derive(Serialize)]
struct RootResponse {
    message: &'static str,
}

/// Handle `GET /`.
///
/// Returns a static JSON object describing the service. This endpoint is
/// deliberately lightweight and does not touch the database.
async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Welcome to the weather metrics REST API.",
    })
}

/// Create a subrouter containing the `/` route.
///
/// This router is generic over the application state so it can merge cleanly
/// with the gateway router, regardless of the state type.
pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/", get(root))
}
