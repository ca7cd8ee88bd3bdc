//! Error taxonomy for the weather metrics API.
//!
//! All domain errors raised by the validation and query layers funnel through
//! [`ApiError`], which maps each variant to an HTTP response at the endpoint
//! boundary. Storage failures never leak their details to the client; they
//! are logged and replaced with a fixed 500 body.

use std::error;
use std::fmt;

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

// ---

/// One validation violation, annotated with the offending field's path
/// (e.g. `query.sensors`, `body.name`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Accumulated validation violations for a single request.
///
/// Validators push every violation they find before failing, so the client
/// sees all problems in one response instead of the first one only.
#[derive(Debug, Default)]
pub struct ValidationErrors(pub Vec<FieldError>);

impl ValidationErrors {
    // ---
    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        // ---
        self.0.push(FieldError {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Convert into a terminal `Err` when any violation was recorded.
    pub fn into_result(self) -> Result<(), ApiError> {
        // ---
        if self.is_empty() {
            Ok(())
        } else {
            Err(ApiError::Validation(self))
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        // ---
        write!(f, "Validation errors:")?;
        for err in &self.0 {
            write!(f, "\nField: {}, Error: {}", err.field, err.message)?;
        }
        Ok(())
    }
}

#[derive(Debug)]
pub enum ApiError {
    /// Malformed or constraint-violating input; always client-caused.
    Validation(ValidationErrors),
    /// Write rejected by a referential constraint.
    Conflict(String),
    /// Valid query with no matching rows after filtering.
    NotFound(String),
    /// Storage failure or other unexpected condition.
    Database(sqlx::Error),
}

impl ApiError {
    /// Fold a JSON body extraction failure (malformed JSON, wrong types,
    /// unknown fields from the closed schemas) into the validation channel
    /// so the client sees the same 422 shape as any other violation.
    pub fn from_body_rejection(rejection: JsonRejection) -> ApiError {
        // ---
        let mut errors = ValidationErrors::default();
        errors.push("body", rejection.body_text());
        ApiError::Validation(errors)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        // ---
        match self {
            ApiError::Validation(errors) => fmt::Display::fmt(errors, f),
            ApiError::Conflict(detail) => write!(f, "Conflict: {}", detail),
            ApiError::NotFound(detail) => write!(f, "Not found: {}", detail),
            ApiError::Database(e) => write!(f, "Database error: {}", e),
        }
    }
}

impl error::Error for ApiError {}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        ApiError::Database(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // ---
        match self {
            ApiError::Validation(errors) => {
                (StatusCode::UNPROCESSABLE_ENTITY, errors.to_string()).into_response()
            }
            ApiError::Conflict(detail) => {
                (StatusCode::CONFLICT, Json(json!({ "detail": detail }))).into_response()
            }
            ApiError::NotFound(detail) => {
                (StatusCode::NOT_FOUND, Json(json!({ "detail": detail }))).into_response()
            }
            ApiError::Database(e) => {
                tracing::error!("Unexpected database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "detail": "Internal server error." })),
                )
                    .into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;

    #[test]
    fn test_validation_errors_display_one_line_per_violation() {
        // ---
        let mut errors = ValidationErrors::default();
        errors.push("query.sensors", "Sensors must be a comma-separated list of integers.");
        errors.push("query.statistic", "Statistic must be one of average, min, max, sum.");

        let rendered = errors.to_string();
        assert_eq!(
            rendered,
            "Validation errors:\n\
             Field: query.sensors, Error: Sensors must be a comma-separated list of integers.\n\
             Field: query.statistic, Error: Statistic must be one of average, min, max, sum."
        );
    }

    #[test]
    fn test_empty_validation_errors_become_ok() {
        // ---
        assert!(ValidationErrors::default().into_result().is_ok());

        let mut errors = ValidationErrors::default();
        errors.push("body.name", "Sensor name must not be empty.");
        assert!(errors.into_result().is_err());
    }
}
