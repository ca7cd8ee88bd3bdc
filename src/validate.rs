//! Request-shape validation for the three inbound shapes.
//!
//! Each shape deserializes into a raw struct and is then validated into a
//! typed value, or into an aggregated [`ValidationErrors`] list so the client
//! sees every violation at once. Individual fields short-circuit after their
//! first failure; the aggregation happens across fields.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ValidationErrors};
use crate::models::Statistic;

// ---

/// Body of `POST /sensors`. Unknown fields are rejected at deserialization.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SensorCreate {
    pub name: String,
}

impl SensorCreate {
    /// Trim the name and reject an empty result.
    pub fn validate(mut self) -> Result<Self, ApiError> {
        // ---
        let mut errors = ValidationErrors::default();

        let trimmed = self.name.trim();
        if trimmed.is_empty() {
            errors.push("body.name", "Sensor name must not be empty.");
        } else {
            self.name = trimmed.to_string();
        }

        errors.into_result()?;
        Ok(self)
    }
}

/// Body of `POST /metrics`. Unknown fields are rejected at deserialization.
///
/// Also serves as the creation response shape: the stored row's id is not
/// echoed back, only these three fields.
#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MetricCreate {
    pub sensor_id: i64,
    pub metric_name: String,
    pub metric_value: f64,
}

impl MetricCreate {
    /// Trim the metric name and reject an empty result.
    pub fn validate(mut self) -> Result<Self, ApiError> {
        // ---
        let mut errors = ValidationErrors::default();

        let trimmed = self.metric_name.trim();
        if trimmed.is_empty() {
            errors.push("body.metric_name", "Metric name must not be empty.");
        } else {
            self.metric_name = trimmed.to_string();
        }

        errors.into_result()?;
        Ok(self)
    }
}

// ---

/// Raw query-string parameters of `GET /metrics/query`.
///
/// Everything arrives as a flat optional string; missing required parameters
/// are reported through the same aggregated channel as malformed ones, so the
/// extractor itself never rejects.
#[derive(Debug, Default, Deserialize)]
pub struct RawMetricQuery {
    pub sensors: Option<String>,
    pub metrics: Option<String>,
    pub statistic: Option<String>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
}

/// Validated metric query filter.
#[derive(Debug)]
pub struct MetricQuery {
    pub sensors: Vec<i64>,
    pub metrics: Vec<String>,
    pub statistic: Statistic,
    pub date_from: NaiveDateTime,
    pub date_to: NaiveDateTime,
}

impl RawMetricQuery {
    /// Validate all parameters, aggregating every violation found.
    pub fn validate(self) -> Result<MetricQuery, ApiError> {
        // ---
        let mut errors = ValidationErrors::default();

        let sensors = match &self.sensors {
            None => {
                errors.push("query.sensors", "Field required");
                Vec::new()
            }
            Some(raw) => match parse_sensor_list(raw) {
                Ok(ids) => ids,
                Err(message) => {
                    errors.push("query.sensors", message);
                    Vec::new()
                }
            },
        };

        // Tokens are trimmed and lower-cased; emptiness is deliberately not
        // checked here, unlike metric creation. An empty token simply matches
        // nothing at read time.
        let metrics: Vec<String> = match &self.metrics {
            None => {
                errors.push("query.metrics", "Field required");
                Vec::new()
            }
            Some(raw) => raw.split(',').map(|t| t.trim().to_lowercase()).collect(),
        };

        let statistic = match &self.statistic {
            None => {
                errors.push("query.statistic", "Field required");
                None
            }
            Some(raw) => {
                let token = raw.to_lowercase();
                match Statistic::parse(&token) {
                    Some(stat) => Some(stat),
                    None => {
                        errors.push("query.statistic", statistic_message());
                        None
                    }
                }
            }
        };

        // The both-or-neither rule runs before either date string is parsed.
        let mut date_from = None;
        let mut date_to = None;
        match (&self.date_from, &self.date_to) {
            (None, None) => {
                // Default window: the current UTC day, ending at minute
                // precision (23:59:00). The last minute of the day falls
                // outside this default.
                let today = Utc::now().date_naive();
                date_from = Some(today.and_time(NaiveTime::MIN));
                date_to = today.and_hms_opt(23, 59, 0);
            }
            (Some(_), None) | (None, Some(_)) => {
                errors.push(
                    "query.date_from",
                    "Both date_from and date_to must be provided together.",
                );
            }
            (Some(from), Some(to)) => {
                match parse_iso_datetime(from) {
                    Ok(dt) => date_from = Some(dt),
                    Err(message) => errors.push("query.date_from", message),
                }
                match parse_iso_datetime(to) {
                    Ok(dt) => date_to = Some(dt),
                    Err(message) => errors.push("query.date_to", message),
                }
            }
        }

        // Every missing piece has recorded a violation above.
        if let (true, Some(statistic), Some(date_from), Some(date_to)) =
            (errors.is_empty(), statistic, date_from, date_to)
        {
            Ok(MetricQuery {
                sensors,
                metrics,
                statistic,
                date_from,
                date_to,
            })
        } else {
            Err(ApiError::Validation(errors))
        }
    }
}

// ---

fn parse_sensor_list(raw: &str) -> Result<Vec<i64>, &'static str> {
    // ---
    raw.split(',')
        .map(|token| token.trim().parse::<i64>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| "Sensors must be a comma-separated list of integers.")
}

fn statistic_message() -> String {
    // ---
    let allowed: Vec<&str> = Statistic::ALL.iter().map(|s| s.as_str()).collect();
    format!("Statistic must be one of {}.", allowed.join(", "))
}

/// Parse an ISO-8601 date (`YYYY-MM-DD`, midnight) or datetime, accepting
/// both `T` and space separators and optional seconds.
fn parse_iso_datetime(raw: &str) -> Result<NaiveDateTime, &'static str> {
    // ---
    if let Ok(date) = raw.parse::<NaiveDate>() {
        return Ok(date.and_time(NaiveTime::MIN));
    }
    if let Ok(dt) = raw.parse::<NaiveDateTime>() {
        return Ok(dt);
    }
    for format in [
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M",
    ] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(dt);
        }
    }
    Err("Date must be in ISO format YYYY-MM-DD.")
}
