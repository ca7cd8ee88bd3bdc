//! Simple data models for the weather metrics service.

use chrono::NaiveDateTime;
use serde::Serialize;

// ---

/// A stored sensor row, returned verbatim by `POST /sensors`.
#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct SensorRecord {
    // ---
    pub sensor_id: i64,
    pub name: String,
    pub created_at: NaiveDateTime,
}

/// Aggregation requested by the query endpoint.
///
/// Parsed from the `statistic` query parameter before any SQL is built, so
/// the aggregate table below is only reachable with a recognized value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Statistic {
    Average,
    Min,
    Max,
    Sum,
}

impl Statistic {
    // ---
    pub const ALL: [Statistic; 4] = [
        Statistic::Average,
        Statistic::Min,
        Statistic::Max,
        Statistic::Sum,
    ];

    /// Parse an already lower-cased token.
    pub fn parse(token: &str) -> Option<Statistic> {
        // ---
        match token {
            "average" => Some(Statistic::Average),
            "min" => Some(Statistic::Min),
            "max" => Some(Statistic::Max),
            "sum" => Some(Statistic::Sum),
            _ => None,
        }
    }

    /// Name used both as the query-parameter value and as the response key.
    pub fn as_str(&self) -> &'static str {
        // ---
        match self {
            Statistic::Average => "average",
            Statistic::Min => "min",
            Statistic::Max => "max",
            Statistic::Sum => "sum",
        }
    }

    /// SQL aggregate expression over the metric value column.
    pub fn sql_aggregate(&self) -> &'static str {
        // ---
        match self {
            Statistic::Average => "AVG(metric_value)",
            Statistic::Min => "MIN(metric_value)",
            Statistic::Max => "MAX(metric_value)",
            Statistic::Sum => "SUM(metric_value)",
        }
    }
}

/// One grouped row returned by `GET /metrics/query`.
///
/// Exactly one of the four statistic fields is populated; the unset ones are
/// omitted from the serialized shape rather than rendered as null.
#[derive(Debug, Serialize)]
pub struct AggregateRow {
    // ---
    pub sensor_id: i64,
    pub metric_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sum: Option<f64>,
}

impl AggregateRow {
    /// Build a row with the given statistic's field populated.
    pub fn new(sensor_id: i64, metric_name: String, statistic: Statistic, value: f64) -> Self {
        // ---
        let mut row = AggregateRow {
            sensor_id,
            metric_name,
            average: None,
            min: None,
            max: None,
            sum: None,
        };
        match statistic {
            Statistic::Average => row.average = Some(value),
            Statistic::Min => row.min = Some(value),
            Statistic::Max => row.max = Some(value),
            Statistic::Sum => row.sum = Some(value),
        }
        row
    }
}
