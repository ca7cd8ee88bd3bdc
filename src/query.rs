//! Grouped aggregation over stored metrics.
//!
//! Translates a validated [`MetricQuery`] into one parameterized SQL
//! statement: filter by sensor set, metric-name set, and inclusive time
//! range, group by `(sensor_id, metric_name)`, and compute the requested
//! aggregate per group.

use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use crate::error::ApiError;
use crate::models::AggregateRow;
use crate::validate::MetricQuery;

// ---

#[derive(Debug, sqlx::FromRow)]
struct GroupedAggregate {
    sensor_id: i64,
    metric_name: String,
    value: f64,
}

/// Run the grouped aggregation for a validated query.
///
/// Rows are ordered by `(sensor_id, metric_name)` for deterministic output.
/// An empty result set is reported as [`ApiError::NotFound`] so callers can
/// tell "no data in range" apart from a valid empty collection.
pub async fn run(pool: &SqlitePool, query: &MetricQuery) -> Result<Vec<AggregateRow>, ApiError> {
    // ---
    // The validated lists are never empty: even a bare `sensors=` parameter
    // yields one token, and a bad token fails validation. So the IN lists
    // below always contain at least one bind.
    let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new("SELECT sensor_id, metric_name, ");
    builder.push(query.statistic.sql_aggregate());
    builder.push(" AS value FROM metrics WHERE sensor_id IN (");

    let mut ids = builder.separated(", ");
    for sensor_id in &query.sensors {
        ids.push_bind(*sensor_id);
    }

    builder.push(") AND metric_name IN (");
    let mut names = builder.separated(", ");
    for name in &query.metrics {
        names.push_bind(name.as_str());
    }

    builder.push(") AND created_at >= ");
    builder.push_bind(query.date_from);
    builder.push(" AND created_at <= ");
    builder.push_bind(query.date_to);
    builder.push(" GROUP BY sensor_id, metric_name ORDER BY sensor_id, metric_name");

    let groups: Vec<GroupedAggregate> = builder.build_query_as().fetch_all(pool).await?;

    if groups.is_empty() {
        return Err(ApiError::NotFound(
            "No data found for the given query.".to_string(),
        ));
    }

    Ok(groups
        .into_iter()
        .map(|g| AggregateRow::new(g.sensor_id, g.metric_name, query.statistic, g.value))
        .collect())
}
