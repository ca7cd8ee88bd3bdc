//! Library crate for the `weather-metrics` REST service.
//!
//! This is the module gateway: the binary (`main.rs`) and the integration
//! tests both build the application from the pieces exported here, so neither
//! needs knowledge of individual submodules beyond this boundary.

pub mod config;
pub mod error;
pub mod models;
pub mod query;
pub mod routes;
pub mod schema;
pub mod seed;
pub mod validate;

pub use config::Config;
pub use error::{ApiError, ValidationErrors};
pub use models::{AggregateRow, SensorRecord, Statistic};
