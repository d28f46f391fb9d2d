//! Shared domain types and the pure listing engine for the Weat backend.
//!
//! Everything in this crate is IO-free. The HTTP layer feeds raw query
//! parameters into [`query`], rows from the data source through
//! [`relation`], and the combination through [`assemble`]; the admin
//! surface uses [`datetime`] for its strict date-window validation.

use thiserror::Error;

pub mod app_config;
pub mod assemble;
pub mod config;
pub mod datetime;
pub mod geo;
pub mod query;
pub mod relation;
pub mod restaurant;
pub mod tasks;

pub use app_config::{AppConfig, Environment};
pub use assemble::{assemble, total_pages, ListingPage};
pub use config::{load_app_config, load_app_config_from_env};
pub use datetime::{
    parse_iso8601, validate_date_range, DateField, DateRange, DateRangeError, InvalidIso8601,
};
pub use geo::{distance_in, haversine_km, DistanceUnit, EARTH_RADIUS_KM};
pub use query::{ListingQuery, SortDirection, SortKey, SortSpec, DEFAULT_PAGE_SIZE};
pub use relation::{to_one, unwrap_to_one};
pub use restaurant::{Address, Coordinate, Restaurant, ReviewSummary};
pub use tasks::{TaskRun, TaskStatusCount};

/// Configuration loading failure.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
