//! SQLite storage layer.
//!
//! Repository implementations backed by SQLite with WAL mode and split
//! read/write connection pools.

pub mod feedback;
pub mod pool;
pub mod turn;

use chrono::{DateTime, Utc};

use parley_types::error::RepositoryError;

/// Parse an RFC 3339 timestamp column into a UTC datetime.
pub(crate) fn parse_datetime(s: &str) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::Query(format!("invalid timestamp '{s}': {e}")))
}
