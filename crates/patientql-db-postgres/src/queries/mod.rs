//! SQL query implementations for the PostgreSQL storage backend.
//!
//! Every function here issues exactly one statement against the pool.
//! Timestamps cross the driver as chrono values and are converted to
//! `time::OffsetDateTime` at this boundary.

use chrono::{DateTime, Utc};
use time::OffsetDateTime;

use patientql_storage::StorageError;

pub mod patient;
pub mod post;

/// Converts chrono DateTime to time OffsetDateTime.
pub(crate) fn chrono_to_time(dt: DateTime<Utc>) -> Result<OffsetDateTime, StorageError> {
    let nanos = i128::from(dt.timestamp()) * 1_000_000_000 + i128::from(dt.timestamp_subsec_nanos());
    OffsetDateTime::from_unix_timestamp_nanos(nanos).map_err(|e| {
        StorageError::internal(format!("stored timestamp {dt} is out of range: {e}"))
    })
}

/// Converts time OffsetDateTime to chrono DateTime.
pub(crate) fn time_to_chrono(dt: OffsetDateTime) -> Result<DateTime<Utc>, StorageError> {
    DateTime::from_timestamp(dt.unix_timestamp(), dt.nanosecond()).ok_or_else(|| {
        StorageError::invalid_input(format!("timestamp {dt} is out of range for the database"))
    })
}
