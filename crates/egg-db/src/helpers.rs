//! Row-to-entity parsing helpers.
//!
//! Timestamps are stored as unix seconds and platform ids as signed
//! INTEGERs. These helpers isolate the conversions so every query maps
//! columns the same way.

use chrono::{DateTime, Utc};

use egg_core::enums::Priority;

use crate::error::DatabaseError;

/// Convert a stored unix timestamp to `DateTime<Utc>`.
///
/// # Errors
///
/// Returns `DatabaseError::InvalidState` if the value is out of range.
pub fn parse_timestamp(secs: i64) -> Result<DateTime<Utc>, DatabaseError> {
    DateTime::from_timestamp(secs, 0)
        .ok_or_else(|| DatabaseError::InvalidState(format!("timestamp {secs} is out of range")))
}

/// Convert a stored `closed_at` value. `0` and NULL both mean open.
///
/// # Errors
///
/// Returns `DatabaseError::InvalidState` if a non-zero value is out of range.
pub fn parse_closed_at(secs: Option<i64>) -> Result<Option<DateTime<Utc>>, DatabaseError> {
    match secs {
        Some(secs) if secs != 0 => Ok(Some(parse_timestamp(secs)?)),
        _ => Ok(None),
    }
}

/// Value stored in `closed_at` for an optional close time.
///
/// `0` marks an open item, so a close time must lie after the unix epoch.
///
/// # Errors
///
/// Returns `DatabaseError::InvalidState` for close times at or before the epoch.
pub fn closed_at_value(closed_at: Option<DateTime<Utc>>) -> Result<i64, DatabaseError> {
    match closed_at {
        None => Ok(0),
        Some(dt) if dt.timestamp() > 0 => Ok(dt.timestamp()),
        Some(dt) => Err(DatabaseError::InvalidState(format!(
            "close time {dt} is not after the unix epoch"
        ))),
    }
}

/// Convert a platform id to the signed INTEGER stored in SQLite.
///
/// # Errors
///
/// Returns `DatabaseError::InvalidState` for ids above `i64::MAX`.
pub fn to_sql_id(id: u64) -> Result<i64, DatabaseError> {
    i64::try_from(id)
        .map_err(|_| DatabaseError::InvalidState(format!("id {id} does not fit in an INTEGER")))
}

/// Convert a stored INTEGER back to a platform id.
///
/// # Errors
///
/// Returns `DatabaseError::InvalidState` for negative values.
pub fn from_sql_id(value: i64) -> Result<u64, DatabaseError> {
    u64::try_from(value)
        .map_err(|_| DatabaseError::InvalidState(format!("stored id {value} is negative")))
}

/// Decode the `priority` column.
///
/// # Errors
///
/// Returns `DatabaseError::InvalidState` for values outside the known range.
pub fn parse_priority(value: i64) -> Result<Priority, DatabaseError> {
    Priority::from_i64(value).map_err(|e| DatabaseError::InvalidState(e.to_string()))
}
