//! Epoch-millisecond timestamps and their ingestion from legacy values.

use super::TaskDomainError;
use chrono::{DateTime, NaiveDate, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Instant in epoch milliseconds.
///
/// Every date field in the task domain uses this single representation.
/// Values outside the range chrono can represent are rejected at
/// construction, so conversions back to calendar types never fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Timestamp(i64);

impl Timestamp {
    /// Creates a timestamp from epoch milliseconds.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::TimestampOutOfRange`] when the value has no
    /// calendar representation.
    pub fn from_millis(millis: i64) -> Result<Self, TaskDomainError> {
        DateTime::from_timestamp_millis(millis)
            .map(|_| Self(millis))
            .ok_or(TaskDomainError::TimestampOutOfRange(millis))
    }

    /// Creates a timestamp from a UTC instant.
    #[must_use]
    pub fn from_datetime(value: DateTime<Utc>) -> Self {
        Self(value.timestamp_millis())
    }

    /// Returns the current instant according to `clock`.
    #[must_use]
    pub fn now(clock: &impl Clock) -> Self {
        Self::from_datetime(clock.utc())
    }

    /// Normalises a date string to a timestamp.
    ///
    /// Accepts RFC 3339 instants, bare `YYYY-MM-DD` dates (midnight UTC) and
    /// digit strings holding epoch milliseconds.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidDate`] when no form matches.
    pub fn parse(value: &str) -> Result<Self, TaskDomainError> {
        let trimmed = value.trim();
        if let Ok(instant) = DateTime::parse_from_rfc3339(trimmed) {
            return Ok(Self::from_datetime(instant.with_timezone(&Utc)));
        }
        if let Some(midnight) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
        {
            return Ok(Self::from_datetime(midnight.and_utc()));
        }
        trimmed
            .parse::<i64>()
            .map_err(|_| TaskDomainError::InvalidDate(value.to_owned()))
            .and_then(Self::from_millis)
    }

    /// Returns the raw epoch milliseconds.
    #[must_use]
    pub const fn millis(self) -> i64 {
        self.0
    }

    /// Returns the instant as a UTC date-time.
    #[must_use]
    pub fn to_utc(self) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(self.0).unwrap_or_default()
    }
}

impl TryFrom<i64> for Timestamp {
    type Error = TaskDomainError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::from_millis(value)
    }
}

impl From<Timestamp> for i64 {
    fn from(value: Timestamp) -> Self {
        value.0
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(value: DateTime<Utc>) -> Self {
        Self::from_datetime(value)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_utc().to_rfc3339())
    }
}
