//! Evaluation instant shared by every derived view.

use crate::task::domain::Timestamp;
use chrono::{DateTime, Days, FixedOffset, NaiveDate, Utc};
use mockable::Clock;

/// "Now" together with the UTC offset that defines calendar days.
///
/// Every derived view is computed against one `Moment`, so a single render
/// never straddles midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Moment {
    now: DateTime<FixedOffset>,
}

impl Moment {
    /// Creates a moment from a zoned instant.
    #[must_use]
    pub const fn new(now: DateTime<FixedOffset>) -> Self {
        Self { now }
    }

    /// Creates a moment whose calendar days are UTC days.
    #[must_use]
    pub fn at_utc(now: DateTime<Utc>) -> Self {
        Self::new(now.fixed_offset())
    }

    /// Reads the clock and places it at `offset`.
    #[must_use]
    pub fn from_clock(clock: &impl Clock, offset: FixedOffset) -> Self {
        Self::new(clock.utc().with_timezone(&offset))
    }

    /// Returns the instant as a timestamp.
    #[must_use]
    pub fn timestamp(&self) -> Timestamp {
        Timestamp::from_datetime(self.now.to_utc())
    }

    /// Returns the zoned instant.
    #[must_use]
    pub const fn now(&self) -> DateTime<FixedOffset> {
        self.now
    }

    /// Returns today's calendar date.
    #[must_use]
    pub fn today(&self) -> NaiveDate {
        self.now.date_naive()
    }

    /// Returns tomorrow's calendar date.
    #[must_use]
    pub fn tomorrow(&self) -> NaiveDate {
        self.today()
            .checked_add_days(Days::new(1))
            .unwrap_or(NaiveDate::MAX)
    }

    /// Returns the calendar date of `at` in this moment's offset.
    #[must_use]
    pub fn date_of(&self, at: Timestamp) -> NaiveDate {
        at.to_utc().with_timezone(&self.now.timezone()).date_naive()
    }

    /// Returns whole calendar days from today to the date of `at`.
    ///
    /// Negative for past dates.
    #[must_use]
    pub fn days_until(&self, at: Timestamp) -> i64 {
        self.date_of(at)
            .signed_duration_since(self.today())
            .num_days()
    }

    /// Returns whole elapsed days from `at` to now, truncated.
    #[must_use]
    pub fn days_since(&self, at: Timestamp) -> i64 {
        self.now
            .to_utc()
            .signed_duration_since(at.to_utc())
            .num_days()
    }

    /// Returns whether `at` has been reached.
    #[must_use]
    pub fn has_reached(&self, at: Timestamp) -> bool {
        at <= self.timestamp()
    }
}
