//! Frozen clock shared by integration tests.

use chrono::{DateTime, Local, Utc};
use mockable::Clock;

/// Instant the scenarios treat as "now": Tuesday 2026-03-10, 12:00 UTC.
pub const NOW: &str = "2026-03-10T12:00:00Z";

/// Clock frozen at [`NOW`].
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(DateTime<Utc>);

impl FixedClock {
    /// Creates a clock frozen at [`NOW`].
    pub fn at_now() -> Self {
        Self(
            DateTime::parse_from_rfc3339(NOW)
                .expect("fixed instant parses")
                .to_utc(),
        )
    }

    /// Returns the frozen instant.
    pub const fn instant(&self) -> DateTime<Utc> {
        self.0
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}
