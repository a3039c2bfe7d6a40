//! Fixed clock and task builders shared by unit tests.

use crate::insight::Moment;
use crate::task::domain::{Task, TaskDraft, Timestamp, Workspace};
use chrono::{DateTime, Duration, Local, Utc};
use mockable::Clock;
use rstest::fixture;

/// Instant every unit test treats as "now": Tuesday 2026-03-10, 12:00 UTC.
pub(crate) const NOW: &str = "2026-03-10T12:00:00Z";

/// Clock frozen at one instant.
#[derive(Debug, Clone, Copy)]
pub(crate) struct FixedClock(DateTime<Utc>);

impl FixedClock {
    pub(crate) const fn new(at: DateTime<Utc>) -> Self {
        Self(at)
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

pub(crate) fn now() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(NOW)
        .expect("fixed instant parses")
        .to_utc()
}

#[fixture]
pub(crate) fn clock() -> FixedClock {
    FixedClock::new(now())
}

#[fixture]
pub(crate) fn moment() -> Moment {
    Moment::at_utc(now())
}

/// Timestamp `hours` away from [`NOW`]; negative values lie in the past.
pub(crate) fn hours_from_now(hours: i64) -> Timestamp {
    Timestamp::from_datetime(now() + Duration::hours(hours))
}

/// Timestamp at the same time of day `days` away from [`NOW`].
pub(crate) fn days_from_now(days: i64) -> Timestamp {
    hours_from_now(days * 24)
}

pub(crate) fn draft(text: &str) -> TaskDraft {
    TaskDraft::new(text, Workspace::Personal)
}

/// Builds a task created at [`NOW`].
pub(crate) fn task(draft: TaskDraft) -> Task {
    Task::new(draft, &clock()).expect("draft is valid")
}

/// Builds a task created `days` before [`NOW`].
pub(crate) fn task_created_days_ago(draft: TaskDraft, days: i64) -> Task {
    let created = FixedClock::new(now() - Duration::days(days));
    Task::new(draft, &created).expect("draft is valid")
}

pub(crate) fn completed(mut task: Task) -> Task {
    task.toggle_completion();
    task
}

pub(crate) fn child_of(parent: &Task, mut child: Task) -> Task {
    child.set_parent(Some(parent.id().clone()));
    child
}
