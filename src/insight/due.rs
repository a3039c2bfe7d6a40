//! Due-date classification and the compact due label.

use super::Moment;
use crate::task::domain::{Task, Timestamp};
use chrono::NaiveDate;
use std::fmt;

/// Labels switch from a day count to a date beyond this many days.
pub const DAY_COUNT_HORIZON: i64 = 7;

/// Calendar position of one due date relative to a moment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DueStatus {
    /// Incomplete and due before the start of today.
    pub overdue: bool,
    /// Due on today's calendar date.
    pub due_today: bool,
    /// Due on tomorrow's calendar date.
    pub due_tomorrow: bool,
    /// Calendar days from today to the due date; negative when past.
    pub days_until: i64,
    date: NaiveDate,
}

impl DueStatus {
    /// Classifies a due timestamp for a task with the given completion.
    #[must_use]
    pub fn classify(due: Timestamp, completed: bool, moment: &Moment) -> Self {
        let date = moment.date_of(due);
        Self {
            overdue: !completed && date < moment.today(),
            due_today: date == moment.today(),
            due_tomorrow: date == moment.tomorrow(),
            days_until: moment.days_until(due),
            date,
        }
    }

    /// Classifies `task`, or returns `None` when it has no due date.
    ///
    /// A meeting's due date is its scheduled date and time.
    #[must_use]
    pub fn of(task: &Task, moment: &Moment) -> Option<Self> {
        task.due_date()
            .map(|due| Self::classify(due, task.is_completed(), moment))
    }

    /// Returns whether the date is today or tomorrow.
    #[must_use]
    pub const fn is_imminent(&self) -> bool {
        self.due_today || self.due_tomorrow
    }

    /// Returns the calendar date of the due timestamp.
    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.date
    }

    /// Returns the display label.
    ///
    /// Today and tomorrow win over overdue, so a timestamp earlier today
    /// still reads "Today".
    #[must_use]
    pub const fn label(&self) -> DueLabel {
        if self.due_today {
            DueLabel::Today
        } else if self.due_tomorrow {
            DueLabel::Tomorrow
        } else if self.overdue {
            DueLabel::Overdue
        } else if self.days_until <= DAY_COUNT_HORIZON {
            DueLabel::InDays(self.days_until)
        } else {
            DueLabel::Date(self.date)
        }
    }
}

/// Short due indicator shown next to a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DueLabel {
    /// Due today.
    Today,
    /// Due tomorrow.
    Tomorrow,
    /// Due before today and incomplete.
    Overdue,
    /// Due within the day-count horizon.
    InDays(i64),
    /// Due further out.
    Date(NaiveDate),
}

impl fmt::Display for DueLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Today => f.write_str("Today"),
            Self::Tomorrow => f.write_str("Tomorrow"),
            Self::Overdue => f.write_str("Overdue"),
            Self::InDays(days) => write!(f, "{days}d"),
            Self::Date(date) => write!(f, "{}", date.format("%b %-d")),
        }
    }
}
