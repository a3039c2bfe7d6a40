//! Prioritised alert feed over the visible tasks.

use super::{Classifier, DueStatus, Moment, ViewFilter};
use crate::task::domain::{Task, TaskId};
use std::fmt;

/// Alerts shown before the overflow counter takes over.
pub const DIGEST_LIMIT: usize = 5;

/// Rule that raised an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlertKind {
    /// Incomplete task due before today.
    Overdue,
    /// Meeting due today or tomorrow with incomplete preparation.
    MeetingIncomplete,
    /// Non-meeting task due today or tomorrow.
    DueSoon,
}

impl AlertKind {
    /// Returns the stable identifier of the rule.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Overdue => "overdue",
            Self::MeetingIncomplete => "meeting-incomplete",
            Self::DueSoon => "due-soon",
        }
    }

    /// Returns the display rank; lower is shown first.
    #[must_use]
    pub const fn priority(self) -> u8 {
        match self {
            Self::Overdue => 1,
            Self::MeetingIncomplete => 2,
            Self::DueSoon => 3,
        }
    }
}

impl fmt::Display for AlertKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One alert entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    /// Rule that raised the alert.
    pub kind: AlertKind,
    /// Task the alert is about.
    pub task_id: TaskId,
    /// Human-readable message.
    pub message: String,
    /// Further tasks the alert refers to, such as a meeting's open children.
    pub related: Vec<TaskId>,
}

impl Alert {
    /// Returns the display rank of the alert's rule.
    #[must_use]
    pub const fn priority(&self) -> u8 {
        self.kind.priority()
    }
}

/// Builds the alert list for the tasks visible through `filter`.
///
/// Child lookups use the whole of `tasks`, so a meeting's preparation items
/// count even when they sit outside the filter. The result is stably sorted
/// by rule priority; ties keep collection order.
#[must_use]
pub fn generate_alerts(tasks: &[Task], filter: &ViewFilter, moment: &Moment) -> Vec<Alert> {
    let classifier = Classifier::new(tasks, *moment);
    let mut alerts: Vec<Alert> = filter
        .select(tasks)
        .into_iter()
        .filter(|task| !task.is_completed())
        .filter_map(|task| DueStatus::of(task, moment).map(|due| (task, due)))
        .flat_map(|(task, due)| alerts_for(task, &due, &classifier))
        .collect();
    alerts.sort_by_key(Alert::priority);
    alerts
}

fn alerts_for(task: &Task, due: &DueStatus, classifier: &Classifier<'_>) -> Vec<Alert> {
    let mut alerts = Vec::new();
    if due.overdue && !due.due_today {
        let days = due.days_until.unsigned_abs();
        alerts.push(Alert {
            kind: AlertKind::Overdue,
            task_id: task.id().clone(),
            message: format!("\"{}\" is {days} {} overdue", task.text(), plural(days, "day")),
            related: Vec::new(),
        });
    }
    if !due.is_imminent() {
        return alerts;
    }
    let when = if due.due_today { "today" } else { "tomorrow" };
    if task.is_meeting() {
        let open: Vec<TaskId> = classifier
            .incomplete_children(task)
            .iter()
            .map(|child| child.id().clone())
            .collect();
        if !open.is_empty() {
            let count = u64::try_from(open.len()).unwrap_or(u64::MAX);
            alerts.push(Alert {
                kind: AlertKind::MeetingIncomplete,
                task_id: task.id().clone(),
                message: format!(
                    "Meeting \"{}\" {when} has {count} incomplete prep {}",
                    task.text(),
                    plural(count, "item"),
                ),
                related: open,
            });
        }
    } else {
        let at = task
            .due_time()
            .map(|time| format!(" at {time}"))
            .unwrap_or_default();
        alerts.push(Alert {
            kind: AlertKind::DueSoon,
            task_id: task.id().clone(),
            message: format!("\"{}\" is due {when}{at}", task.text()),
            related: Vec::new(),
        });
    }
    alerts
}

pub(crate) fn plural(count: u64, noun: &str) -> String {
    if count == 1 {
        noun.to_owned()
    } else {
        format!("{noun}s")
    }
}

/// Display slice of an alert list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertDigest {
    /// Alerts to display, at most [`DIGEST_LIMIT`].
    pub shown: Vec<Alert>,
    /// Number of alerts left out.
    pub overflow: usize,
}

impl AlertDigest {
    /// Splits `alerts` into the displayed head and an overflow count.
    #[must_use]
    pub fn new(mut alerts: Vec<Alert>) -> Self {
        let overflow = alerts.len().saturating_sub(DIGEST_LIMIT);
        alerts.truncate(DIGEST_LIMIT);
        Self {
            shown: alerts,
            overflow,
        }
    }

    /// Returns whether there is nothing to show.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shown.is_empty()
    }
}
