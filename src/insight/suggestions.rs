//! Advisory suggestions, computed independently from alerts.
//!
//! Each rule yields [`Finding`]s. Messages are rendered from findings only,
//! so [`suggestion_count`] and [`smart_suggestions`] always agree.

use super::{DueStatus, Moment, ViewFilter, alerts::plural};
use crate::task::domain::{Task, TaskId, TaskType};
use serde::Serialize;

/// Age in days from which an open task counts as stale.
pub const STALE_AFTER_DAYS: i64 = 7;
/// Stale findings emitted at most.
pub const STALE_LIMIT: usize = 2;
/// A head start is offered while at most this many tasks are due today.
pub const HEAD_START_MAX_DUE_TODAY: usize = 2;
/// Days-until window for head-start candidates.
pub const HEAD_START_WINDOW: std::ops::RangeInclusive<i64> = 3..=5;
/// Days-until window for deliverable deadlines.
pub const DELIVERABLE_WINDOW: std::ops::RangeInclusive<i64> = 1..=3;
/// Open quick wins needed before suggesting a batch.
pub const QUICK_WIN_THRESHOLD: usize = 3;
/// Tasks due on one day that make it heavy.
pub const HEAVY_DAY_THRESHOLD: usize = 5;
/// Days ahead scanned for load balancing.
pub const REBALANCE_HORIZON: i64 = 7;

/// Rule behind a suggestion, ordered by display weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SuggestionKind {
    /// Deliverable due within a few days.
    DeliverableDeadline,
    /// Quiet day; start something due soon.
    HeadStart,
    /// Task open for a week or more.
    Stale,
    /// Empty day next to an overloaded one.
    LightDay,
    /// Several quick wins open.
    QuickWins,
}

impl SuggestionKind {
    /// Returns the display weight; lower is shown first.
    #[must_use]
    pub const fn weight(self) -> u8 {
        match self {
            Self::DeliverableDeadline => 1,
            Self::HeadStart => 2,
            Self::Stale => 3,
            Self::LightDay => 4,
            Self::QuickWins => 5,
        }
    }
}

/// Structured outcome of one suggestion rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Finding<'a> {
    /// An open task created `days` ago.
    Stale {
        /// The stale task.
        task: &'a Task,
        /// Whole days since creation.
        days: i64,
    },
    /// A task to start early.
    HeadStart {
        /// The candidate task.
        task: &'a Task,
        /// Calendar days until it is due.
        days: i64,
    },
    /// Day offsets worth rebalancing.
    LightDay {
        /// First day offset with nothing due, counted from tomorrow as 1.
        light: i64,
        /// First day offset with a heavy load.
        heavy: i64,
        /// Tasks due on the heavy day.
        heavy_count: usize,
    },
    /// Open quick wins.
    QuickWins {
        /// How many are open.
        count: usize,
    },
    /// A deliverable closing in.
    DeliverableDeadline {
        /// The deliverable.
        task: &'a Task,
        /// Calendar days until it is due.
        days: i64,
    },
}

impl Finding<'_> {
    /// Returns the rule that produced the finding.
    #[must_use]
    pub const fn kind(&self) -> SuggestionKind {
        match self {
            Self::Stale { .. } => SuggestionKind::Stale,
            Self::HeadStart { .. } => SuggestionKind::HeadStart,
            Self::LightDay { .. } => SuggestionKind::LightDay,
            Self::QuickWins { .. } => SuggestionKind::QuickWins,
            Self::DeliverableDeadline { .. } => SuggestionKind::DeliverableDeadline,
        }
    }

    /// Returns the task the finding names, if any.
    #[must_use]
    pub fn task_id(&self) -> Option<&TaskId> {
        match self {
            Self::Stale { task, .. }
            | Self::HeadStart { task, .. }
            | Self::DeliverableDeadline { task, .. } => Some(task.id()),
            Self::LightDay { .. } | Self::QuickWins { .. } => None,
        }
    }

    /// Renders the user-facing message.
    #[must_use]
    pub fn message(&self) -> String {
        match *self {
            Self::Stale { task, days } => format!(
                "\"{}\" has been open for {days} days. Break it down or let it go?",
                task.text()
            ),
            Self::HeadStart { task, days } => format!(
                "Light load today. Get a head start on \"{}\", due in {days} days",
                task.text()
            ),
            Self::LightDay {
                light,
                heavy,
                heavy_count,
            } => format!(
                "Day {light} is clear while day {heavy} has {heavy_count} tasks due. Consider moving some work"
            ),
            Self::QuickWins { count } => {
                format!("{count} quick wins are waiting. Knock a few out for momentum")
            }
            Self::DeliverableDeadline { task, days } => {
                let unit = plural(u64::try_from(days).unwrap_or_default(), "day");
                format!("Deliverable \"{}\" is due in {days} {unit}", task.text())
            }
        }
    }
}

/// A rendered suggestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    /// Rule that produced it.
    pub kind: SuggestionKind,
    /// Task it names, if any.
    pub task_id: Option<TaskId>,
    /// User-facing message.
    pub message: String,
}

impl From<&Finding<'_>> for Suggestion {
    fn from(finding: &Finding<'_>) -> Self {
        Self {
            kind: finding.kind(),
            task_id: finding.task_id().cloned(),
            message: finding.message(),
        }
    }
}

/// Evaluates every rule over the open tasks visible through `filter`.
///
/// Findings are stably sorted by rule weight.
#[must_use]
pub fn findings<'a>(tasks: &'a [Task], filter: &ViewFilter, moment: &Moment) -> Vec<Finding<'a>> {
    let open: Vec<(&Task, Option<DueStatus>)> = filter
        .select(tasks)
        .into_iter()
        .filter(|task| !task.is_completed())
        .map(|task| (task, DueStatus::of(task, moment)))
        .collect();

    let mut found = Vec::new();
    found.extend(stale(&open, moment));
    found.extend(head_start(&open));
    found.extend(light_day(&open));
    found.extend(quick_wins(&open));
    found.extend(deliverable_deadline(&open));
    found.sort_by_key(|finding| finding.kind().weight());
    found
}

/// Renders the suggestions for the tasks visible through `filter`.
#[must_use]
pub fn smart_suggestions(tasks: &[Task], filter: &ViewFilter, moment: &Moment) -> Vec<Suggestion> {
    findings(tasks, filter, moment)
        .iter()
        .map(Suggestion::from)
        .collect()
}

/// Counts the suggestions without rendering them.
#[must_use]
pub fn suggestion_count(tasks: &[Task], filter: &ViewFilter, moment: &Moment) -> usize {
    findings(tasks, filter, moment).len()
}

type OpenTask<'a> = (&'a Task, Option<DueStatus>);

fn days_until(entry: &OpenTask<'_>) -> Option<i64> {
    entry.1.map(|due| due.days_until)
}

fn stale<'a>(open: &[OpenTask<'a>], moment: &Moment) -> Vec<Finding<'a>> {
    open.iter()
        .filter_map(|&(task, _)| {
            let days = moment.days_since(task.created_at());
            (days >= STALE_AFTER_DAYS).then_some(Finding::Stale { task, days })
        })
        .take(STALE_LIMIT)
        .collect()
}

fn head_start<'a>(open: &[OpenTask<'a>]) -> Option<Finding<'a>> {
    let due_today = open
        .iter()
        .filter(|(_, due)| due.is_some_and(|due| due.due_today))
        .count();
    if due_today > HEAD_START_MAX_DUE_TODAY {
        return None;
    }
    open.iter().find_map(|entry| {
        days_until(entry)
            .filter(|days| HEAD_START_WINDOW.contains(days))
            .map(|days| Finding::HeadStart { task: entry.0, days })
    })
}

fn light_day<'a>(open: &[OpenTask<'a>]) -> Option<Finding<'a>> {
    let loads: Vec<(i64, usize)> = (1..=REBALANCE_HORIZON)
        .map(|offset| {
            let count = open
                .iter()
                .filter(|entry| days_until(entry) == Some(offset))
                .count();
            (offset, count)
        })
        .collect();
    let light = loads.iter().find(|(_, count)| *count == 0)?;
    let heavy = loads
        .iter()
        .find(|(_, count)| *count >= HEAVY_DAY_THRESHOLD)?;
    Some(Finding::LightDay {
        light: light.0,
        heavy: heavy.0,
        heavy_count: heavy.1,
    })
}

fn quick_wins<'a>(open: &[OpenTask<'a>]) -> Option<Finding<'a>> {
    let count = open
        .iter()
        .filter(|(task, _)| task.task_type() == TaskType::QuickWin)
        .count();
    (count >= QUICK_WIN_THRESHOLD).then_some(Finding::QuickWins { count })
}

fn deliverable_deadline<'a>(open: &[OpenTask<'a>]) -> Option<Finding<'a>> {
    open.iter()
        .filter(|(task, _)| task.task_type() == TaskType::Deliverable)
        .find_map(|entry| {
            days_until(entry)
                .filter(|days| DELIVERABLE_WINDOW.contains(days))
                .map(|days| Finding::DeliverableDeadline { task: entry.0, days })
        })
}
