//! Completion metrics over a filtered view.
//!
//! Every percentage is rounded half up in integer arithmetic and lies in
//! `0..=100`. A zero denominator yields 0.

use super::{BlockedReason, Classifier, DueStatus, Moment, ViewFilter};
use crate::task::domain::{Task, TaskType};
use serde::Serialize;

/// A count out of a total.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Ratio {
    /// Counted items.
    pub count: usize,
    /// Items counted against.
    pub total: usize,
}

impl Ratio {
    /// Creates a ratio.
    #[must_use]
    pub const fn new(count: usize, total: usize) -> Self {
        Self { count, total }
    }

    /// Returns `round(100 * count / total)`, or 0 when `total` is 0.
    #[must_use]
    pub fn percentage(&self) -> u8 {
        percentage(self.count, self.total)
    }
}

/// Returns `round(100 * numerator / denominator)` clamped to `0..=100`.
///
/// A zero denominator yields 0.
#[must_use]
pub fn percentage(numerator: usize, denominator: usize) -> u8 {
    let doubled = numerator
        .saturating_mul(200)
        .saturating_add(denominator);
    doubled
        .checked_div(denominator.saturating_mul(2))
        .map_or(0, |value| u8::try_from(value.min(100)).unwrap_or(100))
}

/// Progress on today's work: EOD items and items due today.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyCompletion {
    /// Today's items already done.
    pub completed: usize,
    /// Today's items still open.
    pub remaining: usize,
}

impl DailyCompletion {
    /// Returns the share of today's items completed.
    #[must_use]
    pub fn percentage(&self) -> u8 {
        percentage(self.completed, self.completed.saturating_add(self.remaining))
    }
}

/// Blocked and not-started counts.
///
/// Blocked and not started are independent predicates. A task that is both
/// appears in both buckets and twice in [`Self::total`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockedBreakdown {
    /// Blocked with at least one open blocker child.
    pub by_blocker: usize,
    /// Blocked by ordinary children only.
    pub by_other_children: usize,
    /// Open with a start date still ahead.
    pub not_started: usize,
}

impl BlockedBreakdown {
    /// Returns blocked plus not started.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.by_blocker
            .saturating_add(self.by_other_children)
            .saturating_add(self.not_started)
    }
}

/// One non-empty bar segment of the type distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeSegment {
    /// Task type of the segment.
    pub task_type: TaskType,
    /// Tasks of that type in scope.
    pub count: usize,
    /// Share of all tasks in scope.
    pub percentage: u8,
}

/// Per-type task counts; types without tasks have no segment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TypeDistribution {
    /// Tasks in scope.
    pub total: usize,
    /// Segments in type order.
    pub segments: Vec<TypeSegment>,
}

impl TypeDistribution {
    fn compute(scope: &[&Task]) -> Self {
        let total = scope.len();
        let segments = TaskType::ALL
            .iter()
            .filter_map(|task_type| {
                let count = scope
                    .iter()
                    .filter(|task| task.task_type() == *task_type)
                    .count();
                (count > 0).then(|| TypeSegment {
                    task_type: *task_type,
                    count,
                    percentage: percentage(count, total),
                })
            })
            .collect();
        Self { total, segments }
    }
}

/// The two "work left" gauges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct WorkLeft {
    /// Open items among today's work, meetings included.
    pub today: Ratio,
    /// Open items among everything startable by date.
    pub overall: Ratio,
}

/// Every metric for one view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsReport {
    /// Today's completion.
    pub daily_completion: DailyCompletion,
    /// Actionable open tasks out of all open tasks.
    pub actionable: Ratio,
    /// Blocked and not-started buckets.
    pub blocked: BlockedBreakdown,
    /// Counts per task type.
    pub type_distribution: TypeDistribution,
    /// Remaining work gauges.
    pub work_left: WorkLeft,
}

impl MetricsReport {
    /// Computes every metric over the tasks visible through `filter`.
    ///
    /// Children are looked up across the whole of `tasks`.
    #[must_use]
    pub fn compute(tasks: &[Task], filter: &ViewFilter, moment: &Moment) -> Self {
        let classifier = Classifier::new(tasks, *moment);
        let scope = filter.select(tasks);

        let mut report = Self {
            type_distribution: TypeDistribution::compute(&scope),
            ..Self::default()
        };
        let mut open = 0_usize;
        let mut actionable = 0_usize;
        let mut startable = 0_usize;
        let mut startable_open = 0_usize;

        for task in &scope {
            let done = task.is_completed();
            if is_todays_work(task, moment) {
                if done {
                    report.daily_completion.completed += 1;
                } else {
                    report.daily_completion.remaining += 1;
                }
            }
            if classifier.is_startable(task) {
                startable += 1;
                startable_open += usize::from(!done);
            }
            if done {
                continue;
            }
            open += 1;
            actionable += usize::from(classifier.is_actionable(task));
            match classifier.blocked_reason(task) {
                Some(BlockedReason::ByBlocker) => report.blocked.by_blocker += 1,
                Some(BlockedReason::ByOtherChildren) => {
                    report.blocked.by_other_children += 1;
                }
                None => {}
            }
            report.blocked.not_started += usize::from(classifier.is_not_started(task));
        }

        let daily = report.daily_completion;
        report.actionable = Ratio::new(actionable, open);
        report.work_left = WorkLeft {
            today: Ratio::new(daily.remaining, daily.completed + daily.remaining),
            overall: Ratio::new(startable_open, startable),
        };
        report
    }
}

fn is_todays_work(task: &Task, moment: &Moment) -> bool {
    task.is_eod() || DueStatus::of(task, moment).is_some_and(|due| due.due_today)
}
