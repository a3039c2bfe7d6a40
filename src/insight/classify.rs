//! Actionability and blocking classification.
//!
//! A task is blocked while any direct child is incomplete, and not started
//! while its start date lies in the future. The two are independent: a task
//! may be both, and views that count them separately count it twice.

use super::Moment;
use crate::task::domain::{Task, TaskId, TaskType};
use std::collections::HashMap;

/// Why a blocked task cannot proceed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockedReason {
    /// At least one incomplete child is a blocker.
    ByBlocker,
    /// Only ordinary children are incomplete.
    ByOtherChildren,
}

/// Classifier over one collection snapshot at one moment.
///
/// Children are indexed once on construction. Dangling parent references
/// simply index under a parent that is never asked about.
#[derive(Debug, Clone)]
pub struct Classifier<'a> {
    incomplete_children: HashMap<&'a TaskId, Vec<&'a Task>>,
    moment: Moment,
}

impl<'a> Classifier<'a> {
    /// Indexes the incomplete children of every task in `tasks`.
    #[must_use]
    pub fn new(tasks: &'a [Task], moment: Moment) -> Self {
        let mut incomplete_children: HashMap<&'a TaskId, Vec<&'a Task>> = HashMap::new();
        for task in tasks.iter().filter(|task| !task.is_completed()) {
            if let Some(parent_id) = task.parent_id() {
                incomplete_children.entry(parent_id).or_default().push(task);
            }
        }
        Self {
            incomplete_children,
            moment,
        }
    }

    /// Returns the evaluation moment.
    #[must_use]
    pub const fn moment(&self) -> Moment {
        self.moment
    }

    /// Returns the incomplete direct children of `task`.
    #[must_use]
    pub fn incomplete_children(&self, task: &Task) -> &[&'a Task] {
        self.incomplete_children
            .get(task.id())
            .map_or(&[], Vec::as_slice)
    }

    /// Returns whether any direct child of `task` is incomplete.
    #[must_use]
    pub fn has_uncompleted_children(&self, task: &Task) -> bool {
        !self.incomplete_children(task).is_empty()
    }

    /// Returns whether `task` is incomplete and waits on a child.
    #[must_use]
    pub fn is_blocked(&self, task: &Task) -> bool {
        !task.is_completed() && self.has_uncompleted_children(task)
    }

    /// Returns whether `task` is incomplete with a start date still ahead.
    #[must_use]
    pub fn is_not_started(&self, task: &Task) -> bool {
        !task.is_completed()
            && task
                .start_date()
                .is_some_and(|start| !self.moment.has_reached(start))
    }

    /// Returns whether `task` has started by date, ignoring children.
    #[must_use]
    pub fn is_startable(&self, task: &Task) -> bool {
        task.start_date()
            .is_none_or(|start| self.moment.has_reached(start))
    }

    /// Returns whether `task` can be worked on now.
    #[must_use]
    pub fn is_actionable(&self, task: &Task) -> bool {
        !task.is_completed() && !self.has_uncompleted_children(task) && self.is_startable(task)
    }

    /// Returns why `task` is blocked, or `None` when it is not.
    #[must_use]
    pub fn blocked_reason(&self, task: &Task) -> Option<BlockedReason> {
        if !self.is_blocked(task) {
            return None;
        }
        let by_blocker = self
            .incomplete_children(task)
            .iter()
            .any(|child| child.task_type() == TaskType::Blocker);
        Some(if by_blocker {
            BlockedReason::ByBlocker
        } else {
            BlockedReason::ByOtherChildren
        })
    }
}
