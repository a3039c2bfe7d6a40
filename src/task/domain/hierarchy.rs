//! Parent/child eligibility rules.

use super::{Task, TaskDomainError, TaskId, TaskType};
use std::collections::HashMap;

/// Returns whether a task of `parent` type may parent one of `child` type.
///
/// | Parent      | Children                     |
/// |-------------|------------------------------|
/// | Meeting     | Deliverable, Task, QuickWin  |
/// | Deliverable | Deliverable, Task, QuickWin  |
/// | Task        | Task, QuickWin               |
/// | QuickWin    | QuickWin                     |
/// | Blocker     | none                         |
#[must_use]
pub const fn can_be_parent(parent: TaskType, child: TaskType) -> bool {
    matches!(
        (parent, child),
        (
            TaskType::Meeting | TaskType::Deliverable,
            TaskType::Deliverable | TaskType::Task | TaskType::QuickWin
        ) | (TaskType::Task, TaskType::Task | TaskType::QuickWin)
            | (TaskType::QuickWin, TaskType::QuickWin)
    )
}

/// Returns whether `child` may be attached under `parent`, by type alone.
///
/// Extends [`can_be_parent`] with blockers: a blocker may sit under any
/// non-blocker task, which is what makes that task blocked.
#[must_use]
pub const fn accepts_child(parent: TaskType, child: TaskType) -> bool {
    match (parent, child) {
        (TaskType::Blocker, _) => false,
        (_, TaskType::Blocker) => true,
        _ => can_be_parent(parent, child),
    }
}

/// Validates linking `child` under `parent` within `tasks`.
///
/// Rejects cross-workspace links, type pairs refused by [`accepts_child`],
/// self-parenting, and links whose parent already descends from the child.
/// A dangling parent reference further up the chain ends the walk.
///
/// # Errors
///
/// Returns the [`TaskDomainError`] naming the first violated rule.
pub fn check_link(child: &Task, parent: &Task, tasks: &[Task]) -> Result<(), TaskDomainError> {
    if child.id() == parent.id() {
        return Err(TaskDomainError::SelfParent(child.id().clone()));
    }
    if child.workspace() != parent.workspace() {
        return Err(TaskDomainError::CrossWorkspaceLink {
            child: child.id().clone(),
            parent: parent.id().clone(),
        });
    }
    if !accepts_child(parent.task_type(), child.task_type()) {
        return Err(TaskDomainError::IncompatibleParent {
            parent_type: parent.task_type(),
            child_type: child.task_type(),
        });
    }
    if ancestors(parent.id(), tasks).any(|ancestor| ancestor == child.id()) {
        return Err(TaskDomainError::ParentCycle {
            child: child.id().clone(),
            parent: parent.id().clone(),
        });
    }
    Ok(())
}

/// Walks the parent chain upwards from `start`, excluding `start` itself.
///
/// Stops at a task without a parent, at a dangling reference, or after
/// visiting every task once, so corrupt stored cycles terminate.
pub fn ancestors<'a>(
    start: &TaskId,
    tasks: &'a [Task],
) -> impl Iterator<Item = &'a TaskId> + use<'a> {
    let parents: HashMap<&'a TaskId, Option<&'a TaskId>> = tasks
        .iter()
        .map(|task| (task.id(), task.parent_id()))
        .collect();
    let mut current = parents.get(start).copied().flatten();
    let mut remaining = tasks.len();
    std::iter::from_fn(move || {
        let id = current?;
        if remaining == 0 || !parents.contains_key(id) {
            return None;
        }
        remaining -= 1;
        current = parents.get(id).copied().flatten();
        Some(id)
    })
}
