//! "Today's Priorities": a user-ordered subset of tasks.
//!
//! Positions are stored on the tasks themselves. After every operation in
//! this module the listed positions form the contiguous sequence `0..n`.

use super::{Task, TaskDomainError, TaskId};

/// Returns listed task identifiers ordered by position.
///
/// Equal or missing positions (possible only in imported data) keep their
/// collection order.
#[must_use]
pub fn ordered_ids(tasks: &[Task]) -> Vec<TaskId> {
    let mut listed: Vec<(u32, usize, &TaskId)> = tasks
        .iter()
        .enumerate()
        .filter_map(|(index, task)| task.priority_order().map(|order| (order, index, task.id())))
        .collect();
    listed.sort_unstable();
    listed.into_iter().map(|(_, _, id)| id.clone()).collect()
}

/// Assigns positions `0..n` following `order` and clears every other task.
///
/// Identifiers in `order` that name no task are skipped without leaving a
/// gap.
pub(crate) fn assign(tasks: &mut [Task], order: &[TaskId]) {
    let present: Vec<&TaskId> = order
        .iter()
        .filter(|id| tasks.iter().any(|task| task.id() == *id))
        .collect();
    for task in tasks.iter_mut() {
        let position = present
            .iter()
            .position(|id| *id == task.id())
            .and_then(|index| u32::try_from(index).ok());
        task.set_priority_order(position);
    }
}

/// Re-packs stored positions into `0..n`, preserving relative order.
pub(crate) fn repack(tasks: &mut [Task]) {
    let order = ordered_ids(tasks);
    assign(tasks, &order);
}

/// Adds `id` at the end of the list, or removes it and closes the gap.
pub(crate) fn toggle(tasks: &mut [Task], id: &TaskId) {
    let mut order = ordered_ids(tasks);
    if let Some(index) = order.iter().position(|listed| listed == id) {
        order.remove(index);
    } else {
        order.push(id.clone());
    }
    assign(tasks, &order);
}

/// Appends every identifier in `ids` that is not listed yet, in order.
pub(crate) fn extend(tasks: &mut [Task], ids: &[TaskId]) {
    let mut order = ordered_ids(tasks);
    for id in ids {
        if !order.contains(id) {
            order.push(id.clone());
        }
    }
    assign(tasks, &order);
}

/// Moves the entry at position `from` to position `to`.
///
/// # Errors
///
/// Returns [`TaskDomainError::PriorityIndexOutOfRange`] when either position
/// is outside the list; positions are left unchanged.
pub(crate) fn move_entry(tasks: &mut [Task], from: usize, to: usize) -> Result<(), TaskDomainError> {
    let mut order = ordered_ids(tasks);
    let len = order.len();
    for index in [from, to] {
        if index >= len {
            return Err(TaskDomainError::PriorityIndexOutOfRange { index, len });
        }
    }
    let moved = order.remove(from);
    order.insert(to, moved);
    assign(tasks, &order);
    Ok(())
}
