//! Tests for the actionability and blocking classifier.

use crate::insight::{BlockedReason, Classifier, Moment};
use crate::task::domain::{TaskId, TaskType};
use crate::test_support::{child_of, completed, days_from_now, draft, moment, task};
use rstest::rstest;

#[rstest]
fn open_child_blocks_parent(moment: Moment) {
    let parent = task(draft("Write report"));
    let child = child_of(&parent, task(draft("Collect figures")));
    let tasks = vec![parent.clone(), child.clone()];
    let classifier = Classifier::new(&tasks, moment);

    assert!(classifier.has_uncompleted_children(&parent));
    assert!(classifier.is_blocked(&parent));
    assert!(!classifier.is_actionable(&parent));
    assert!(classifier.is_actionable(&child));
    assert_eq!(
        classifier.blocked_reason(&parent),
        Some(BlockedReason::ByOtherChildren)
    );
}

#[rstest]
fn completed_children_do_not_block(moment: Moment) {
    let parent = task(draft("Ship release"));
    let child = completed(child_of(&parent, task(draft("Tag build"))));
    let tasks = vec![parent.clone(), child];
    let classifier = Classifier::new(&tasks, moment);

    assert!(!classifier.is_blocked(&parent));
    assert!(classifier.is_actionable(&parent));
    assert_eq!(classifier.blocked_reason(&parent), None);
}

#[rstest]
fn blocker_child_is_reported_as_blocker(moment: Moment) {
    let parent = task(draft("Deploy"));
    let ordinary = child_of(&parent, task(draft("Update docs")));
    let blocker = child_of(
        &parent,
        task(draft("Waiting on credentials").with_type(TaskType::Blocker)),
    );
    let tasks = vec![parent.clone(), ordinary, blocker];
    let classifier = Classifier::new(&tasks, moment);

    assert_eq!(
        classifier.blocked_reason(&parent),
        Some(BlockedReason::ByBlocker)
    );
}

#[rstest]
fn future_start_date_is_not_started(moment: Moment) {
    let later = task(draft("Plan offsite").with_start_date(days_from_now(2)));
    let begun = task(draft("Review budget").with_start_date(days_from_now(-1)));
    let tasks = vec![later.clone(), begun.clone()];
    let classifier = Classifier::new(&tasks, moment);

    assert!(classifier.is_not_started(&later));
    assert!(!classifier.is_actionable(&later));
    assert!(!classifier.is_not_started(&begun));
    assert!(classifier.is_actionable(&begun));
}

#[rstest]
fn blocked_and_not_started_can_both_hold(moment: Moment) {
    let parent = task(draft("Launch").with_start_date(days_from_now(3)));
    let child = child_of(&parent, task(draft("Prepare assets")));
    let tasks = vec![parent.clone(), child];
    let classifier = Classifier::new(&tasks, moment);

    assert!(classifier.is_blocked(&parent));
    assert!(classifier.is_not_started(&parent));
}

#[rstest]
fn completed_task_is_neither_blocked_nor_actionable(moment: Moment) {
    let parent = completed(task(draft("Done already")));
    let child = child_of(&parent, task(draft("Leftover")));
    let tasks = vec![parent.clone(), child];
    let classifier = Classifier::new(&tasks, moment);

    assert!(!classifier.is_blocked(&parent));
    assert!(!classifier.is_actionable(&parent));
    assert!(!classifier.is_not_started(&parent));
}

#[rstest]
fn dangling_parent_reference_is_ignored(moment: Moment) {
    let mut orphan = task(draft("Orphaned"));
    orphan.set_parent(Some(TaskId::new()));
    let tasks = vec![orphan.clone()];
    let classifier = Classifier::new(&tasks, moment);

    assert!(classifier.is_actionable(&orphan));
    assert!(!classifier.is_blocked(&orphan));
}

#[rstest]
fn actionable_and_blocked_are_exclusive(moment: Moment) {
    let parent = task(draft("Parent").with_start_date(days_from_now(1)));
    let child = child_of(&parent, task(draft("Child")));
    let grandchild = completed(child_of(&child, task(draft("Grandchild"))));
    let loose = task(draft("Loose"));
    let tasks = vec![parent, child, grandchild, loose];
    let classifier = Classifier::new(&tasks, moment);

    for candidate in &tasks {
        assert!(
            !(classifier.is_actionable(candidate) && classifier.is_blocked(candidate)),
            "{} is both actionable and blocked",
            candidate.text()
        );
    }
}
