//! Tests for parent/child eligibility.

use crate::task::domain::{
    TaskCollection, TaskDomainError, TaskDraft, TaskType, Workspace, accepts_child, can_be_parent,
    hierarchy,
};
use crate::test_support::{child_of, draft, task};
use rstest::rstest;

#[rstest]
#[case(TaskType::Meeting, TaskType::Deliverable, true)]
#[case(TaskType::Meeting, TaskType::Task, true)]
#[case(TaskType::Meeting, TaskType::QuickWin, true)]
#[case(TaskType::Meeting, TaskType::Meeting, false)]
#[case(TaskType::Deliverable, TaskType::Deliverable, true)]
#[case(TaskType::Deliverable, TaskType::Meeting, false)]
#[case(TaskType::Task, TaskType::Task, true)]
#[case(TaskType::Task, TaskType::QuickWin, true)]
#[case(TaskType::Task, TaskType::Deliverable, false)]
#[case(TaskType::QuickWin, TaskType::QuickWin, true)]
#[case(TaskType::QuickWin, TaskType::Task, false)]
#[case(TaskType::Blocker, TaskType::Task, false)]
#[case(TaskType::Blocker, TaskType::Blocker, false)]
fn parent_table(#[case] parent: TaskType, #[case] child: TaskType, #[case] allowed: bool) {
    assert_eq!(can_be_parent(parent, child), allowed);
}

#[rstest]
#[case(TaskType::Task)]
#[case(TaskType::Deliverable)]
#[case(TaskType::QuickWin)]
#[case(TaskType::Meeting)]
fn blockers_sit_under_any_non_blocker(#[case] parent: TaskType) {
    assert!(accepts_child(parent, TaskType::Blocker));
    assert!(!can_be_parent(parent, TaskType::Blocker));
}

#[test]
fn create_child_enforces_the_table() {
    let parent = task(draft("Tidy garage").with_type(TaskType::QuickWin));
    let collection = TaskCollection::new()
        .insert_task(parent.clone())
        .expect("parent inserted");

    let result = collection.insert_child(parent.id(), task(draft("Rebuild shelves")));

    assert_eq!(
        result,
        Err(TaskDomainError::IncompatibleParent {
            parent_type: TaskType::QuickWin,
            child_type: TaskType::Task,
        })
    );
}

#[test]
fn links_across_workspaces_are_rejected() {
    let home = task(draft("Paint fence"));
    let office = task(TaskDraft::new("Refactor module", Workspace::Work));
    let collection = TaskCollection::from_parts(vec![home.clone(), office.clone()], Vec::new());

    let result = collection.link_parent(office.id(), home.id());

    assert_eq!(
        result,
        Err(TaskDomainError::CrossWorkspaceLink {
            child: office.id().clone(),
            parent: home.id().clone(),
        })
    );
}

#[test]
fn self_parenting_is_rejected() {
    let solo = task(draft("Think"));
    let collection = TaskCollection::from_parts(vec![solo.clone()], Vec::new());

    assert_eq!(
        collection.link_parent(solo.id(), solo.id()),
        Err(TaskDomainError::SelfParent(solo.id().clone()))
    );
}

#[test]
fn linking_an_ancestor_under_its_descendant_is_a_cycle() {
    let root = task(draft("Launch"));
    let middle = child_of(&root, task(draft("Prepare")));
    let leaf = child_of(&middle, task(draft("Check list")));
    let collection =
        TaskCollection::from_parts(vec![root.clone(), middle.clone(), leaf.clone()], Vec::new());

    let result = collection.link_parent(root.id(), leaf.id());

    assert_eq!(
        result,
        Err(TaskDomainError::ParentCycle {
            child: root.id().clone(),
            parent: leaf.id().clone(),
        })
    );
}

#[test]
fn ancestor_walk_stops_on_stored_cycles() {
    let root = task(draft("One"));
    let second = child_of(&root, task(draft("Two")));
    let first = child_of(&second, root);
    let tasks = vec![first.clone(), second.clone()];

    let chain: Vec<_> = hierarchy::ancestors(first.id(), &tasks).collect();

    assert!(chain.len() <= tasks.len());
    assert_eq!(chain.first(), Some(&second.id()));
}

#[test]
fn deleting_a_parent_leaves_children_dangling() {
    let parent = task(draft("Trip"));
    let child = child_of(&parent, task(draft("Pack")));
    let collection = TaskCollection::from_parts(vec![parent.clone(), child.clone()], Vec::new());

    let next = collection.remove_task(parent.id()).expect("parent removed");

    let kept = next.get(child.id()).expect("child kept");
    assert_eq!(kept.parent_id(), Some(parent.id()));
    assert_eq!(next.children_of(parent.id()).count(), 1);
}
