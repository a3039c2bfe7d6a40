//! Tests for the stored task record and legacy backfill.

use crate::task::domain::{Priority, Task, TaskCollection, TaskId, TaskType, Workspace};
use crate::test_support::{days_from_now, draft, task};
use rstest::rstest;
use serde_json::json;

fn decode(value: serde_json::Value) -> Task {
    serde_json::from_value(value).expect("record decodes")
}

#[test]
fn legacy_record_gets_defaults() {
    let id = TaskId::new();

    let legacy = decode(json!({
        "id": id.to_string(),
        "text": "Old entry",
        "createdAt": 1_700_000_000_000_i64,
    }));

    assert_eq!(legacy.id(), &id);
    assert_eq!(legacy.task_type(), TaskType::Task);
    assert_eq!(legacy.workspace(), Workspace::Personal);
    assert_eq!(legacy.priority(), Priority::P2);
    assert!(!legacy.is_eod());
    assert!(!legacy.is_priority());
}

#[test]
fn legacy_meeting_flag_becomes_the_meeting_type() {
    let meeting = decode(json!({
        "id": TaskId::new().to_string(),
        "text": "Board meeting",
        "isMeeting": true,
        "createdAt": "2026-03-01",
        "dueDate": "2026-03-12T09:00:00Z",
        "meetingTime": "09:00",
        "dueTime": "08:00",
    }));

    assert_eq!(meeting.task_type(), TaskType::Meeting);
    assert_eq!(meeting.meeting_time(), Some("09:00"));
    assert_eq!(meeting.due_time(), None);
    assert_eq!(
        meeting.due_date().map(|due| due.millis()),
        Some(1_773_306_000_000)
    );
}

#[test]
fn string_and_numeric_dates_normalise_alike() {
    let from_text = decode(json!({
        "id": TaskId::new().to_string(),
        "text": "A",
        "createdAt": "1773144000000",
        "dueDate": "2026-03-10T12:00:00Z",
    }));
    let from_number = decode(json!({
        "id": TaskId::new().to_string(),
        "text": "B",
        "createdAt": 1_773_144_000_000_i64,
        "dueDate": 1_773_144_000_000_i64,
    }));

    assert_eq!(from_text.due_date(), from_number.due_date());
    assert_eq!(from_text.created_at(), from_number.created_at());
}

#[test]
fn unpositioned_priority_entries_sort_after_positioned_ones() {
    let legacy = decode(json!({
        "id": TaskId::new().to_string(),
        "text": "Flagged only",
        "createdAt": 0,
        "isPriority": true,
    }));
    let positioned = decode(json!({
        "id": TaskId::new().to_string(),
        "text": "Positioned",
        "createdAt": 0,
        "isPriority": true,
        "priorityOrder": 4,
    }));

    let collection =
        TaskCollection::from_parts(vec![legacy.clone(), positioned.clone()], Vec::new());

    let order: Vec<&TaskId> = collection.priority_list().into_iter().map(Task::id).collect();
    assert_eq!(order, vec![positioned.id(), legacy.id()]);
    assert_eq!(
        collection.get(positioned.id()).map(Task::priority_order),
        Ok(Some(0))
    );
}

#[test]
fn stored_record_uses_client_field_names() {
    let saved = task(
        draft("Submit claim")
            .end_of_day()
            .with_due_date(days_from_now(1))
            .with_due_time("17:00"),
    );

    let value = serde_json::to_value(&saved).expect("task serialises");

    assert_eq!(value["type"], "task");
    assert_eq!(value["isEOD"], true);
    assert_eq!(value["dueTime"], "17:00");
    assert_eq!(value["isPriority"], false);
    assert_eq!(value["workspace"], "personal");
    assert!(value.get("isMeeting").is_none());
    assert_eq!(decode(value), saved);
}

#[test]
fn blank_text_record_is_rejected() {
    let result: Result<Task, _> = serde_json::from_value(json!({
        "id": TaskId::new().to_string(),
        "text": "   ",
        "createdAt": 0,
    }));

    assert!(result.is_err());
}

#[rstest]
#[case(json!("1712345678901"), "1712345678901")]
#[case(json!(1_712_345_678_901_u64), "1712345678901")]
#[case(json!("  todo-7 "), "todo-7")]
fn legacy_identifiers_are_kept_as_text(#[case] raw: serde_json::Value, #[case] expected: &str) {
    let legacy = decode(json!({
        "id": raw,
        "text": "Legacy",
        "createdAt": 1_700_000_000_000_i64,
    }));

    assert_eq!(legacy.id().as_str(), expected);
    let value = serde_json::to_value(&legacy).expect("task serialises");
    assert_eq!(value["id"], expected);
}

#[test]
fn collection_with_numeric_identifiers_links_children() {
    let parent = decode(json!({
        "id": 1_712_345_678_901_u64,
        "text": "Plan trip",
        "createdAt": 0,
    }));
    let child = decode(json!({
        "id": "1712345678902",
        "text": "Book train",
        "createdAt": 0,
        "parentId": 1_712_345_678_901_u64,
    }));

    let collection = TaskCollection::from_parts(vec![parent.clone(), child], Vec::new());

    assert_eq!(collection.children_of(parent.id()).count(), 1);
}

#[test]
fn blank_parent_reference_reads_as_top_level() {
    let legacy = decode(json!({
        "id": "42",
        "text": "Loose end",
        "createdAt": 0,
        "parentId": "",
    }));

    assert_eq!(legacy.parent_id(), None);
}

#[test]
fn blank_identifier_is_rejected() {
    let result: Result<Task, _> = serde_json::from_value(json!({
        "id": "  ",
        "text": "No id",
        "createdAt": 0,
    }));

    assert!(result.is_err());
}
