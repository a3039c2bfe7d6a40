//! Wire and storage form of a task, including legacy backfill.
//!
//! Older saved states predate several fields and stored dates either as
//! epoch numbers or as strings. Both are normalised here, once, so the rest
//! of the crate only ever sees [`Timestamp`] values and closed enums.

use super::{
    PersistedTaskData, Priority, ProjectName, Task, TaskDetails, TaskDomainError, TaskId,
    TaskText, TaskType, Timestamp, Workspace,
};
use super::ids::deserialize_parent;
use crate::task::domain::task::blank_to_none;
use serde::{Deserialize, Serialize};

/// Date value as found in stored or submitted records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawDate {
    /// Epoch milliseconds.
    Millis(i64),
    /// Date or date-time string.
    Text(String),
}

impl RawDate {
    fn normalize(self) -> Result<Option<Timestamp>, TaskDomainError> {
        match self {
            Self::Millis(millis) => Timestamp::from_millis(millis).map(Some),
            Self::Text(text) if text.trim().is_empty() => Ok(None),
            Self::Text(text) => Timestamp::parse(&text).map(Some),
        }
    }
}

fn normalize_date(value: Option<RawDate>) -> Result<Option<Timestamp>, TaskDomainError> {
    value.map_or(Ok(None), RawDate::normalize)
}

/// Serialised task record using the camelCase field names of the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRecord {
    id: TaskId,
    text: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    task_type: Option<String>,
    #[serde(default, skip_serializing)]
    is_meeting: Option<bool>,
    #[serde(default)]
    completed: bool,
    created_at: RawDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    start_date: Option<RawDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    due_date: Option<RawDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    due_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    meeting_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    workspace: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    project: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    priority: Option<String>,
    #[serde(rename = "isEOD", default)]
    is_eod: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    agenda: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    links: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_parent",
        skip_serializing_if = "Option::is_none"
    )]
    parent_id: Option<TaskId>,
    #[serde(default)]
    is_priority: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    priority_order: Option<u32>,
}

/// Legacy records flagged `isPriority` without a position sort after every
/// positioned entry; the collection re-packs them on load.
const UNPOSITIONED_PRIORITY: u32 = u32::MAX;

impl TryFrom<TaskRecord> for Task {
    type Error = TaskDomainError;

    fn try_from(record: TaskRecord) -> Result<Self, Self::Error> {
        let task_type = record
            .task_type
            .as_deref()
            .and_then(|value| TaskType::try_from(value).ok())
            .unwrap_or(if record.is_meeting.unwrap_or(false) {
                TaskType::Meeting
            } else {
                TaskType::Task
            });
        let workspace = record
            .workspace
            .as_deref()
            .and_then(|value| Workspace::try_from(value).ok())
            .unwrap_or_default();
        let priority = record
            .priority
            .as_deref()
            .and_then(|value| Priority::try_from(value).ok())
            .unwrap_or_default();
        let priority_order = match (record.is_priority.unwrap_or(false), record.priority_order) {
            (true, order) => Some(order.unwrap_or(UNPOSITIONED_PRIORITY)),
            (false, _) => None,
        };
        let is_meeting = task_type == TaskType::Meeting;
        let due_date = normalize_date(record.due_date)?;

        Ok(Self::from_persisted(PersistedTaskData {
            id: record.id,
            text: TaskText::new(record.text)?,
            task_type,
            completed: record.completed,
            created_at: record
                .created_at
                .normalize()?
                .ok_or_else(|| TaskDomainError::InvalidDate(String::new()))?,
            start_date: normalize_date(record.start_date)?,
            due_date,
            due_time: blank_to_none(record.due_time)
                .filter(|_| !is_meeting && due_date.is_some()),
            meeting_time: blank_to_none(record.meeting_time).filter(|_| is_meeting),
            workspace,
            project: blank_to_none(record.project)
                .map(ProjectName::new)
                .transpose()?,
            priority,
            is_eod: record.is_eod.unwrap_or(false),
            details: TaskDetails {
                agenda: blank_to_none(record.agenda),
                notes: blank_to_none(record.notes),
                links: blank_to_none(record.links),
            },
            parent_id: record.parent_id,
            priority_order,
        }))
    }
}

impl From<Task> for TaskRecord {
    fn from(task: Task) -> Self {
        let data = task.into_persisted();
        Self {
            id: data.id,
            text: data.text.into(),
            task_type: Some(data.task_type.as_str().to_owned()),
            is_meeting: None,
            completed: data.completed,
            created_at: RawDate::Millis(data.created_at.millis()),
            start_date: data.start_date.map(|at| RawDate::Millis(at.millis())),
            due_date: data.due_date.map(|at| RawDate::Millis(at.millis())),
            due_time: data.due_time,
            meeting_time: data.meeting_time,
            workspace: Some(data.workspace.as_str().to_owned()),
            project: data.project.map(String::from),
            priority: Some(data.priority.as_str().to_owned()),
            is_eod: Some(data.is_eod),
            agenda: data.details.agenda,
            notes: data.details.notes,
            links: data.details.links,
            parent_id: data.parent_id,
            is_priority: Some(data.priority_order.is_some()),
            priority_order: data.priority_order,
        }
    }
}
