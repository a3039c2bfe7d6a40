//! Request payloads and the model-facing view of each task.

use crate::insight::{Classifier, DueStatus, Moment};
use crate::task::domain::{Priority, Task, TaskId, TaskType, Workspace};
use serde::{Deserialize, Serialize};

/// Incomplete tasks forwarded to the model at most.
pub const MAX_BRIEFED_TASKS: usize = 100;

/// Chat request as posted by the client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    /// The user's question.
    pub message: String,
    /// The client's whole task list.
    #[serde(default)]
    pub todos: Vec<Task>,
    /// The current priority list, in order.
    #[serde(default)]
    pub priority_todos: Vec<Task>,
}

/// Recommendation request as posted by the client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationRequest {
    /// The client's whole task list.
    #[serde(default)]
    pub todos: Vec<Task>,
}

/// Model-facing summary of one incomplete task with derived flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskBrief {
    /// Task identifier, echoed back in suggestions.
    pub id: TaskId,
    /// Description.
    pub text: String,
    /// Task type.
    #[serde(rename = "type")]
    pub task_type: TaskType,
    /// Urgency.
    pub priority: Priority,
    /// Workspace.
    pub workspace: Workspace,
    /// Project name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
    /// Due date as RFC 3339.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    /// Due time of day.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_time: Option<String>,
    /// Displayed meeting time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meeting_time: Option<String>,
    /// Start date as RFC 3339.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    /// Must be finished today.
    #[serde(rename = "isEOD")]
    pub is_eod: bool,
    /// Already on the priority list.
    pub is_priority: bool,
    /// Parent task.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<TaskId>,
    /// Due before today.
    pub is_overdue: bool,
    /// Due today.
    pub is_due_today: bool,
    /// Due tomorrow.
    pub is_due_tomorrow: bool,
    /// Calendar days until due; negative when overdue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days_until_due: Option<i64>,
    /// Child of an open meeting held today or tomorrow.
    pub is_meeting_prep: bool,
    /// Has at least one incomplete child.
    pub has_incomplete_children: bool,
    /// Has an incomplete blocker child.
    pub has_blocker_child: bool,
    /// Start date still ahead.
    pub is_not_started: bool,
}

impl TaskBrief {
    /// Briefs the first [`MAX_BRIEFED_TASKS`] incomplete tasks of `tasks`.
    ///
    /// Parents and children are looked up across the whole list; a parent
    /// missing from it counts as no parent.
    #[must_use]
    pub fn collect(tasks: &[Task], moment: &Moment) -> Vec<Self> {
        let classifier = Classifier::new(tasks, *moment);
        tasks
            .iter()
            .filter(|task| !task.is_completed())
            .take(MAX_BRIEFED_TASKS)
            .map(|task| Self::build(task, tasks, &classifier))
            .collect()
    }

    fn build(task: &Task, tasks: &[Task], classifier: &Classifier<'_>) -> Self {
        let moment = classifier.moment();
        let status = DueStatus::of(task, &moment);
        let is_meeting_prep = task
            .parent_id()
            .and_then(|parent_id| tasks.iter().find(|candidate| candidate.id() == parent_id))
            .is_some_and(|parent| is_upcoming_open_meeting(parent, &moment));
        Self {
            id: task.id().clone(),
            text: task.text().to_string(),
            task_type: task.task_type(),
            priority: task.priority(),
            workspace: task.workspace(),
            project: task.project().map(ToString::to_string),
            due_date: task.due_date().map(|date| date.to_string()),
            due_time: task.due_time().map(str::to_owned),
            meeting_time: task.meeting_time().map(str::to_owned),
            start_date: task.start_date().map(|start| start.to_string()),
            is_eod: task.is_eod(),
            is_priority: task.is_priority(),
            parent_id: task.parent_id().cloned(),
            is_overdue: status.is_some_and(|due| due.overdue),
            is_due_today: status.is_some_and(|due| due.due_today),
            is_due_tomorrow: status.is_some_and(|due| due.due_tomorrow),
            days_until_due: status.map(|due| due.days_until),
            is_meeting_prep,
            has_incomplete_children: classifier.has_uncompleted_children(task),
            has_blocker_child: classifier
                .incomplete_children(task)
                .iter()
                .any(|child| child.task_type() == TaskType::Blocker),
            is_not_started: classifier.is_not_started(task),
        }
    }
}

fn is_upcoming_open_meeting(task: &Task, moment: &Moment) -> bool {
    task.is_meeting()
        && !task.is_completed()
        && DueStatus::of(task, moment).is_some_and(|due| due.is_imminent())
}
