//! Task aggregate and its creation parameters.

use super::{
    Priority, ProjectName, TaskDomainError, TaskId, TaskRecord, TaskText, TaskType, Timestamp,
    Workspace,
};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Free-text attachments rendered as newline-delimited lists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDetails {
    /// Meeting agenda, one item per line.
    pub agenda: Option<String>,
    /// Free-form notes.
    pub notes: Option<String>,
    /// Reference links, one per line.
    pub links: Option<String>,
}

impl TaskDetails {
    /// Returns the non-blank agenda lines.
    #[must_use]
    pub fn agenda_items(&self) -> Vec<&str> {
        non_blank_lines(self.agenda.as_deref())
    }

    /// Returns the non-blank link lines.
    #[must_use]
    pub fn link_items(&self) -> Vec<&str> {
        non_blank_lines(self.links.as_deref())
    }

    fn normalized(self) -> Self {
        Self {
            agenda: blank_to_none(self.agenda),
            notes: blank_to_none(self.notes),
            links: blank_to_none(self.links),
        }
    }
}

fn non_blank_lines(value: Option<&str>) -> Vec<&str> {
    value
        .map(|text| {
            text.lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .collect()
        })
        .unwrap_or_default()
}

pub(crate) fn blank_to_none(value: Option<String>) -> Option<String> {
    value.and_then(|text| {
        let trimmed = text.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_owned())
    })
}

/// Parameters for creating a task.
///
/// Defaults match a freshly typed to-do: type `Task`, priority `P2`, not
/// end-of-day, no dates, no project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    text: String,
    workspace: Workspace,
    task_type: TaskType,
    priority: Priority,
    is_eod: bool,
    start_date: Option<Timestamp>,
    due_date: Option<Timestamp>,
    due_time: Option<String>,
    meeting_time: Option<String>,
    project: Option<String>,
    details: TaskDetails,
}

impl TaskDraft {
    /// Creates a draft with required fields.
    #[must_use]
    pub fn new(text: impl Into<String>, workspace: Workspace) -> Self {
        Self {
            text: text.into(),
            workspace,
            task_type: TaskType::Task,
            priority: Priority::P2,
            is_eod: false,
            start_date: None,
            due_date: None,
            due_time: None,
            meeting_time: None,
            project: None,
            details: TaskDetails::default(),
        }
    }

    /// Sets the task type.
    #[must_use]
    pub const fn with_type(mut self, task_type: TaskType) -> Self {
        self.task_type = task_type;
        self
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Marks the task as due by end of day.
    #[must_use]
    pub const fn end_of_day(mut self) -> Self {
        self.is_eod = true;
        self
    }

    /// Sets the earliest actionable instant.
    #[must_use]
    pub const fn with_start_date(mut self, start_date: Timestamp) -> Self {
        self.start_date = Some(start_date);
        self
    }

    /// Sets the due date (the meeting date and time for meetings).
    #[must_use]
    pub const fn with_due_date(mut self, due_date: Timestamp) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Sets the due time of day for non-meeting tasks.
    #[must_use]
    pub fn with_due_time(mut self, due_time: impl Into<String>) -> Self {
        self.due_time = Some(due_time.into());
        self
    }

    /// Sets the displayed meeting time for meetings.
    #[must_use]
    pub fn with_meeting_time(mut self, meeting_time: impl Into<String>) -> Self {
        self.meeting_time = Some(meeting_time.into());
        self
    }

    /// Sets the project name.
    #[must_use]
    pub fn with_project(mut self, project: impl Into<String>) -> Self {
        self.project = Some(project.into());
        self
    }

    /// Sets agenda, notes and links.
    #[must_use]
    pub fn with_details(mut self, details: TaskDetails) -> Self {
        self.details = details;
        self
    }

    /// Returns the target workspace.
    #[must_use]
    pub const fn workspace(&self) -> Workspace {
        self.workspace
    }

    /// Returns the referenced project name, if any.
    #[must_use]
    pub fn project(&self) -> Option<&str> {
        self.project.as_deref()
    }
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TaskRecord", into = "TaskRecord")]
pub struct Task {
    id: TaskId,
    text: TaskText,
    task_type: TaskType,
    completed: bool,
    created_at: Timestamp,
    start_date: Option<Timestamp>,
    due_date: Option<Timestamp>,
    due_time: Option<String>,
    meeting_time: Option<String>,
    workspace: Workspace,
    project: Option<ProjectName>,
    priority: Priority,
    is_eod: bool,
    details: TaskDetails,
    parent_id: Option<TaskId>,
    priority_order: Option<u32>,
}

/// Parameter object for reconstructing a persisted task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted identifier.
    pub id: TaskId,
    /// Persisted description.
    pub text: TaskText,
    /// Persisted type.
    pub task_type: TaskType,
    /// Persisted completion flag.
    pub completed: bool,
    /// Persisted creation instant.
    pub created_at: Timestamp,
    /// Persisted start date.
    pub start_date: Option<Timestamp>,
    /// Persisted due date.
    pub due_date: Option<Timestamp>,
    /// Persisted due time of day.
    pub due_time: Option<String>,
    /// Persisted meeting time.
    pub meeting_time: Option<String>,
    /// Persisted workspace.
    pub workspace: Workspace,
    /// Persisted project name.
    pub project: Option<ProjectName>,
    /// Persisted priority.
    pub priority: Priority,
    /// Persisted end-of-day flag.
    pub is_eod: bool,
    /// Persisted free-text details.
    pub details: TaskDetails,
    /// Persisted parent reference.
    pub parent_id: Option<TaskId>,
    /// Persisted priority list position.
    pub priority_order: Option<u32>,
}

impl Task {
    /// Creates a new task from a draft.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError`] when the text or project name is empty, or
    /// when a time field does not match the task type.
    pub fn new(draft: TaskDraft, clock: &impl Clock) -> Result<Self, TaskDomainError> {
        let text = TaskText::new(draft.text)?;
        let project = draft.project.map(ProjectName::new).transpose()?;
        let mut task = Self {
            id: TaskId::new(),
            text,
            task_type: draft.task_type,
            completed: false,
            created_at: Timestamp::now(clock),
            start_date: draft.start_date,
            due_date: None,
            due_time: None,
            meeting_time: None,
            workspace: draft.workspace,
            project,
            priority: draft.priority,
            is_eod: draft.is_eod,
            details: draft.details.normalized(),
            parent_id: None,
            priority_order: None,
        };
        if task.is_meeting() {
            if draft.due_time.is_some() {
                return Err(TaskDomainError::DueTimeOnMeeting);
            }
            task.schedule_meeting(draft.due_date, draft.meeting_time)?;
        } else {
            if draft.meeting_time.is_some() {
                return Err(TaskDomainError::MeetingTimeOnNonMeeting);
            }
            task.set_due(draft.due_date, draft.due_time)?;
        }
        Ok(task)
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            text: data.text,
            task_type: data.task_type,
            completed: data.completed,
            created_at: data.created_at,
            start_date: data.start_date,
            due_date: data.due_date,
            due_time: data.due_time,
            meeting_time: data.meeting_time,
            workspace: data.workspace,
            project: data.project,
            priority: data.priority,
            is_eod: data.is_eod,
            details: data.details,
            parent_id: data.parent_id,
            priority_order: data.priority_order,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> &TaskId {
        &self.id
    }

    /// Returns the description.
    #[must_use]
    pub const fn text(&self) -> &TaskText {
        &self.text
    }

    /// Returns the task type.
    #[must_use]
    pub const fn task_type(&self) -> TaskType {
        self.task_type
    }

    /// Returns whether the task is a meeting.
    #[must_use]
    pub fn is_meeting(&self) -> bool {
        self.task_type == TaskType::Meeting
    }

    /// Returns whether the task is completed.
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        self.completed
    }

    /// Returns the creation instant.
    #[must_use]
    pub const fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// Returns the earliest actionable instant, if any.
    #[must_use]
    pub const fn start_date(&self) -> Option<Timestamp> {
        self.start_date
    }

    /// Returns the due date (the meeting instant for meetings).
    #[must_use]
    pub const fn due_date(&self) -> Option<Timestamp> {
        self.due_date
    }

    /// Returns the due time of day for non-meeting tasks.
    #[must_use]
    pub fn due_time(&self) -> Option<&str> {
        self.due_time.as_deref()
    }

    /// Returns the displayed meeting time for meetings.
    #[must_use]
    pub fn meeting_time(&self) -> Option<&str> {
        self.meeting_time.as_deref()
    }

    /// Returns the workspace.
    #[must_use]
    pub const fn workspace(&self) -> Workspace {
        self.workspace
    }

    /// Returns the project name, if any.
    #[must_use]
    pub const fn project(&self) -> Option<&ProjectName> {
        self.project.as_ref()
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// Returns whether the task must be finished today.
    #[must_use]
    pub const fn is_eod(&self) -> bool {
        self.is_eod
    }

    /// Returns the free-text details.
    #[must_use]
    pub const fn details(&self) -> &TaskDetails {
        &self.details
    }

    /// Returns the parent reference, if any.
    ///
    /// The referenced task may no longer exist.
    #[must_use]
    pub const fn parent_id(&self) -> Option<&TaskId> {
        self.parent_id.as_ref()
    }

    /// Returns whether the task is in the priority list.
    #[must_use]
    pub const fn is_priority(&self) -> bool {
        self.priority_order.is_some()
    }

    /// Returns the position in the priority list, if listed.
    #[must_use]
    pub const fn priority_order(&self) -> Option<u32> {
        self.priority_order
    }

    /// Flips the completion flag.
    pub const fn toggle_completion(&mut self) {
        self.completed = !self.completed;
    }

    /// Changes the task type, dropping the time field the new type does not
    /// carry.
    pub fn set_type(&mut self, task_type: TaskType) {
        self.task_type = task_type;
        if self.is_meeting() {
            self.due_time = None;
        } else {
            self.meeting_time = None;
        }
    }

    /// Sets the due date and optional time of day of a non-meeting task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::DueTimeOnMeeting`] when a time is supplied
    /// for a meeting.
    pub fn set_due(
        &mut self,
        due_date: Option<Timestamp>,
        due_time: Option<String>,
    ) -> Result<(), TaskDomainError> {
        let time = blank_to_none(due_time);
        if self.is_meeting() && time.is_some() {
            return Err(TaskDomainError::DueTimeOnMeeting);
        }
        self.due_date = due_date;
        self.due_time = due_date.and(time);
        Ok(())
    }

    /// Sets the meeting instant and its displayed time.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::MeetingTimeOnNonMeeting`] when the task is
    /// not a meeting.
    pub fn schedule_meeting(
        &mut self,
        at: Option<Timestamp>,
        meeting_time: Option<String>,
    ) -> Result<(), TaskDomainError> {
        if !self.is_meeting() {
            return Err(TaskDomainError::MeetingTimeOnNonMeeting);
        }
        self.due_date = at;
        self.meeting_time = blank_to_none(meeting_time);
        Ok(())
    }

    /// Sets the earliest actionable instant.
    pub const fn set_start_date(&mut self, start_date: Option<Timestamp>) {
        self.start_date = start_date;
    }

    /// Sets the priority.
    pub const fn set_priority(&mut self, priority: Priority) {
        self.priority = priority;
    }

    /// Sets the end-of-day flag.
    pub const fn set_eod(&mut self, is_eod: bool) {
        self.is_eod = is_eod;
    }

    /// Replaces agenda, notes and links.
    pub fn set_details(&mut self, details: TaskDetails) {
        self.details = details.normalized();
    }

    /// Replaces the description.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTaskText`] when the new text is blank;
    /// the task is left unchanged.
    pub fn rename(&mut self, text: impl Into<String>) -> Result<(), TaskDomainError> {
        self.text = TaskText::new(text)?;
        Ok(())
    }

    pub(crate) fn set_project(&mut self, project: Option<ProjectName>) {
        self.project = project;
    }

    pub(crate) fn set_parent(&mut self, parent_id: Option<TaskId>) {
        self.parent_id = parent_id;
    }

    pub(crate) const fn set_priority_order(&mut self, priority_order: Option<u32>) {
        self.priority_order = priority_order;
    }

    pub(crate) fn into_persisted(self) -> PersistedTaskData {
        PersistedTaskData {
            id: self.id,
            text: self.text,
            task_type: self.task_type,
            completed: self.completed,
            created_at: self.created_at,
            start_date: self.start_date,
            due_date: self.due_date,
            due_time: self.due_time,
            meeting_time: self.meeting_time,
            workspace: self.workspace,
            project: self.project,
            priority: self.priority,
            is_eod: self.is_eod,
            details: self.details,
            parent_id: self.parent_id,
            priority_order: self.priority_order,
        }
    }
}
