//! Error types for task domain validation and parsing.

use super::{TaskId, TaskType, Workspace};
use thiserror::Error;

/// Errors returned while constructing or mutating domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task text is empty after trimming.
    #[error("task text must not be empty")]
    EmptyTaskText,

    /// The task identifier is empty after trimming.
    #[error("task identifier must not be empty")]
    EmptyTaskId,

    /// The project name is empty after trimming.
    #[error("project name must not be empty")]
    EmptyProjectName,

    /// The task type value is unsupported.
    #[error("unknown task type: {0}")]
    InvalidTaskType(String),

    /// The workspace value is unsupported.
    #[error("unknown workspace: {0}")]
    InvalidWorkspace(String),

    /// The priority value is unsupported.
    #[error("unknown priority: {0}")]
    InvalidPriority(String),

    /// The timestamp cannot be represented as a calendar instant.
    #[error("timestamp {0} is out of range")]
    TimestampOutOfRange(i64),

    /// A date string could not be normalised to epoch milliseconds.
    #[error("unrecognised date value '{0}'")]
    InvalidDate(String),

    /// No task with the identifier exists in the collection.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    /// A task with the identifier already exists in the collection.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// The referenced project does not exist in the workspace.
    #[error("project '{name}' does not exist in workspace {workspace}")]
    UnknownProject {
        /// Workspace that was searched.
        workspace: Workspace,
        /// Project name that was referenced.
        name: String,
    },

    /// A project with the same name already exists in the workspace.
    #[error("project '{name}' already exists in workspace {workspace}")]
    DuplicateProject {
        /// Workspace holding the existing project.
        workspace: Workspace,
        /// Conflicting project name.
        name: String,
    },

    /// Parent and child live in different workspaces.
    #[error("task {child} cannot be linked to {parent} across workspaces")]
    CrossWorkspaceLink {
        /// Candidate child task.
        child: TaskId,
        /// Candidate parent task.
        parent: TaskId,
    },

    /// The parent type does not accept children of the child type.
    #[error("a {parent_type} cannot parent a {child_type}")]
    IncompatibleParent {
        /// Type of the candidate parent.
        parent_type: TaskType,
        /// Type of the candidate child.
        child_type: TaskType,
    },

    /// A task cannot be its own parent.
    #[error("task {0} cannot be its own parent")]
    SelfParent(TaskId),

    /// Linking would close a cycle in the parent chain.
    #[error("linking {child} under {parent} would create a cycle")]
    ParentCycle {
        /// Candidate child task.
        child: TaskId,
        /// Candidate parent task.
        parent: TaskId,
    },

    /// A due time was supplied for a meeting.
    #[error("meetings carry a meeting time, not a due time")]
    DueTimeOnMeeting,

    /// A meeting time was supplied for a non-meeting task.
    #[error("only meetings carry a meeting time")]
    MeetingTimeOnNonMeeting,

    /// A priority list position is outside the list.
    #[error("priority position {index} is out of range for a list of {len}")]
    PriorityIndexOutOfRange {
        /// Requested position.
        index: usize,
        /// Current list length.
        len: usize,
    },
}

