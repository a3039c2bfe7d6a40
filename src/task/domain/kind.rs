//! Closed value sets carried by every task: type, workspace and priority.

use super::TaskDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Task type, governing parent/child eligibility and display rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskType {
    /// General task.
    Task,
    /// Deliverable with an external deadline.
    Deliverable,
    /// Small task that can be done in minutes.
    QuickWin,
    /// Meeting; its due date carries the meeting date and time.
    Meeting,
    /// Impediment that blocks its parent while incomplete.
    Blocker,
}

impl TaskType {
    /// Every task type in display order.
    pub const ALL: [Self; 5] = [
        Self::Task,
        Self::Deliverable,
        Self::QuickWin,
        Self::Meeting,
        Self::Blocker,
    ];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Task => "task",
            Self::Deliverable => "deliverable",
            Self::QuickWin => "quick-win",
            Self::Meeting => "meeting",
            Self::Blocker => "blocker",
        }
    }
}

impl TryFrom<&str> for TaskType {
    type Error = TaskDomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase().replace('_', "-");
        match normalized.as_str() {
            "task" => Ok(Self::Task),
            "deliverable" => Ok(Self::Deliverable),
            "quick-win" | "quickwin" => Ok(Self::QuickWin),
            "meeting" => Ok(Self::Meeting),
            "blocker" => Ok(Self::Blocker),
            _ => Err(TaskDomainError::InvalidTaskType(value.to_owned())),
        }
    }
}

impl fmt::Display for TaskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Top-level scope partitioning tasks and projects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Workspace {
    /// Personal life.
    #[default]
    Personal,
    /// Paid work.
    Work,
    /// Creative projects.
    Creative,
}

impl Workspace {
    /// Every workspace in display order.
    pub const ALL: [Self; 3] = [Self::Personal, Self::Work, Self::Creative];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Personal => "personal",
            Self::Work => "work",
            Self::Creative => "creative",
        }
    }
}

impl TryFrom<&str> for Workspace {
    type Error = TaskDomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "personal" => Ok(Self::Personal),
            "work" => Ok(Self::Work),
            "creative" => Ok(Self::Creative),
            _ => Err(TaskDomainError::InvalidWorkspace(value.to_owned())),
        }
    }
}

impl fmt::Display for Workspace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Urgency level; `P0` is the most urgent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum Priority {
    /// Most urgent.
    P0,
    /// Important.
    P1,
    /// Normal.
    #[default]
    P2,
}

impl Priority {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::P0 => "P0",
            Self::P1 => "P1",
            Self::P2 => "P2",
        }
    }
}

impl TryFrom<&str> for Priority {
    type Error = TaskDomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_uppercase().as_str() {
            "P0" => Ok(Self::P0),
            "P1" => Ok(Self::P1),
            "P2" => Ok(Self::P2),
            _ => Err(TaskDomainError::InvalidPriority(value.to_owned())),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
