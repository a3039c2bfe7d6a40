//! Named task groupings within a workspace.

use super::{ProjectId, ProjectName, TaskDomainError, Timestamp, Workspace};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Project grouping tasks inside one workspace.
///
/// Projects are created explicitly, or on confirmation when a task names one
/// that does not exist yet. They are never removed when their last task goes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    id: ProjectId,
    name: ProjectName,
    #[serde(default)]
    description: String,
    #[serde(default)]
    workspace: Workspace,
    created_at: Timestamp,
}

impl Project {
    /// Creates a project.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyProjectName`] when the name is blank.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        workspace: Workspace,
        clock: &impl Clock,
    ) -> Result<Self, TaskDomainError> {
        Ok(Self {
            id: ProjectId::new(),
            name: ProjectName::new(name)?,
            description: description.into().trim().to_owned(),
            workspace,
            created_at: Timestamp::now(clock),
        })
    }

    /// Returns the project identifier.
    #[must_use]
    pub const fn id(&self) -> ProjectId {
        self.id
    }

    /// Returns the project name.
    #[must_use]
    pub const fn name(&self) -> &ProjectName {
        &self.name
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the owning workspace.
    #[must_use]
    pub const fn workspace(&self) -> Workspace {
        self.workspace
    }

    /// Returns the creation instant.
    #[must_use]
    pub const fn created_at(&self) -> Timestamp {
        self.created_at
    }
}
