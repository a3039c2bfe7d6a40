//! Visible subset selection by workspace and project.

use crate::task::domain::{Task, Workspace};
use serde::{Deserialize, Serialize};

/// Workspace and project filter applied before deriving views.
///
/// An empty filter selects the whole collection. A project filter only
/// applies together with a workspace, since names are unique per workspace.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewFilter {
    workspace: Option<Workspace>,
    project: Option<String>,
}

impl ViewFilter {
    /// Selects every task.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Selects one workspace.
    #[must_use]
    pub const fn workspace(workspace: Workspace) -> Self {
        Self {
            workspace: Some(workspace),
            project: None,
        }
    }

    /// Selects one project of a workspace.
    #[must_use]
    pub fn project(workspace: Workspace, project: impl Into<String>) -> Self {
        Self {
            workspace: Some(workspace),
            project: Some(project.into()),
        }
    }

    /// Returns whether `task` is visible through this filter.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        let Some(workspace) = self.workspace else {
            return true;
        };
        if task.workspace() != workspace {
            return false;
        }
        self.project.as_deref().is_none_or(|project| {
            task.project()
                .is_some_and(|name| name.as_str() == project)
        })
    }

    /// Returns the visible tasks in collection order.
    #[must_use]
    pub fn select<'a>(&self, tasks: &'a [Task]) -> Vec<&'a Task> {
        tasks.iter().filter(|task| self.matches(task)).collect()
    }
}
