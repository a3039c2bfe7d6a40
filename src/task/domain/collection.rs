//! Whole-collection value holding every task and project.
//!
//! Mutations never modify `self`: each reducer returns a new collection, or
//! an error with the original left untouched.

use super::{
    Project, ProjectName, Task, TaskDomainError, TaskId, Workspace, hierarchy, priority_list,
};

/// Authoritative set of tasks and projects.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskCollection {
    tasks: Vec<Task>,
    projects: Vec<Project>,
}

impl TaskCollection {
    /// Creates an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a collection from stored parts.
    ///
    /// Priority positions are re-packed so imported gaps and duplicates
    /// disappear.
    #[must_use]
    pub fn from_parts(mut tasks: Vec<Task>, projects: Vec<Project>) -> Self {
        priority_list::repack(&mut tasks);
        Self { tasks, projects }
    }

    /// Splits the collection into its tasks and projects.
    #[must_use]
    pub fn into_parts(self) -> (Vec<Task>, Vec<Project>) {
        (self.tasks, self.projects)
    }

    /// Returns every task in insertion order.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Returns every project in insertion order.
    #[must_use]
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    /// Returns the task with `id`, if present.
    #[must_use]
    pub fn find(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id() == id)
    }

    /// Returns the task with `id`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::TaskNotFound`] when it is absent.
    pub fn get(&self, id: &TaskId) -> Result<&Task, TaskDomainError> {
        self.find(id)
            .ok_or_else(|| TaskDomainError::TaskNotFound(id.clone()))
    }

    /// Returns the direct children of `id`.
    pub fn children_of(&self, id: &TaskId) -> impl Iterator<Item = &Task> {
        self.tasks
            .iter()
            .filter(move |task| task.parent_id() == Some(id))
    }

    /// Returns the project named exactly `name` in `workspace`.
    #[must_use]
    pub fn project_named(&self, workspace: Workspace, name: &str) -> Option<&Project> {
        self.projects
            .iter()
            .find(|project| project.workspace() == workspace && project.name().as_str() == name)
    }

    /// Returns the priority list in order.
    #[must_use]
    pub fn priority_list(&self) -> Vec<&Task> {
        priority_list::ordered_ids(&self.tasks)
            .into_iter()
            .filter_map(|id| self.find(&id))
            .collect()
    }

    /// Adds a project.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::DuplicateProject`] when the workspace
    /// already holds a project with the same name.
    pub fn insert_project(&self, project: Project) -> Result<Self, TaskDomainError> {
        if self
            .project_named(project.workspace(), project.name().as_str())
            .is_some()
        {
            return Err(TaskDomainError::DuplicateProject {
                workspace: project.workspace(),
                name: project.name().to_string(),
            });
        }
        let mut next = self.clone();
        next.projects.push(project);
        Ok(next)
    }

    /// Adds a top-level task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::DuplicateTask`] for a reused identifier or
    /// [`TaskDomainError::UnknownProject`] when the task names a project
    /// missing from its workspace.
    pub fn insert_task(&self, task: Task) -> Result<Self, TaskDomainError> {
        if self.find(task.id()).is_some() {
            return Err(TaskDomainError::DuplicateTask(task.id().clone()));
        }
        self.ensure_project(task.workspace(), task.project())?;
        let mut next = self.clone();
        next.tasks.push(task);
        Ok(next)
    }

    /// Adds a task as a child of `parent_id`.
    ///
    /// The same eligibility rules as [`Self::link_parent`] apply.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`Self::insert_task`], plus
    /// [`TaskDomainError::TaskNotFound`] for a missing parent and any link
    /// rule violation.
    pub fn insert_child(&self, parent_id: &TaskId, mut task: Task) -> Result<Self, TaskDomainError> {
        let parent = self.get(parent_id)?;
        hierarchy::check_link(&task, parent, &self.tasks)?;
        task.set_parent(Some(parent_id.clone()));
        self.insert_task(task)
    }

    /// Applies `change` to the task with `id`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::TaskNotFound`] or the error raised by
    /// `change`.
    pub fn update_task(
        &self,
        id: &TaskId,
        change: impl FnOnce(&mut Task) -> Result<(), TaskDomainError>,
    ) -> Result<Self, TaskDomainError> {
        let mut next = self.clone();
        let task = next
            .tasks
            .iter_mut()
            .find(|task| task.id() == id)
            .ok_or_else(|| TaskDomainError::TaskNotFound(id.clone()))?;
        change(task)?;
        Ok(next)
    }

    /// Moves a task into `project`, or out of any project with `None`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::UnknownProject`] when the project does not
    /// exist in the task's workspace.
    pub fn assign_project(&self, id: &TaskId, project: Option<&str>) -> Result<Self, TaskDomainError> {
        let current = self.get(id)?;
        let name = project
            .filter(|name| !name.trim().is_empty())
            .map(ProjectName::new)
            .transpose()?;
        self.ensure_project(current.workspace(), name.as_ref())?;
        self.update_task(id, |task| {
            task.set_project(name);
            Ok(())
        })
    }

    /// Deletes a task.
    ///
    /// Children keep their now dangling parent reference. A listed task
    /// leaves the priority list and the remaining positions close up.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::TaskNotFound`] when it is absent.
    pub fn remove_task(&self, id: &TaskId) -> Result<Self, TaskDomainError> {
        self.get(id)?;
        let mut next = self.clone();
        next.tasks.retain(|task| task.id() != id);
        priority_list::repack(&mut next.tasks);
        Ok(next)
    }

    /// Links an existing task under a parent.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::TaskNotFound`] for either task, or the link
    /// rule violation reported by [`hierarchy::check_link`].
    pub fn link_parent(
        &self,
        child_id: &TaskId,
        parent_id: &TaskId,
    ) -> Result<Self, TaskDomainError> {
        let candidate = self.get(child_id)?;
        let parent = self.get(parent_id)?;
        hierarchy::check_link(candidate, parent, &self.tasks)?;
        self.update_task(child_id, |child| {
            child.set_parent(Some(parent_id.clone()));
            Ok(())
        })
    }

    /// Clears a task's parent reference.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::TaskNotFound`] when it is absent.
    pub fn unlink_parent(&self, child_id: &TaskId) -> Result<Self, TaskDomainError> {
        self.update_task(child_id, |child| {
            child.set_parent(None);
            Ok(())
        })
    }

    /// Adds a task to the end of the priority list, or removes it.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::TaskNotFound`] when it is absent.
    pub fn toggle_priority(&self, id: &TaskId) -> Result<Self, TaskDomainError> {
        self.get(id)?;
        let mut next = self.clone();
        priority_list::toggle(&mut next.tasks, id);
        Ok(next)
    }

    /// Moves the priority entry at `from` to `to`, shifting the others.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::PriorityIndexOutOfRange`] when either
    /// position is outside the list.
    pub fn reorder_priority(&self, from: usize, to: usize) -> Result<Self, TaskDomainError> {
        let mut next = self.clone();
        priority_list::move_entry(&mut next.tasks, from, to)?;
        Ok(next)
    }

    /// Appends suggested tasks to the priority list in the given order.
    ///
    /// Unknown, completed and already listed identifiers are skipped.
    #[must_use]
    pub fn promote_to_priority(&self, ids: &[TaskId]) -> Self {
        let eligible: Vec<TaskId> = ids
            .iter()
            .filter(|id| self.find(id).is_some_and(|task| !task.is_completed()))
            .cloned()
            .collect();
        let mut next = self.clone();
        priority_list::extend(&mut next.tasks, &eligible);
        next
    }

    fn ensure_project(
        &self,
        workspace: Workspace,
        project: Option<&ProjectName>,
    ) -> Result<(), TaskDomainError> {
        match project {
            Some(name) if self.project_named(workspace, name.as_str()).is_none() => {
                Err(TaskDomainError::UnknownProject {
                    workspace,
                    name: name.to_string(),
                })
            }
            _ => Ok(()),
        }
    }
}
