//! Service owning the authoritative task collection.

use crate::task::{
    domain::{
        Priority, Project, ProjectName, Task, TaskCollection, TaskDetails, TaskDomainError,
        TaskDraft, TaskId, TaskType, Timestamp, Workspace, hierarchy, priority_order,
    },
    ports::{CollectionRepository, CollectionRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, info, warn};

/// Service-level errors for task store operations.
#[derive(Debug, Error)]
pub enum TaskStoreError {
    /// Domain validation failed; nothing was changed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// An explicit flush could not be written.
    #[error(transparent)]
    Repository(#[from] CollectionRepositoryError),
}

/// Result type for task store operations.
pub type TaskStoreResult<T> = Result<T, TaskStoreError>;

#[derive(Debug, Clone, PartialEq, Eq)]
enum PendingKind {
    CreateTask {
        draft: TaskDraft,
        parent: Option<TaskId>,
    },
    ChangeProject {
        task_id: TaskId,
    },
}

/// Mutation paused because it names a project that does not exist yet.
///
/// Hand it back to [`TaskStoreService::resume_with_project`] to create the
/// project and apply the mutation, or to
/// [`TaskStoreService::abandon_pending`] to drop it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingMutation {
    kind: PendingKind,
    workspace: Workspace,
    project: ProjectName,
}

impl PendingMutation {
    /// Returns the workspace the project must be created in.
    #[must_use]
    pub const fn workspace(&self) -> Workspace {
        self.workspace
    }

    /// Returns the name of the missing project.
    #[must_use]
    pub const fn project_name(&self) -> &ProjectName {
        &self.project
    }

    /// Returns the task the mutation targets, when it edits an existing one.
    #[must_use]
    pub const fn target(&self) -> Option<&TaskId> {
        match &self.kind {
            PendingKind::ChangeProject { task_id } => Some(task_id),
            PendingKind::CreateTask { .. } => None,
        }
    }
}

/// Result of a mutation that may need a project created first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreOutcome<T> {
    /// The mutation was applied and persisted.
    Applied(T),
    /// The mutation is paused until the named project exists.
    ProjectRequired(PendingMutation),
}

impl<T> StoreOutcome<T> {
    /// Returns the applied value, if any.
    #[must_use]
    pub fn applied(self) -> Option<T> {
        match self {
            Self::Applied(value) => Some(value),
            Self::ProjectRequired(_) => None,
        }
    }
}

#[derive(Debug, Default)]
struct StoreState {
    collection: TaskCollection,
    revision: u64,
}

/// Task store holding one collection behind a mutex.
///
/// Every mutation is computed from the current collection by a pure
/// reducer, swapped in, and written through the repository in full. Writes
/// are fire-and-forget: a failed save is logged and the in-memory change
/// stands.
pub struct TaskStoreService<R, C>
where
    R: CollectionRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
    state: Mutex<StoreState>,
}

impl<R, C> TaskStoreService<R, C>
where
    R: CollectionRepository,
    C: Clock + Send + Sync,
{
    /// Opens the store, loading any saved collection.
    ///
    /// Saved state that cannot be read or decoded is logged and replaced by
    /// an empty collection.
    pub async fn open(repository: Arc<R>, clock: Arc<C>) -> Self {
        let collection = match repository.load().await {
            Ok(Some(collection)) => {
                info!(
                    tasks = collection.tasks().len(),
                    projects = collection.projects().len(),
                    "loaded saved collection"
                );
                collection
            }
            Ok(None) => TaskCollection::new(),
            Err(err) => {
                warn!(error = %err, "discarding unreadable saved state");
                TaskCollection::new()
            }
        };
        Self {
            repository,
            clock,
            state: Mutex::new(StoreState {
                collection,
                revision: 0,
            }),
        }
    }

    /// Returns a copy of the current collection.
    pub async fn snapshot(&self) -> TaskCollection {
        self.state.lock().await.collection.clone()
    }

    /// Returns the number of mutations applied since the store was opened.
    pub async fn revision(&self) -> u64 {
        self.state.lock().await.revision
    }

    /// Writes the current collection and reports the outcome.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Repository`] when the write fails.
    pub async fn flush(&self) -> TaskStoreResult<()> {
        let state = self.state.lock().await;
        self.repository.save(&state.collection).await?;
        Ok(())
    }

    /// Creates a top-level task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Domain`] when the draft is invalid.
    pub async fn create_task(&self, draft: TaskDraft) -> TaskStoreResult<StoreOutcome<Task>> {
        self.create(draft, None).await
    }

    /// Creates a task as a child of `parent_id`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Domain`] when the draft is invalid or the
    /// parent may not take a child of the draft's type.
    pub async fn create_child(
        &self,
        parent_id: &TaskId,
        draft: TaskDraft,
    ) -> TaskStoreResult<StoreOutcome<Task>> {
        self.create(draft, Some(parent_id.clone())).await
    }

    /// Creates the project a paused mutation needs, then applies it.
    ///
    /// A project created with the same name in the meantime is reused.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Domain`] when the resumed mutation is no
    /// longer valid; nothing is changed in that case.
    pub async fn resume_with_project(
        &self,
        pending: PendingMutation,
        description: &str,
    ) -> TaskStoreResult<Task> {
        let mut state = self.state.lock().await;
        self.apply_locked(&mut state, "resume_with_project", |collection, clock| {
            let PendingMutation {
                kind,
                workspace,
                project,
            } = pending;
            let with_project = if collection
                .project_named(workspace, project.as_str())
                .is_some()
            {
                collection.clone()
            } else {
                collection.insert_project(Project::new(
                    project.as_str(),
                    description,
                    workspace,
                    clock,
                )?)?
            };
            match kind {
                PendingKind::CreateTask { draft, parent } => {
                    let task = Task::new(draft, clock)?;
                    let id = task.id().clone();
                    let next = match parent {
                        Some(parent_id) => with_project.insert_child(&parent_id, task)?,
                        None => with_project.insert_task(task)?,
                    };
                    let created = next.get(&id)?.clone();
                    Ok((next, created))
                }
                PendingKind::ChangeProject { task_id } => {
                    let next = with_project.assign_project(&task_id, Some(project.as_str()))?;
                    let updated = next.get(&task_id)?.clone();
                    Ok((next, updated))
                }
            }
        })
        .await
    }

    /// Drops a paused mutation without changing anything.
    pub fn abandon_pending(&self, pending: PendingMutation) {
        debug!(
            project = %pending.project,
            workspace = %pending.workspace,
            "abandoned mutation awaiting project creation"
        );
        drop(pending);
    }

    /// Creates a project.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Domain`] when the name is blank or already
    /// used in the workspace.
    pub async fn create_project(
        &self,
        name: &str,
        description: &str,
        workspace: Workspace,
    ) -> TaskStoreResult<Project> {
        self.commit("create_project", |collection, clock| {
            let project = Project::new(name, description, workspace, clock)?;
            let next = collection.insert_project(project.clone())?;
            Ok((next, project))
        })
        .await
    }

    /// Flips a task's completion flag.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Domain`] when the task does not exist.
    pub async fn toggle_completion(&self, id: &TaskId) -> TaskStoreResult<Task> {
        self.update("toggle_completion", id, |task| {
            task.toggle_completion();
            Ok(())
        })
        .await
    }

    /// Changes a task's type.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Domain`] when the task does not exist.
    pub async fn change_type(&self, id: &TaskId, task_type: TaskType) -> TaskStoreResult<Task> {
        self.update("change_type", id, |task| {
            task.set_type(task_type);
            Ok(())
        })
        .await
    }

    /// Sets the due date and time of a non-meeting task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Domain`] when the task does not exist or is
    /// a meeting given a due time.
    pub async fn set_due(
        &self,
        id: &TaskId,
        due_date: Option<Timestamp>,
        due_time: Option<String>,
    ) -> TaskStoreResult<Task> {
        self.update("set_due", id, |task| task.set_due(due_date, due_time))
            .await
    }

    /// Sets the instant and displayed time of a meeting.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Domain`] when the task does not exist or is
    /// not a meeting.
    pub async fn schedule_meeting(
        &self,
        id: &TaskId,
        at: Option<Timestamp>,
        meeting_time: Option<String>,
    ) -> TaskStoreResult<Task> {
        self.update("schedule_meeting", id, |task| {
            task.schedule_meeting(at, meeting_time)
        })
        .await
    }

    /// Sets the earliest actionable instant.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Domain`] when the task does not exist.
    pub async fn set_start_date(
        &self,
        id: &TaskId,
        start_date: Option<Timestamp>,
    ) -> TaskStoreResult<Task> {
        self.update("set_start_date", id, |task| {
            task.set_start_date(start_date);
            Ok(())
        })
        .await
    }

    /// Sets the priority level.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Domain`] when the task does not exist.
    pub async fn set_priority(&self, id: &TaskId, priority: Priority) -> TaskStoreResult<Task> {
        self.update("set_priority", id, |task| {
            task.set_priority(priority);
            Ok(())
        })
        .await
    }

    /// Sets the end-of-day flag.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Domain`] when the task does not exist.
    pub async fn set_eod(&self, id: &TaskId, is_eod: bool) -> TaskStoreResult<Task> {
        self.update("set_eod", id, |task| {
            task.set_eod(is_eod);
            Ok(())
        })
        .await
    }

    /// Replaces agenda, notes and links.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Domain`] when the task does not exist.
    pub async fn update_details(&self, id: &TaskId, details: TaskDetails) -> TaskStoreResult<Task> {
        self.update("update_details", id, |task| {
            task.set_details(details);
            Ok(())
        })
        .await
    }

    /// Replaces a task's description.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Domain`] when the task does not exist or the
    /// text is blank.
    pub async fn rename(&self, id: &TaskId, text: &str) -> TaskStoreResult<Task> {
        self.update("rename", id, |task| task.rename(text)).await
    }

    /// Moves a task into a project, or out of any with `None`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Domain`] when the task does not exist.
    pub async fn change_project(
        &self,
        id: &TaskId,
        project: Option<&str>,
    ) -> TaskStoreResult<StoreOutcome<Task>> {
        let mut state = self.state.lock().await;
        let workspace = state.collection.get(id)?.workspace();
        let name = project
            .filter(|name| !name.trim().is_empty())
            .map(ProjectName::new)
            .transpose()?;
        if let Some(pending) = name.and_then(|missing| {
            missing_project(&state.collection, workspace, missing, PendingKind::ChangeProject {
                task_id: id.clone(),
            })
        }) {
            return Ok(StoreOutcome::ProjectRequired(pending));
        }
        self.apply_locked(&mut state, "change_project", |collection, _| {
            let next = collection.assign_project(id, project)?;
            let updated = next.get(id)?.clone();
            Ok((next, updated))
        })
        .await
        .map(StoreOutcome::Applied)
    }

    /// Links an existing task under a parent.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Domain`] when either task is missing or the
    /// link breaks an eligibility rule.
    pub async fn link_parent(
        &self,
        child_id: &TaskId,
        parent_id: &TaskId,
    ) -> TaskStoreResult<Task> {
        self.commit("link_parent", |collection, _| {
            let next = collection.link_parent(child_id, parent_id)?;
            let child = next.get(child_id)?.clone();
            Ok((next, child))
        })
        .await
    }

    /// Clears a task's parent reference.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Domain`] when the task does not exist.
    pub async fn unlink_parent(&self, child_id: &TaskId) -> TaskStoreResult<Task> {
        self.commit("unlink_parent", |collection, _| {
            let next = collection.unlink_parent(child_id)?;
            let child = next.get(child_id)?.clone();
            Ok((next, child))
        })
        .await
    }

    /// Adds a task to, or removes it from, the priority list.
    ///
    /// Returns the resulting list order.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Domain`] when the task does not exist.
    pub async fn toggle_priority(&self, id: &TaskId) -> TaskStoreResult<Vec<TaskId>> {
        self.commit("toggle_priority", |collection, _| {
            let next = collection.toggle_priority(id)?;
            let order = priority_order(next.tasks());
            Ok((next, order))
        })
        .await
    }

    /// Moves the priority entry at `from` to `to`.
    ///
    /// Returns the resulting list order.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Domain`] when either position is outside
    /// the list.
    pub async fn reorder_priority(&self, from: usize, to: usize) -> TaskStoreResult<Vec<TaskId>> {
        self.commit("reorder_priority", |collection, _| {
            let next = collection.reorder_priority(from, to)?;
            let order = priority_order(next.tasks());
            Ok((next, order))
        })
        .await
    }

    /// Appends assistant-suggested tasks to the priority list.
    ///
    /// Returns the resulting list order.
    ///
    /// # Errors
    ///
    /// Unknown, completed and already listed identifiers are skipped rather
    /// than reported, so this currently always succeeds.
    pub async fn accept_priority_suggestions(
        &self,
        ids: &[TaskId],
    ) -> TaskStoreResult<Vec<TaskId>> {
        self.commit("accept_priority_suggestions", |collection, _| {
            let next = collection.promote_to_priority(ids);
            let order = priority_order(next.tasks());
            Ok((next, order))
        })
        .await
    }

    /// Deletes a task without touching its children.
    ///
    /// Returns the removed task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Domain`] when the task does not exist.
    pub async fn delete_task(&self, id: &TaskId) -> TaskStoreResult<Task> {
        self.commit("delete_task", |collection, _| {
            let removed = collection.get(id)?.clone();
            let next = collection.remove_task(id)?;
            Ok((next, removed))
        })
        .await
    }

    async fn create(
        &self,
        draft: TaskDraft,
        parent: Option<TaskId>,
    ) -> TaskStoreResult<StoreOutcome<Task>> {
        let mut state = self.state.lock().await;
        let candidate = Task::new(draft.clone(), self.clock.as_ref())?;
        if let Some(parent_id) = &parent {
            let parent_task = state.collection.get(parent_id)?;
            hierarchy::check_link(&candidate, parent_task, state.collection.tasks())?;
        }
        if let Some(name) = candidate.project().cloned() {
            let kind = PendingKind::CreateTask {
                draft,
                parent: parent.clone(),
            };
            if let Some(pending) =
                missing_project(&state.collection, candidate.workspace(), name, kind)
            {
                return Ok(StoreOutcome::ProjectRequired(pending));
            }
        }
        let operation = if parent.is_some() {
            "create_child"
        } else {
            "create_task"
        };
        self.apply_locked(&mut state, operation, |collection, _| {
            let id = candidate.id().clone();
            let next = match &parent {
                Some(parent_id) => collection.insert_child(parent_id, candidate)?,
                None => collection.insert_task(candidate)?,
            };
            let created = next.get(&id)?.clone();
            Ok((next, created))
        })
        .await
        .map(StoreOutcome::Applied)
    }

    async fn update(
        &self,
        operation: &'static str,
        id: &TaskId,
        change: impl FnOnce(&mut Task) -> Result<(), TaskDomainError>,
    ) -> TaskStoreResult<Task> {
        self.commit(operation, |collection, _| {
            let next = collection.update_task(id, change)?;
            let updated = next.get(id)?.clone();
            Ok((next, updated))
        })
        .await
    }

    async fn commit<T>(
        &self,
        operation: &'static str,
        apply: impl FnOnce(&TaskCollection, &C) -> Result<(TaskCollection, T), TaskDomainError>,
    ) -> TaskStoreResult<T> {
        let mut state = self.state.lock().await;
        self.apply_locked(&mut state, operation, apply).await
    }

    async fn apply_locked<T>(
        &self,
        state: &mut MutexGuard<'_, StoreState>,
        operation: &'static str,
        apply: impl FnOnce(&TaskCollection, &C) -> Result<(TaskCollection, T), TaskDomainError>,
    ) -> TaskStoreResult<T> {
        let (next, value) = apply(&state.collection, self.clock.as_ref())?;
        if let Err(err) = self.repository.save(&next).await {
            warn!(operation, error = %err, "failed to persist collection");
        }
        state.collection = next;
        state.revision += 1;
        debug!(operation, revision = state.revision, "collection updated");
        Ok(value)
    }
}

fn missing_project(
    collection: &TaskCollection,
    workspace: Workspace,
    project: ProjectName,
    kind: PendingKind,
) -> Option<PendingMutation> {
    collection
        .project_named(workspace, project.as_str())
        .is_none()
        .then_some(PendingMutation {
            kind,
            workspace,
            project,
        })
}
