//! Shared world state for planning BDD scenarios.

use std::sync::Arc;

use super::clock::FixedClock;
use focusboard::{
    insight::{Alert, MetricsReport, Moment, Suggestion},
    task::{
        adapters::memory::InMemoryCollectionRepository,
        domain::{Task, TaskDraft, TaskId, Timestamp, Workspace},
        services::TaskStoreService,
    },
};
use rstest::fixture;

/// Store type used by the BDD world.
pub type TestStore = TaskStoreService<InMemoryCollectionRepository, FixedClock>;

/// Scenario world for planning behaviour tests.
pub struct PlanningWorld {
    pub clock: FixedClock,
    pub store: TestStore,
    pub meeting: Option<TaskId>,
    pub preparation: Option<TaskId>,
    pub priority_ids: Vec<TaskId>,
    pub moved: Option<TaskId>,
    pub alerts: Vec<Alert>,
    pub metrics: Option<MetricsReport>,
    pub suggestions: Vec<Suggestion>,
}

impl PlanningWorld {
    /// Creates a world around an empty store.
    #[must_use]
    pub fn new() -> Self {
        let clock = FixedClock::at_now();
        let store = run_async(TaskStoreService::open(
            Arc::new(InMemoryCollectionRepository::new()),
            Arc::new(clock),
        ));
        Self {
            clock,
            store,
            meeting: None,
            preparation: None,
            priority_ids: Vec::new(),
            moved: None,
            alerts: Vec::new(),
            metrics: None,
            suggestions: Vec::new(),
        }
    }

    /// Returns the evaluation moment matching the world clock.
    pub fn moment(&self) -> Moment {
        Moment::at_utc(self.clock.instant())
    }

    /// Returns a timestamp `hours` away from now.
    pub fn hours_from_now(&self, hours: i64) -> Timestamp {
        Timestamp::from_datetime(self.clock.instant() + chrono::Duration::hours(hours))
    }

    /// Returns the current task list.
    pub fn tasks(&self) -> Vec<Task> {
        run_async(self.store.snapshot()).tasks().to_vec()
    }

    /// Creates a top-level task and returns it.
    pub fn create(&self, draft: TaskDraft) -> Result<Task, eyre::Report> {
        run_async(self.store.create_task(draft))?
            .applied()
            .ok_or_else(|| eyre::eyre!("creation unexpectedly needs a project"))
    }

    /// Creates `count` tasks built by `draft`.
    pub fn create_many(
        &self,
        count: usize,
        draft: impl Fn(usize) -> TaskDraft,
    ) -> Result<Vec<Task>, eyre::Report> {
        (0..count).map(|n| self.create(draft(n))).collect()
    }
}

impl Default for PlanningWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> PlanningWorld {
    PlanningWorld::default()
}

/// Builds a personal draft.
pub fn personal(text: impl Into<String>) -> TaskDraft {
    TaskDraft::new(text, Workspace::Personal)
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
