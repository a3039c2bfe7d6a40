//! Integration tests for the JSON file collection repository.

#[path = "test_helpers/clock.rs"]
mod clock;

use camino::Utf8PathBuf;
use clock::FixedClock;
use focusboard::task::{
    adapters::json_file::{JsonFileCollectionRepository, PROJECTS_FILE, TODOS_FILE},
    domain::{TaskCollection, TaskDraft, Workspace},
    ports::{CollectionRepository, CollectionRepositoryError},
    services::TaskStoreService,
};
use rstest::{fixture, rstest};
use std::sync::Arc;

/// Scratch directory removed when dropped.
struct ScratchDir {
    path: Utf8PathBuf,
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        drop(std::fs::remove_dir_all(&self.path));
    }
}

#[fixture]
fn scratch() -> ScratchDir {
    let base = Utf8PathBuf::from_path_buf(std::env::temp_dir()).expect("temp dir is UTF-8");
    ScratchDir {
        path: base.join(format!("focusboard-{}", uuid::Uuid::new_v4())),
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn fresh_directory_has_no_saved_state(scratch: ScratchDir) {
    let repository =
        JsonFileCollectionRepository::open_ambient(&scratch.path).expect("directory opens");

    let loaded = repository.load().await.expect("load succeeds");

    assert!(loaded.is_none());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn store_state_survives_a_reopen(scratch: ScratchDir) {
    let clock = Arc::new(FixedClock::at_now());
    let repository = Arc::new(
        JsonFileCollectionRepository::open_ambient(&scratch.path).expect("directory opens"),
    );
    let store = TaskStoreService::open(Arc::clone(&repository), Arc::clone(&clock)).await;
    store
        .create_project("Album", "Second record", Workspace::Creative)
        .await
        .expect("project created");
    let created = store
        .create_task(TaskDraft::new("Write chorus", Workspace::Creative).with_project("Album"))
        .await
        .expect("valid draft")
        .applied()
        .expect("project exists");
    store
        .toggle_priority(created.id())
        .await
        .expect("task exists");

    let reopened = TaskStoreService::open(
        Arc::new(
            JsonFileCollectionRepository::open_ambient(&scratch.path).expect("directory opens"),
        ),
        clock,
    )
    .await;

    assert_eq!(reopened.snapshot().await, store.snapshot().await);
    assert!(scratch.path.join(TODOS_FILE).exists());
    assert!(scratch.path.join(PROJECTS_FILE).exists());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn corrupt_file_is_reported_as_malformed(scratch: ScratchDir) {
    let repository =
        JsonFileCollectionRepository::open_ambient(&scratch.path).expect("directory opens");
    std::fs::write(scratch.path.join(TODOS_FILE), "{ not json").expect("write corrupt file");

    let result = repository.load().await;

    assert!(matches!(
        result,
        Err(CollectionRepositoryError::Malformed { ref source_name, .. }) if source_name == TODOS_FILE
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn corrupt_state_opens_as_an_empty_store(scratch: ScratchDir) {
    let repository = Arc::new(
        JsonFileCollectionRepository::open_ambient(&scratch.path).expect("directory opens"),
    );
    std::fs::write(scratch.path.join(PROJECTS_FILE), "[1, 2").expect("write corrupt file");

    let store = TaskStoreService::open(repository, Arc::new(FixedClock::at_now())).await;

    assert_eq!(store.snapshot().await, TaskCollection::new());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn legacy_client_file_is_imported(scratch: ScratchDir) {
    let repository =
        JsonFileCollectionRepository::open_ambient(&scratch.path).expect("directory opens");
    let legacy = format!(
        r#"[{{"id":"{}","text":"Old meeting","isMeeting":true,"createdAt":"2025-12-01","dueDate":"2025-12-02"}}]"#,
        uuid::Uuid::new_v4()
    );
    std::fs::write(scratch.path.join(TODOS_FILE), legacy).expect("write legacy file");

    let loaded = repository
        .load()
        .await
        .expect("legacy file decodes")
        .expect("state present");

    let task = loaded.tasks().first().expect("one task");
    assert!(task.is_meeting());
    assert!(loaded.projects().is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn numeric_identifiers_survive_open_and_save(scratch: ScratchDir) {
    let repository = Arc::new(
        JsonFileCollectionRepository::open_ambient(&scratch.path).expect("directory opens"),
    );
    let legacy = r#"[
        {"id":1712345678901,"text":"Renew passport","createdAt":1712345678901},
        {"id":"1712345678902","text":"Find photos","createdAt":1712345678902,"parentId":1712345678901}
    ]"#;
    std::fs::write(scratch.path.join(TODOS_FILE), legacy).expect("write legacy file");
    let store = TaskStoreService::open(Arc::clone(&repository), Arc::new(FixedClock::at_now())).await;

    let snapshot = store.snapshot().await;
    let parent = snapshot.tasks().first().expect("legacy tasks kept").clone();
    store
        .toggle_completion(parent.id())
        .await
        .expect("task exists");
    let reloaded = repository
        .load()
        .await
        .expect("saved file decodes")
        .expect("state present");

    assert_eq!(snapshot.tasks().len(), 2);
    assert_eq!(parent.id().as_str(), "1712345678901");
    assert_eq!(snapshot.children_of(parent.id()).count(), 1);
    assert_eq!(reloaded.tasks().len(), 2);
    assert!(reloaded.get(parent.id()).expect("parent saved").is_completed());
}
