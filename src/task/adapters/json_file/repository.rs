//! Whole-collection repository writing one JSON blob per list.

use async_trait::async_trait;
use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::io;
use std::sync::Arc;

use crate::task::{
    domain::{Project, Task, TaskCollection},
    ports::{CollectionRepository, CollectionRepositoryError, CollectionRepositoryResult},
};

/// File holding the serialised task list.
pub const TODOS_FILE: &str = "todos.json";

/// File holding the serialised project list.
pub const PROJECTS_FILE: &str = "projects.json";

/// Repository persisting the task and project lists as JSON files.
///
/// Each save rewrites both files in full through a temporary file and a
/// rename, so readers never observe a half-written list.
#[derive(Debug, Clone)]
pub struct JsonFileCollectionRepository {
    dir: Arc<Dir>,
}

impl JsonFileCollectionRepository {
    /// Wraps an already opened directory.
    #[must_use]
    pub fn new(dir: Dir) -> Self {
        Self { dir: Arc::new(dir) }
    }

    /// Opens `path`, creating it when missing.
    ///
    /// # Errors
    ///
    /// Returns the I/O error raised while creating or opening the directory.
    pub fn open_ambient(path: &Utf8Path) -> io::Result<Self> {
        Dir::create_ambient_dir_all(path, ambient_authority())?;
        Dir::open_ambient_dir(path, ambient_authority()).map(Self::new)
    }
}

fn read_list<T: DeserializeOwned>(
    dir: &Dir,
    file: &str,
) -> CollectionRepositoryResult<Option<Vec<T>>> {
    let raw = match dir.read_to_string(file) {
        Ok(raw) => raw,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(CollectionRepositoryError::persistence(err)),
    };
    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|err| CollectionRepositoryError::Malformed {
            source_name: file.to_owned(),
            reason: err.to_string(),
        })
}

fn write_list<T: Serialize>(dir: &Dir, file: &str, items: &[T]) -> CollectionRepositoryResult<()> {
    let encoded = serde_json::to_vec(items).map_err(CollectionRepositoryError::persistence)?;
    let staging = format!("{file}.tmp");
    dir.write(&staging, encoded)
        .map_err(CollectionRepositoryError::persistence)?;
    dir.rename(&staging, dir, file)
        .map_err(CollectionRepositoryError::persistence)
}

fn load_blocking(dir: &Dir) -> CollectionRepositoryResult<Option<TaskCollection>> {
    let tasks: Option<Vec<Task>> = read_list(dir, TODOS_FILE)?;
    let projects: Option<Vec<Project>> = read_list(dir, PROJECTS_FILE)?;
    if tasks.is_none() && projects.is_none() {
        return Ok(None);
    }
    Ok(Some(TaskCollection::from_parts(
        tasks.unwrap_or_default(),
        projects.unwrap_or_default(),
    )))
}

fn save_blocking(dir: &Dir, collection: &TaskCollection) -> CollectionRepositoryResult<()> {
    write_list(dir, TODOS_FILE, collection.tasks())?;
    write_list(dir, PROJECTS_FILE, collection.projects())
}

async fn run_blocking<T, F>(task: F) -> CollectionRepositoryResult<T>
where
    F: FnOnce() -> CollectionRepositoryResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(task)
        .await
        .map_err(|err| CollectionRepositoryError::persistence(io::Error::other(err.to_string())))?
}

#[async_trait]
impl CollectionRepository for JsonFileCollectionRepository {
    async fn load(&self) -> CollectionRepositoryResult<Option<TaskCollection>> {
        let dir = Arc::clone(&self.dir);
        run_blocking(move || load_blocking(&dir)).await
    }

    async fn save(&self, collection: &TaskCollection) -> CollectionRepositoryResult<()> {
        let dir = Arc::clone(&self.dir);
        let snapshot = collection.clone();
        run_blocking(move || save_blocking(&dir, &snapshot)).await
    }
}
