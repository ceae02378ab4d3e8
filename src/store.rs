//! In-memory task storage.
//!
//! Holds the process-wide mapping from task id to [`Task`]. The store is a
//! cheap-clone handle around a shared map; handlers receive it through
//! application state rather than a global. Every task in the store has a
//! non-empty id and description.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

/// Errors produced by task validation and store mutations.
#[derive(Debug, Clone, thiserror::Error)]
pub enum TaskError {
    #[error("fields id and description are required")]
    MissingFields,

    #[error("task with id = {0} already exists")]
    AlreadyExists(String),

    #[error("task with id = {0} not found")]
    NotFound(String),
}

/// A single tracked task.
///
/// All four fields are always present on the wire; `note` and
/// `applications` default to empty when absent from a request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier, acts as the store key
    pub id: String,

    /// What needs to be done
    pub description: String,

    /// Free-text note
    #[serde(default)]
    pub note: String,

    /// Applications used for the task, in insertion order
    #[serde(default)]
    pub applications: Vec<String>,
}

impl Task {
    /// Check the presence invariants: `id` and `description` must be
    /// non-empty.
    pub fn validate(&self) -> Result<(), TaskError> {
        if self.id.is_empty() || self.description.is_empty() {
            return Err(TaskError::MissingFields);
        }
        Ok(())
    }
}

/// In-memory store for tasks.
#[derive(Debug, Clone, Default)]
pub struct TaskStore {
    tasks: Arc<RwLock<HashMap<String, Task>>>,
}

impl TaskStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with the two seed tasks.
    pub fn seeded() -> Self {
        let mut tasks = HashMap::new();
        for task in seed_tasks() {
            tasks.insert(task.id.clone(), task);
        }
        Self {
            tasks: Arc::new(RwLock::new(tasks)),
        }
    }

    /// Snapshot of the full mapping.
    pub async fn list(&self) -> HashMap<String, Task> {
        let tasks = self.tasks.read().await;
        tasks.clone()
    }

    pub async fn get(&self, id: &str) -> Option<Task> {
        let tasks = self.tasks.read().await;
        tasks.get(id).cloned()
    }

    /// Insert a new task. Fails if a task with the same id already exists.
    pub async fn insert(&self, task: Task) -> Result<(), TaskError> {
        let mut tasks = self.tasks.write().await;
        if tasks.contains_key(&task.id) {
            return Err(TaskError::AlreadyExists(task.id.clone()));
        }
        tasks.insert(task.id.clone(), task);
        Ok(())
    }

    /// Replace an existing task wholesale. Fails if the id is not present.
    ///
    /// Fields missing from `task` are not merged from the stored record;
    /// the new value wins in full.
    pub async fn replace(&self, task: Task) -> Result<(), TaskError> {
        let mut tasks = self.tasks.write().await;
        if !tasks.contains_key(&task.id) {
            return Err(TaskError::NotFound(task.id.clone()));
        }
        tasks.insert(task.id.clone(), task);
        Ok(())
    }

    /// Remove a task by id. Fails if the id is not present.
    pub async fn remove(&self, id: &str) -> Result<(), TaskError> {
        let mut tasks = self.tasks.write().await;
        if tasks.remove(id).is_none() {
            return Err(TaskError::NotFound(id.to_string()));
        }
        Ok(())
    }
}

/// The two tasks present at process start.
fn seed_tasks() -> Vec<Task> {
    vec![
        Task {
            id: "1".to_string(),
            description: "Finish the task service".to_string(),
            note: "Ship it today and tomorrow is a free day".to_string(),
            applications: vec![
                "VS Code".to_string(),
                "Terminal".to_string(),
                "git".to_string(),
            ],
        },
        Task {
            id: "2".to_string(),
            description: "Exercise the endpoints with Postman".to_string(),
            note: "Best done during development, every time a handler changes".to_string(),
            applications: vec![
                "VS Code".to_string(),
                "Terminal".to_string(),
                "git".to_string(),
                "Postman".to_string(),
            ],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: &str, description: &str) -> Task {
        Task {
            id: id.to_string(),
            description: description.to_string(),
            note: String::new(),
            applications: Vec::new(),
        }
    }

    #[tokio::test]
    async fn insert_then_get_round_trips() {
        let store = TaskStore::new();
        let t = Task {
            id: "7".to_string(),
            description: "write tests".to_string(),
            note: "start with the store".to_string(),
            applications: vec!["Terminal".to_string()],
        };

        store.insert(t.clone()).await.unwrap();
        assert_eq!(store.get("7").await, Some(t));
    }

    #[tokio::test]
    async fn insert_rejects_duplicate_id() {
        let store = TaskStore::new();
        store.insert(task("7", "first")).await.unwrap();

        let err = store.insert(task("7", "second")).await.unwrap_err();
        assert!(matches!(err, TaskError::AlreadyExists(id) if id == "7"));
        // Stored record is untouched
        assert_eq!(store.get("7").await.unwrap().description, "first");
    }

    #[tokio::test]
    async fn replace_requires_existing_id() {
        let store = TaskStore::new();
        let err = store.replace(task("7", "nope")).await.unwrap_err();
        assert!(matches!(err, TaskError::NotFound(id) if id == "7"));
    }

    #[tokio::test]
    async fn replace_is_a_full_replace() {
        let store = TaskStore::new();
        let mut original = task("7", "original");
        original.note = "keep?".to_string();
        original.applications = vec!["git".to_string()];
        store.insert(original).await.unwrap();

        store.replace(task("7", "replaced")).await.unwrap();

        let stored = store.get("7").await.unwrap();
        assert_eq!(stored.description, "replaced");
        assert_eq!(stored.note, "");
        assert!(stored.applications.is_empty());
    }

    #[tokio::test]
    async fn remove_missing_id_fails() {
        let store = TaskStore::new();
        let err = store.remove("7").await.unwrap_err();
        assert!(matches!(err, TaskError::NotFound(id) if id == "7"));
    }

    #[tokio::test]
    async fn remove_then_get_returns_none() {
        let store = TaskStore::new();
        store.insert(task("7", "short-lived")).await.unwrap();

        store.remove("7").await.unwrap();
        assert_eq!(store.get("7").await, None);
    }

    #[tokio::test]
    async fn seeded_store_has_tasks_one_and_two() {
        let store = TaskStore::seeded();
        let tasks = store.list().await;

        assert_eq!(tasks.len(), 2);
        assert!(tasks.contains_key("1"));
        assert!(tasks.contains_key("2"));
        for t in tasks.values() {
            t.validate().unwrap();
        }
    }

    #[test]
    fn validate_rejects_empty_id() {
        assert!(matches!(
            task("", "described").validate(),
            Err(TaskError::MissingFields)
        ));
    }

    #[test]
    fn validate_rejects_empty_description() {
        assert!(matches!(
            task("7", "").validate(),
            Err(TaskError::MissingFields)
        ));
    }

    #[test]
    fn missing_wire_fields_default_to_empty() {
        let t: Task = serde_json::from_str(r#"{"id":"7","description":"bare"}"#).unwrap();
        assert_eq!(t.note, "");
        assert!(t.applications.is_empty());
    }
}
