//! Core task operations shared between CLI and Web API
//!
//! `TaskService` owns a [`TaskStore`] and serializes every
//! read-modify-write of the task document behind one mutex, so concurrent
//! requests never overwrite each other's changes.
//!
//! ```text
//! CLI (src/cli)     ──┐
//!                     ├──> operations::tasks (this module) ──> storage::tasks
//! Web (handlers)  ────┘
//! ```

use std::sync::{Mutex, MutexGuard};

use chrono::Utc;

use crate::error::{Result, TaskError};
use crate::storage::tasks::{Task, TaskStore};

pub const TITLE_REQUIRED: &str = "Title is required";
pub const TASK_NOT_FOUND: &str = "Task not found";
pub const COMPLETED_NOT_BOOLEAN: &str = "completed must be boolean";

/// View selector over the task collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TaskFilter {
    #[default]
    All,
    Active,
    Completed,
}

impl TaskFilter {
    /// Parse a filter name; unknown names select everything.
    pub fn parse(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "active" => Self::Active,
            "completed" => Self::Completed,
            _ => Self::All,
        }
    }

    pub fn matches(self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Active => !task.completed,
            Self::Completed => task.completed,
        }
    }
}

/// Input for `create`
#[derive(Debug, Clone, Default)]
pub struct NewTask {
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<String>,
}

/// Input for `update` (replaces every mutable field)
#[derive(Debug, Clone, Default)]
pub struct TaskUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<String>,
    pub completed: Option<bool>,
}

/// Validated mutable fields
struct Fields {
    title: String,
    description: String,
    due_date: String,
}

fn sanitize(value: Option<&str>) -> String {
    value.map(str::trim).unwrap_or_default().to_string()
}

fn validate_fields(
    title: Option<&str>,
    description: Option<&str>,
    due_date: Option<&str>,
) -> Result<Fields> {
    let title = sanitize(title);
    if title.is_empty() {
        return Err(TaskError::validation(TITLE_REQUIRED));
    }

    Ok(Fields {
        title,
        description: sanitize(description),
        due_date: sanitize(due_date),
    })
}

fn position(tasks: &[Task], id: &str) -> Result<usize> {
    tasks
        .iter()
        .position(|t| t.id == id)
        .ok_or_else(|| TaskError::not_found(TASK_NOT_FOUND))
}

pub struct TaskService {
    store: TaskStore,
    lock: Mutex<()>,
}

impl TaskService {
    pub fn new(store: TaskStore) -> Self {
        Self {
            store,
            lock: Mutex::new(()),
        }
    }

    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    fn guard(&self) -> Result<MutexGuard<'_, ()>> {
        self.lock
            .lock()
            .map_err(|_| TaskError::storage("task store lock poisoned"))
    }

    fn persist(&self, tasks: &[Task]) -> Result<()> {
        self.store.write_all(tasks).map_err(|e| {
            tracing::error!(path = %self.store.path().display(), error = %e, "failed to write tasks");
            TaskError::from(e)
        })
    }

    /// List tasks in stored order, keeping those selected by `filter`
    pub fn list(&self, filter: TaskFilter) -> Result<Vec<Task>> {
        let _guard = self.guard()?;
        let mut tasks = self.store.read_all();
        tasks.retain(|t| filter.matches(t));
        Ok(tasks)
    }

    pub fn get(&self, id: &str) -> Result<Task> {
        let _guard = self.guard()?;
        let tasks = self.store.read_all();
        let idx = position(&tasks, id)?;
        Ok(tasks[idx].clone())
    }

    /// Create a new task
    ///
    /// # Steps
    ///
    /// 1. Trim input; the title must not be empty
    /// 2. Assign a fresh UUID, `completed = false`, both timestamps = now
    /// 3. Append to the collection and persist
    pub fn create(&self, input: NewTask) -> Result<Task> {
        let fields = validate_fields(
            input.title.as_deref(),
            input.description.as_deref(),
            input.due_date.as_deref(),
        )?;

        let _guard = self.guard()?;
        let mut tasks = self.store.read_all();

        let mut id = uuid::Uuid::new_v4().to_string();
        while tasks.iter().any(|t| t.id == id) {
            id = uuid::Uuid::new_v4().to_string();
        }

        let now = Utc::now();
        let task = Task {
            id,
            title: fields.title,
            description: fields.description,
            due_date: fields.due_date,
            completed: false,
            created_at: now,
            updated_at: now,
        };
        tasks.push(task.clone());
        self.persist(&tasks)?;

        tracing::info!(id = %task.id, title = %task.title, "task created");
        Ok(task)
    }

    /// Replace every mutable field of a task
    ///
    /// Unknown ids fail with NotFound before the input is validated.
    pub fn update(&self, id: &str, input: TaskUpdate) -> Result<Task> {
        let _guard = self.guard()?;
        let mut tasks = self.store.read_all();
        let idx = position(&tasks, id)?;

        let fields = validate_fields(
            input.title.as_deref(),
            input.description.as_deref(),
            input.due_date.as_deref(),
        )?;

        let task = &mut tasks[idx];
        task.title = fields.title;
        task.description = fields.description;
        task.due_date = fields.due_date;
        task.completed = input.completed.unwrap_or(false);
        task.updated_at = Utc::now();
        let updated = task.clone();

        self.persist(&tasks)?;
        tracing::info!(id = %updated.id, "task updated");
        Ok(updated)
    }

    /// Set the completion flag
    ///
    /// `None` stands for a missing or non-boolean `completed` value.
    pub fn set_completion(&self, id: &str, completed: Option<bool>) -> Result<Task> {
        let _guard = self.guard()?;
        let mut tasks = self.store.read_all();
        let idx = position(&tasks, id)?;

        let completed = completed.ok_or_else(|| TaskError::validation(COMPLETED_NOT_BOOLEAN))?;

        let task = &mut tasks[idx];
        task.completed = completed;
        task.updated_at = Utc::now();
        let updated = task.clone();

        self.persist(&tasks)?;
        tracing::info!(id = %updated.id, completed, "task completion set");
        Ok(updated)
    }

    pub fn remove(&self, id: &str) -> Result<Task> {
        let _guard = self.guard()?;
        let mut tasks = self.store.read_all();
        let idx = position(&tasks, id)?;

        let removed = tasks.remove(idx);
        self.persist(&tasks)?;

        tracing::info!(id = %removed.id, "task deleted");
        Ok(removed)
    }
}
