//! Shared state for the Web API server.

use std::sync::Arc;

use crate::operations::tasks::TaskService;
use crate::storage::tasks::TaskStore;

/// Router state: one task service shared by every request
#[derive(Clone)]
pub struct AppState {
    pub tasks: Arc<TaskService>,
}

impl AppState {
    pub fn new(store: TaskStore) -> Self {
        Self {
            tasks: Arc::new(TaskService::new(store)),
        }
    }
}
