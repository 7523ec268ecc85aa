//! Task API handlers

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::api::state::AppState;
use crate::error::TaskError;
use crate::operations::tasks::{NewTask, TaskFilter, TaskUpdate};
use crate::storage::tasks::Task;

// ============================================================================
// Request/Response DTOs
// ============================================================================

/// Task list query parameters
#[derive(Debug, Deserialize)]
pub struct TaskListQuery {
    pub filter: Option<String>, // "all" | "active" | "completed"
}

/// Create task request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<String>,
}

/// Full update request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<String>,
    pub completed: Option<bool>,
}

/// Completion request
#[derive(Debug, Deserialize)]
pub struct CompletionRequest {
    pub completed: Option<bool>,
}

/// Error body returned by every failing route
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

// ============================================================================
// Error mapping
// ============================================================================

/// Handler failure rendered as `{"error": "..."}`
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// Map a service error; storage failures get the route's generic message
    fn from_task(err: TaskError, failure: &str) -> Self {
        match err {
            TaskError::Validation(msg) => Self::new(StatusCode::BAD_REQUEST, msg),
            TaskError::NotFound(msg) => Self::new(StatusCode::NOT_FOUND, msg),
            other => {
                tracing::error!(error = %other, "{}", failure);
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, failure)
            }
        }
    }

    /// Any body the JSON extractor refuses (bad syntax, wrong shape,
    /// missing content type) is a 400
    fn from_rejection(rejection: JsonRejection) -> Self {
        tracing::warn!(error = %rejection.body_text(), "rejected request body");
        Self::new(StatusCode::BAD_REQUEST, rejection.body_text())
    }

    fn from_path_rejection(rejection: PathRejection) -> Self {
        tracing::warn!(error = %rejection.body_text(), "rejected task id");
        Self::new(StatusCode::BAD_REQUEST, rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorResponse {
                error: self.message,
            }),
        )
            .into_response()
    }
}

fn task_id(path: Result<Path<String>, PathRejection>) -> Result<String, ApiError> {
    path.map(|Path(id)| id).map_err(ApiError::from_path_rejection)
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /api/tasks?filter=all|active|completed
pub async fn list_tasks(
    State(state): State<AppState>,
    query: Result<Query<TaskListQuery>, QueryRejection>,
) -> Result<Json<Vec<Task>>, ApiError> {
    // an unparseable query string selects everything
    let filter = match query {
        Ok(Query(q)) => q.filter.as_deref().map(TaskFilter::parse).unwrap_or_default(),
        Err(rejection) => {
            tracing::warn!(error = %rejection.body_text(), "ignoring task list query");
            TaskFilter::All
        }
    };

    state
        .tasks
        .list(filter)
        .map(Json)
        .map_err(|e| ApiError::from_task(e, "Failed to read tasks"))
}

/// GET /api/tasks/{id}
pub async fn get_task(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<Task>, ApiError> {
    let id = task_id(path)?;
    state
        .tasks
        .get(&id)
        .map(Json)
        .map_err(|e| ApiError::from_task(e, "Failed to read tasks"))
}

/// POST /api/tasks
pub async fn create_task(
    State(state): State<AppState>,
    body: Result<Json<CreateTaskRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Task>), ApiError> {
    let Json(req) = body.map_err(ApiError::from_rejection)?;

    let task = state
        .tasks
        .create(NewTask {
            title: req.title,
            description: req.description,
            due_date: req.due_date,
        })
        .map_err(|e| ApiError::from_task(e, "Failed to create task"))?;

    Ok((StatusCode::CREATED, Json(task)))
}

/// PUT /api/tasks/{id}
/// Full update
///
/// An unknown id answers 404 even when the body is also unusable.
pub async fn update_task(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    body: Result<Json<UpdateTaskRequest>, JsonRejection>,
) -> Result<Json<Task>, ApiError> {
    let id = task_id(path)?;
    let req = match body {
        Ok(Json(req)) => req,
        Err(rejection) => {
            state
                .tasks
                .get(&id)
                .map_err(|e| ApiError::from_task(e, "Failed to update task"))?;
            return Err(ApiError::from_rejection(rejection));
        }
    };

    state
        .tasks
        .update(
            &id,
            TaskUpdate {
                title: req.title,
                description: req.description,
                due_date: req.due_date,
                completed: req.completed,
            },
        )
        .map(Json)
        .map_err(|e| ApiError::from_task(e, "Failed to update task"))
}

/// PATCH /api/tasks/{id}/complete
///
/// A body that does not carry a boolean `completed` is not rejected up
/// front: an unknown id still answers 404 before the 400.
pub async fn set_completion(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    body: Result<Json<CompletionRequest>, JsonRejection>,
) -> Result<Json<Task>, ApiError> {
    let id = task_id(path)?;
    let completed = body.ok().and_then(|Json(req)| req.completed);

    state
        .tasks
        .set_completion(&id, completed)
        .map(Json)
        .map_err(|e| ApiError::from_task(e, "Failed to set completion"))
}

/// DELETE /api/tasks/{id}
pub async fn delete_task(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<Task>, ApiError> {
    let id = task_id(path)?;
    state
        .tasks
        .remove(&id)
        .map(Json)
        .map_err(|e| ApiError::from_task(e, "Failed to delete task"))
}

/// Fallback for unmatched paths under /api/tasks
pub async fn not_found() -> ApiError {
    ApiError::new(StatusCode::NOT_FOUND, "Not found")
}
