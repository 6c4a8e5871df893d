//! API request and response types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::store::{Status, SubTask, Task};

/// Request to register a new user.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub name: String,
    pub email: String,
}

/// Response after registering a user.
///
/// The session token is returned exactly once, here; the caller presents it
/// in the `X-Session-Token` header on every subsequent request.
#[derive(Debug, Clone, Serialize)]
pub struct CreateUserResponse {
    pub user_id: Uuid,
    pub session_token: String,
    pub username: String,
    pub name: String,
    pub email: String,
}

/// Request to create a new task.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTaskRequest {
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    /// Defaults to 1 when omitted.
    pub priority: Option<i32>,
}

/// Request to create a subtask under the task named in the path.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSubTaskRequest {
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub priority: Option<i32>,
}

/// Request to update a task's or subtask's status.
#[derive(Debug, Clone, Deserialize)]
pub struct StatusUpdateRequest {
    pub status: Status,
}

/// A task together with its subtasks (detail view).
#[derive(Debug, Clone, Serialize)]
pub struct TaskDetailResponse {
    #[serde(flatten)]
    pub task: Task,
    pub subtasks: Vec<SubTask>,
}

/// Confirmation message for status updates and deletes.
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Health check response.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Service version
    pub version: String,
}
