//! HTTP API for the task tracker.
//!
//! ## Endpoints
//!
//! - `POST /api/users` - Register a user, returns a session token
//! - `GET /api/health` - Health check
//! - `POST /api/tasks` - Create a task
//! - `GET /api/tasks` - List the caller's tasks
//! - `GET /api/tasks/{id}` - Get a task with its subtasks
//! - `DELETE /api/tasks/{id}` - Delete a task and its subtasks
//! - `PATCH /api/tasks/{id}/status` - Update a task's status
//! - `POST /api/tasks/{id}/subtasks` - Create a subtask
//! - `PATCH /api/tasks/{id}/subtasks/{subtask_id}/status` - Update a subtask's status
//!
//! All task endpoints require the `X-Session-Token` header.

mod auth;
mod routes;
pub mod types;

pub use routes::serve;
pub use types::*;
