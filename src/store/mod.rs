//! In-memory domain stores.
//!
//! Two stores back the service:
//! - [`UserStore`]: registered users and their opaque session tokens
//! - [`TaskBoard`]: tasks plus their attached subtasks
//!
//! Both are non-persistent; everything lives for the lifetime of the process.

mod tasks;
mod users;

pub use tasks::TaskBoard;
pub use users::UserStore;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Errors produced by store operations.
///
/// These are the only two failure kinds the core knows about. "Exists but
/// owned by someone else" is deliberately reported as `NotFound` so that
/// non-owners cannot probe for task ids.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Invalid session token")]
    Unauthorized,

    #[error("{0} not found")]
    NotFound(&'static str),
}

/// Lifecycle status shared by tasks and subtasks.
///
/// Transitions are caller-driven status writes; there is no terminal lock,
/// so a completed entity can be reopened by a later update. The only
/// implicit transition is the forced completion cascade on the task path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    Pending,
    Incomplete,
    Completed,
}

/// A registered user.
///
/// Users are never deleted and their session token never rotates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub name: String,
    pub email: String,
    pub session_token: String,
}

/// A task owned by a single user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub status: Status,
    /// Derived field; always the latest progress-engine computation over
    /// this task's subtasks (or a binary function of status when it has
    /// none). Only the two cascade points write it.
    pub progress_percentage: u8,
    pub priority: i32,
    /// Subtask ids in insertion order.
    pub subtask_ids: Vec<Uuid>,
}

/// A subtask attached to exactly one task.
///
/// Subtasks cannot outlive or be reassigned from their parent; deleting the
/// parent removes them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubTask {
    pub id: Uuid,
    /// The user who created the subtask (the acting user, which is not
    /// necessarily the parent task's owner).
    pub user_id: Uuid,
    pub task_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub status: Status,
    /// Always 0 or 100, driven by status.
    pub progress_percentage: u8,
    pub priority: i32,
}
