//! Task board: tasks, their subtasks, and the cascade points.
//!
//! Tasks and subtasks live in one locked structure so that every
//! read-modify-write (a status change plus the progress recompute it
//! triggers, or a delete spanning both maps) is a single critical section.
//! Failed operations return before any mutation.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{Status, StoreError, SubTask, Task};
use crate::progress;

#[derive(Default)]
struct BoardInner {
    tasks: HashMap<Uuid, Task>,
    /// Subtasks keyed by their parent task id, in insertion order.
    subtasks: HashMap<Uuid, Vec<SubTask>>,
}

/// In-memory store for tasks and subtasks.
pub struct TaskBoard {
    inner: RwLock<BoardInner>,
}

impl TaskBoard {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(BoardInner::default()),
        }
    }

    /// Create a new task owned by `owner`: PENDING, progress 0, no subtasks.
    pub async fn create_task(
        &self,
        owner: Uuid,
        title: String,
        description: Option<String>,
        due_date: Option<DateTime<Utc>>,
        priority: i32,
    ) -> Task {
        let task = Task {
            id: Uuid::new_v4(),
            user_id: owner,
            title,
            description,
            due_date,
            status: Status::Pending,
            progress_percentage: 0,
            priority,
            subtask_ids: Vec::new(),
        };
        tracing::debug!(task_id = %task.id, user_id = %owner, "Created task");
        self.inner.write().await.tasks.insert(task.id, task.clone());
        task
    }

    /// Get a task and its subtasks.
    ///
    /// A task that exists but belongs to another user is reported exactly
    /// like a missing one.
    pub async fn get_task(
        &self,
        task_id: Uuid,
        owner: Uuid,
    ) -> Result<(Task, Vec<SubTask>), StoreError> {
        let inner = self.inner.read().await;
        let task = inner
            .tasks
            .get(&task_id)
            .filter(|task| task.user_id == owner)
            .ok_or(StoreError::NotFound("Task"))?;
        let subtasks = inner.subtasks.get(&task_id).cloned().unwrap_or_default();
        Ok((task.clone(), subtasks))
    }

    /// List the caller's tasks, keyed by task id.
    pub async fn list_tasks(&self, owner: Uuid) -> HashMap<Uuid, Task> {
        self.inner
            .read()
            .await
            .tasks
            .values()
            .filter(|task| task.user_id == owner)
            .map(|task| (task.id, task.clone()))
            .collect()
    }

    /// Delete a task and all of its subtasks as one unit.
    pub async fn delete_task(&self, task_id: Uuid, owner: Uuid) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        if !inner
            .tasks
            .get(&task_id)
            .is_some_and(|task| task.user_id == owner)
        {
            return Err(StoreError::NotFound("Task"));
        }
        inner.tasks.remove(&task_id);
        inner.subtasks.remove(&task_id);
        tracing::debug!(task_id = %task_id, "Deleted task and its subtasks");
        Ok(())
    }

    /// Set a task's status.
    ///
    /// Completing a task forces its progress to 100 and cascades completion
    /// to every subtask. Other statuses do not recompute progress, so status
    /// and progress may diverge until a subtask write triggers a recompute.
    pub async fn set_task_status(
        &self,
        task_id: Uuid,
        owner: Uuid,
        status: Status,
    ) -> Result<(), StoreError> {
        let mut guard = self.inner.write().await;
        let inner = &mut *guard;
        let task = inner
            .tasks
            .get_mut(&task_id)
            .filter(|task| task.user_id == owner)
            .ok_or(StoreError::NotFound("Task"))?;
        task.status = status;
        if status == Status::Completed {
            task.progress_percentage = 100;
            if let Some(subtasks) = inner.subtasks.get_mut(&task_id) {
                progress::complete_all(subtasks);
            }
        }
        tracing::debug!(task_id = %task_id, ?status, "Updated task status");
        Ok(())
    }

    /// Create a subtask under an existing task.
    ///
    /// The parent must exist, but its ownership is not checked; the acting
    /// user is recorded as the subtask's owner even when that differs from
    /// the parent's owner. After insertion the parent's progress is
    /// recomputed and its status reset to PENDING unconditionally.
    pub async fn create_subtask(
        &self,
        task_id: Uuid,
        acting_user: Uuid,
        title: String,
        description: Option<String>,
        due_date: Option<DateTime<Utc>>,
        priority: i32,
    ) -> Result<SubTask, StoreError> {
        let mut guard = self.inner.write().await;
        let inner = &mut *guard;
        let task = inner
            .tasks
            .get_mut(&task_id)
            .ok_or(StoreError::NotFound("Task"))?;
        let subtask = SubTask {
            id: Uuid::new_v4(),
            user_id: acting_user,
            task_id,
            title,
            description,
            due_date,
            status: Status::Pending,
            progress_percentage: 0,
            priority,
        };
        let subtasks = inner.subtasks.entry(task_id).or_default();
        subtasks.push(subtask.clone());
        task.subtask_ids.push(subtask.id);
        let pct = progress::task_progress(task, subtasks);
        task.progress_percentage = pct;
        task.status = Status::Pending;
        tracing::debug!(task_id = %task_id, subtask_id = %subtask.id, "Created subtask");
        Ok(subtask)
    }

    /// Set a subtask's status and recompute the parent's progress.
    ///
    /// Completion forces the subtask's progress to 100. The parent's status
    /// field is left untouched even when the recomputed progress reaches
    /// 100; only its owner completes a task.
    pub async fn set_subtask_status(
        &self,
        task_id: Uuid,
        subtask_id: Uuid,
        _acting_user: Uuid,
        status: Status,
    ) -> Result<(), StoreError> {
        let mut guard = self.inner.write().await;
        let inner = &mut *guard;
        let task = inner
            .tasks
            .get_mut(&task_id)
            .ok_or(StoreError::NotFound("Task or Subtask"))?;
        let subtasks = inner
            .subtasks
            .get_mut(&task_id)
            .ok_or(StoreError::NotFound("Task or Subtask"))?;
        let subtask = subtasks
            .iter_mut()
            .find(|sub| sub.id == subtask_id)
            .ok_or(StoreError::NotFound("Task or Subtask"))?;
        subtask.status = status;
        if status == Status::Completed {
            subtask.progress_percentage = 100;
        }
        let pct = progress::task_progress(task, subtasks);
        task.progress_percentage = pct;
        tracing::debug!(task_id = %task_id, subtask_id = %subtask_id, ?status, "Updated subtask status");
        Ok(())
    }
}

impl Default for TaskBoard {
    fn default() -> Self {
        Self::new()
    }
}
