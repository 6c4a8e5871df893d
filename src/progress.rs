//! Progress engine: the single source of truth for a task's
//! `progress_percentage` and the completion cascade applied to subtasks.
//!
//! Progress and status are independently owned fields: a subtask-driven
//! recompute never touches the parent task's status, so a PENDING task can
//! legitimately sit at progress 100 until its owner completes it.

use crate::store::{Status, SubTask, Task};

/// Compute a task's aggregate progress.
///
/// With zero subtasks this is a binary function of the task's own status:
/// 100 when completed, 0 otherwise. With subtasks it is the arithmetic mean
/// of their progress values, integer division truncating toward zero.
pub fn task_progress(task: &Task, subtasks: &[SubTask]) -> u8 {
    if subtasks.is_empty() {
        return if task.status == Status::Completed { 100 } else { 0 };
    }
    let sum: u32 = subtasks
        .iter()
        .map(|sub| u32::from(sub.progress_percentage))
        .sum();
    (sum / subtasks.len() as u32) as u8
}

/// Force every subtask to the completed state at progress 100,
/// unconditionally overwriting prior state. Idempotent.
pub fn complete_all(subtasks: &mut [SubTask]) {
    for sub in subtasks {
        sub.status = Status::Completed;
        sub.progress_percentage = 100;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn task(status: Status) -> Task {
        Task {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            title: "t".into(),
            description: None,
            due_date: None,
            status,
            progress_percentage: 0,
            priority: 1,
            subtask_ids: Vec::new(),
        }
    }

    fn subtask(parent: &Task, progress: u8) -> SubTask {
        SubTask {
            id: Uuid::new_v4(),
            user_id: parent.user_id,
            task_id: parent.id,
            title: "s".into(),
            description: None,
            due_date: None,
            status: if progress == 100 {
                Status::Completed
            } else {
                Status::Pending
            },
            progress_percentage: progress,
            priority: 1,
        }
    }

    #[test]
    fn no_subtasks_progress_is_binary_on_status() {
        assert_eq!(task_progress(&task(Status::Pending), &[]), 0);
        assert_eq!(task_progress(&task(Status::Incomplete), &[]), 0);
        assert_eq!(task_progress(&task(Status::Completed), &[]), 100);
    }

    #[test]
    fn mean_over_subtasks_truncates() {
        let t = task(Status::Pending);
        let subs = vec![subtask(&t, 100), subtask(&t, 0), subtask(&t, 0)];
        // 100 / 3 = 33, truncated
        assert_eq!(task_progress(&t, &subs), 33);
    }

    #[test]
    fn mean_ignores_the_tasks_own_status_when_subtasks_exist() {
        let t = task(Status::Completed);
        let subs = vec![subtask(&t, 0), subtask(&t, 0)];
        assert_eq!(task_progress(&t, &subs), 0);
    }

    #[test]
    fn complete_all_is_idempotent() {
        let t = task(Status::Pending);
        let mut subs = vec![subtask(&t, 0), subtask(&t, 100)];

        complete_all(&mut subs);
        let first: Vec<_> = subs
            .iter()
            .map(|s| (s.status, s.progress_percentage))
            .collect();
        complete_all(&mut subs);
        let second: Vec<_> = subs
            .iter()
            .map(|s| (s.status, s.progress_percentage))
            .collect();

        assert_eq!(first, second);
        assert!(subs
            .iter()
            .all(|s| s.status == Status::Completed && s.progress_percentage == 100));
    }
}
