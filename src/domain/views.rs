use super::enums::{Priority, Status};
use super::task::Task;

/// A flattened row for rendering the task list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatRow {
    /// Depth in the tree (0 = task, 1 = subtask)
    pub depth: usize,
    /// Whether this is the last subtask of its parent
    pub is_last: bool,
    pub task_index: usize,
    /// Subtask index (None for tasks)
    pub subtask_index: Option<usize>,
}

/// Flatten tasks and their linked subtasks into a linear list for rendering
pub fn flatten_tasks(tasks: &[Task]) -> Vec<FlatRow> {
    let mut rows = Vec::new();

    for (task_idx, task) in tasks.iter().enumerate() {
        rows.push(FlatRow {
            depth: 0,
            is_last: false,
            task_index: task_idx,
            subtask_index: None,
        });

        let subtask_count = task.subtasks.len();
        for st_idx in 0..subtask_count {
            rows.push(FlatRow {
                depth: 1,
                is_last: st_idx == subtask_count - 1,
                task_index: task_idx,
                subtask_index: Some(st_idx),
            });
        }
    }

    rows
}

/// Get status badge text
pub fn status_badge(status: Status) -> &'static str {
    match status {
        Status::Pending => "○ TODO",
        Status::InProgress => "◐ DOING",
        Status::Completed => "✓ DONE",
    }
}

/// Get priority marker for the list pane
pub fn priority_marker(priority: Priority) -> &'static str {
    match priority {
        Priority::High => "!!!",
        Priority::Medium => "!! ",
        Priority::Low => "!  ",
    }
}

/// Get tree connector for subtasks
pub fn tree_connector(is_last: bool) -> &'static str {
    if is_last {
        "└─"
    } else {
        "├─"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::test_support::{sample_subtask, sample_task};

    #[test]
    fn test_flatten_tasks_simple() {
        let tasks = vec![sample_task("t1", vec![]), sample_task("t2", vec![])];

        let rows = flatten_tasks(&tasks);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].depth, 0);
        assert_eq!(rows[0].task_index, 0);
        assert_eq!(rows[1].depth, 0);
        assert_eq!(rows[1].task_index, 1);
    }

    #[test]
    fn test_flatten_tasks_with_subtasks() {
        let task = sample_task("t1", vec![sample_subtask("s1"), sample_subtask("s2")]);

        let tasks = vec![task];
        let rows = flatten_tasks(&tasks);

        assert_eq!(rows.len(), 3); // 1 parent + 2 subtasks
        assert_eq!(rows[0].depth, 0);
        assert_eq!(rows[1].depth, 1);
        assert_eq!(rows[2].depth, 1);
        assert!(!rows[1].is_last);
        assert!(rows[2].is_last);
        assert_eq!(rows[2].subtask_index, Some(1));
    }

    #[test]
    fn test_tree_connector() {
        assert_eq!(tree_connector(false), "├─");
        assert_eq!(tree_connector(true), "└─");
    }

    #[test]
    fn test_status_badge() {
        assert_eq!(status_badge(Status::Pending), "○ TODO");
        assert_eq!(status_badge(Status::InProgress), "◐ DOING");
        assert_eq!(status_badge(Status::Completed), "✓ DONE");
    }
}
