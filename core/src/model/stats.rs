use crate::model::task::Task;

/// Aggregate counts over one store, partitioned on the completion flag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TaskStats {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
    /// Percentage of completed tasks, 0.0 for an empty store.
    pub completion_rate: f64,
}

impl TaskStats {
    pub fn from_tasks(tasks: &[Task]) -> Self {
        let total = tasks.len();
        let completed = tasks.iter().filter(|t| t.completed).count();
        let completion_rate = if total > 0 {
            completed as f64 / total as f64 * 100.0
        } else {
            0.0
        };

        Self {
            total,
            completed,
            pending: total - completed,
            completion_rate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: &str, completed: bool) -> Task {
        let mut t = Task::new(id.to_string(), "t", "", "2024-01-15").unwrap();
        if completed {
            t.complete();
        }
        t
    }

    #[test]
    fn test_empty_store_is_all_zeroes() {
        let stats = TaskStats::from_tasks(&[]);
        assert_eq!(
            stats,
            TaskStats {
                total: 0,
                completed: 0,
                pending: 0,
                completion_rate: 0.0
            }
        );
    }

    #[test]
    fn test_half_completed() {
        let tasks = vec![task("TASK001", true), task("TASK002", false)];
        let stats = TaskStats::from_tasks(&tasks);
        assert_eq!(stats.total, 2);
        assert_eq!(stats.completed, 1);
        assert_eq!(stats.pending, 1);
        assert_eq!(stats.completion_rate, 50.0);
    }
}
