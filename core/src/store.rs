use log::{debug, warn};

use crate::error::StoreError;
use crate::model::stats::TaskStats;
use crate::model::task::{ListFilter, Task};
use crate::repository::TaskBackend;

pub const ID_PREFIX: &str = "TASK";
const ID_PAD_WIDTH: usize = 3;

/// Result of a `complete` call. Completion is idempotent, so re-completing
/// is still a success; `was_already_completed` lets the caller report the
/// difference.
#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    pub task: Task,
    pub was_already_completed: bool,
}

/// The in-memory task collection plus its persistence backend. Tasks keep
/// insertion order; every mutating operation validates first, mutates the
/// collection, then persists the full snapshot. If the persist step fails
/// the mutation stays in memory and the error tells the caller the on-disk
/// state may be stale.
///
/// Single writer assumed for the lifetime of the store. Nothing locks the
/// backing file, so a second process writing the same file can silently
/// overwrite this one's changes.
pub struct TaskStore<B: TaskBackend> {
    backend: B,
    tasks: Vec<Task>,
    next_seq: u64,
}

impl<B: TaskBackend> TaskStore<B> {
    /// Loads the existing collection from the backend. A backend that
    /// cannot be read (corrupt file, bad records) is logged and treated as
    /// empty rather than refusing to start; keeping the tracker usable
    /// wins over preserving an unreadable file.
    pub fn open(backend: B) -> Self {
        let tasks = match backend.load() {
            Ok(tasks) => tasks,
            Err(err) => {
                warn!("task store unreadable, starting empty: {err:#}");
                Vec::new()
            }
        };
        debug!("opened task store with {} task(s)", tasks.len());
        let next_seq = max_id_suffix(&tasks) + 1;
        Self {
            backend,
            tasks,
            next_seq,
        }
    }

    /// Validates, appends, persists. On a validation error nothing has
    /// been mutated; on a storage error the task is already in memory.
    pub fn add(
        &mut self,
        title: &str,
        description: &str,
        due_date: &str,
    ) -> Result<Task, StoreError> {
        let task = Task::new(self.format_id(self.next_seq), title, description, due_date)?;
        self.next_seq += 1;
        self.tasks.push(task.clone());
        self.persist()?;
        Ok(task)
    }

    /// Tasks in insertion order, narrowed by the completion filter.
    pub fn list(&self, filter: ListFilter) -> Vec<&Task> {
        self.tasks.iter().filter(|t| filter.accepts(t)).collect()
    }

    pub fn find_by_id(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn complete(&mut self, id: &str) -> Result<Completion, StoreError> {
        let task = self
            .tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        let was_already_completed = task.complete();
        let task = task.clone();
        self.persist()?;
        Ok(Completion {
            task,
            was_already_completed,
        })
    }

    /// Removes the matching task, keeping the order of the remainder.
    /// Its id stays retired: the sequence counter never moves backwards.
    pub fn delete(&mut self, id: &str) -> Result<Task, StoreError> {
        let pos = self
            .tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        let removed = self.tasks.remove(pos);
        self.persist()?;
        Ok(removed)
    }

    /// Optional keyword and due-date filters, AND-combined; both absent
    /// returns the whole collection. Results keep insertion order.
    pub fn search(&self, keyword: Option<&str>, due_date: Option<&str>) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|t| t.matches(keyword, due_date))
            .collect()
    }

    pub fn statistics(&self) -> TaskStats {
        TaskStats::from_tasks(&self.tasks)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    fn format_id(&self, seq: u64) -> String {
        // Falls back to the natural width once the sequence outgrows the
        // zero padding (TASK999 is followed by TASK1000).
        format!("{ID_PREFIX}{seq:0ID_PAD_WIDTH$}")
    }

    fn persist(&self) -> Result<(), StoreError> {
        self.backend.save(&self.tasks).map_err(StoreError::Storage)
    }
}

/// Highest numeric suffix over ids shaped `TASK<digits>`; malformed ids
/// are skipped so one odd record cannot stall id assignment.
fn max_id_suffix(tasks: &[Task]) -> u64 {
    tasks
        .iter()
        .filter_map(|t| t.id.strip_prefix(ID_PREFIX))
        .filter(|suffix| !suffix.is_empty() && suffix.bytes().all(|b| b.is_ascii_digit()))
        .filter_map(|suffix| suffix.parse::<u64>().ok())
        .max()
        .unwrap_or(0)
}
