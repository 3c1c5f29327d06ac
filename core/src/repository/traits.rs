use anyhow::Result;

use crate::model::task::Task;

/// Load/save seam between the store and durable storage. The store is
/// generic over this so tests can swap in an in-memory mock.
pub trait TaskBackend {
    /// A missing backing location is an empty collection, not an error.
    /// A present but unreadable one is an error; the store decides what
    /// to do with it.
    fn load(&self) -> Result<Vec<Task>>;

    /// Replaces the full previous contents with this snapshot.
    fn save(&self, tasks: &[Task]) -> Result<()>;
}
