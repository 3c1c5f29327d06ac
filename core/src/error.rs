use thiserror::Error;

/// Why a task could not be constructed. Recovered locally by the caller;
/// the store guarantees no mutation happened when one of these comes back.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("title must not be empty")]
    EmptyTitle,
    #[error("due date '{0}' is not a valid YYYY-MM-DD date")]
    InvalidDueDate(String),
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("no task with id '{0}'")]
    NotFound(String),

    /// The in-memory collection was already mutated when the save failed,
    /// so the file on disk may be stale. The caller decides whether to
    /// retry or carry on.
    #[error("failed to persist tasks: {0}")]
    Storage(#[source] anyhow::Error),
}
