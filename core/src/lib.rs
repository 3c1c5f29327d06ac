pub mod error;
pub mod model;
pub mod repository;
pub mod store;

pub use error::{StoreError, ValidationError};
pub use model::stats::TaskStats;
pub use model::task::{ListFilter, Task, DATE_FORMAT};
pub use repository::{JsonFileBackend, TaskBackend};
pub use store::{Completion, TaskStore};
