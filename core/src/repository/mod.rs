pub mod file;
pub mod traits;

pub use file::JsonFileBackend;
pub use traits::TaskBackend;
