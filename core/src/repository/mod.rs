pub mod file;
pub mod traits;

pub use file::FlatFileRepository;
pub use traits::{LoadOutcome, SkippedLine, TaskRepository};
