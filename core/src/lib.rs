pub mod error;
pub mod model;
pub mod repository;
pub mod store;
pub mod time;

pub use error::{
    CodecError, DeadlineError, InvalidEnumSelection, RecordError, StatsError, StoreError,
};
pub use model::task::{Category, Priority, Status, Task};
pub use repository::{FlatFileRepository, LoadOutcome, SkippedLine, TaskRepository};
pub use store::{TaskEdit, TaskFilter, TaskStore};
pub use time::{format_date, parse_deadline, parse_stored_date, DATE_FORMAT};
