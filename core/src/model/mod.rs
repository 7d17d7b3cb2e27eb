pub mod task;

pub use task::{Category, Priority, Status, Task};
