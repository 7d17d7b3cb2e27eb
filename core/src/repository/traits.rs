use crate::error::{CodecError, RecordError};
use crate::model::task::Task;

/// What a load pass produced: the tasks that decoded cleanly, plus a report
/// for every stored line that did not. A bad line never aborts the load.
#[derive(Debug, Default)]
pub struct LoadOutcome {
    pub tasks: Vec<Task>,
    pub skipped: Vec<SkippedLine>,
}

#[derive(Debug)]
pub struct SkippedLine {
    /// 1-based line number in the storage file.
    pub line: usize,
    pub reason: RecordError,
}

pub trait TaskRepository {
    fn load(&self) -> Result<LoadOutcome, CodecError>;
    fn save(&self, tasks: &[Task]) -> Result<(), CodecError>;
}
