//! Typed error enums for the core crate.
//!
//! Core returns named, matchable error kinds (rather than `anyhow`) so the CLI
//! menu boundary can branch on individual variants; `anyhow` stays at the CLI
//! layer only.

use thiserror::Error;

/// A free-text value did not name one of a closed enum's canonical options.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{value}' is not a valid {field}")]
pub struct InvalidEnumSelection {
    /// Which field was being parsed (e.g. "priority", "category").
    pub field: &'static str,
    /// The rejected input, trimmed.
    pub value: String,
}

/// Why a deadline string was rejected at the parse boundary. Each variant is a
/// distinct user-facing re-prompt condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DeadlineError {
    #[error("dates look like DD-MM-YYYY")]
    Format,
    #[error("the day must be between 1 and 31")]
    DayRange,
    #[error("the month must be between 1 and 12")]
    MonthRange,
    #[error("the year is in the past")]
    PastYear,
    #[error("that is not a real calendar date")]
    NotACalendarDate,
}

/// Failures operating on the in-memory store by position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("index {index} is out of range (store holds {len} tasks)")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("task {index} is already completed")]
    AlreadyCompleted { index: usize },
}

/// The guarded-aggregate empty conditions. The two empty cases are independent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StatsError {
    #[error("no tasks to compute statistics over")]
    EmptyStore,
    #[error("no task has been completed yet")]
    NoCompletedTasks,
}

/// Why a single stored line could not be decoded. A bad line is skipped and
/// reported; it never aborts the load.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("expected 8 fields but found {found}")]
    FieldCount { found: usize },
    #[error("the {field} date '{value}' is not a valid date")]
    BadDate {
        field: &'static str,
        value: String,
    },
    #[error(transparent)]
    BadSelection(#[from] InvalidEnumSelection),
}

/// I/O-level failures on the storage file.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("could not determine the home directory")]
    NoHomeDir,
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
