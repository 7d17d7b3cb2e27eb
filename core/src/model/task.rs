use std::fmt;
use std::str::FromStr;

use chrono::{Local, NaiveDate};

use crate::error::InvalidEnumSelection;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Priority {
    VeryImportant,
    Important,
    NotImportant,
}

impl Priority {
    pub const ALL: [Priority; 3] = [
        Priority::VeryImportant,
        Priority::Important,
        Priority::NotImportant,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Priority::VeryImportant => "Very Important",
            Priority::Important => "Important",
            Priority::NotImportant => "Not Important",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Priority {
    type Err = InvalidEnumSelection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "very important" => Ok(Priority::VeryImportant),
            "important" => Ok(Priority::Important),
            "not important" => Ok(Priority::NotImportant),
            _ => Err(InvalidEnumSelection {
                field: "priority",
                value: s.trim().to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Job,
    Private,
    Hobby,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Job, Category::Private, Category::Hobby];

    pub fn label(&self) -> &'static str {
        match self {
            Category::Job => "Job",
            Category::Private => "Private",
            Category::Hobby => "Hobby",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = InvalidEnumSelection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "job" => Ok(Category::Job),
            "private" => Ok(Category::Private),
            "hobby" => Ok(Category::Hobby),
            _ => Err(InvalidEnumSelection {
                field: "category",
                value: s.trim().to_string(),
            }),
        }
    }
}

/// Completion state. Carrying the completion date inside the `Done` variant
/// makes "a completion date exists iff the task is done" impossible to break.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Open,
    Done { on: NaiveDate },
}

impl Status {
    pub fn is_done(&self) -> bool {
        matches!(self, Status::Done { .. })
    }

    pub fn completed_on(&self) -> Option<NaiveDate> {
        match self {
            Status::Open => None,
            Status::Done { on } => Some(*on),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    pub title: String,
    pub priority: Priority,
    pub deadline: NaiveDate,
    pub category: Category,
    pub description: String,
    pub status: Status,
    /// Stamped at construction, never edited afterwards.
    pub created_on: NaiveDate,
}

impl Task {
    pub fn new(
        title: String,
        priority: Priority,
        deadline: NaiveDate,
        category: Category,
        description: String,
    ) -> Self {
        Self {
            title,
            priority,
            deadline,
            category,
            description,
            status: Status::Open,
            created_on: Local::now().date_naive(),
        }
    }
}
