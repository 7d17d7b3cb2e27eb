use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use log::debug;

use crate::error::{CodecError, RecordError};
use crate::model::task::{Status, Task};
use crate::repository::traits::{LoadOutcome, SkippedLine, TaskRepository};
use crate::time::{format_date, parse_stored_date};

const DEFAULT_FILE_NAME: &str = "tasks.txt";
const FIELD_COUNT: usize = 8;
const NO_DATE: &str = "None";

/// Line-oriented flat-file storage, one task per line with comma-joined
/// fields:
///
/// ```text
/// title,priority,deadline,category,description,is_done,created_date,end_date
/// ```
///
/// Free text is written as-is, so a comma inside title or description corrupts
/// that row on the next load. The row is then skipped and reported, but its
/// data is gone; keep commas out of free text until the format grows quoting.
pub struct FlatFileRepository {
    file_path: PathBuf,
}

impl FlatFileRepository {
    /// With no explicit path the file lives at `~/.taskdeck/tasks.txt` and the
    /// directory is created on demand. The file itself is not created: a
    /// missing file is simply an empty store.
    pub fn new(path: Option<PathBuf>) -> Result<Self, CodecError> {
        let file_path = match path {
            Some(p) => p,
            None => {
                let home_dir = dirs::home_dir().ok_or(CodecError::NoHomeDir)?;
                let data_dir = home_dir.join(".taskdeck");
                fs::create_dir_all(&data_dir)?;
                data_dir.join(DEFAULT_FILE_NAME)
            }
        };
        Ok(FlatFileRepository { file_path })
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }
}

impl TaskRepository for FlatFileRepository {
    fn load(&self) -> Result<LoadOutcome, CodecError> {
        let file = match File::open(&self.file_path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(
                    "no storage file at {}, starting empty",
                    self.file_path.display()
                );
                return Ok(LoadOutcome::default());
            }
            Err(e) => return Err(e.into()),
        };

        let reader = BufReader::new(file);
        let mut outcome = LoadOutcome::default();
        for (number, line) in reader.lines().enumerate() {
            let line = line?;
            match decode_record(&line) {
                Ok(task) => outcome.tasks.push(task),
                Err(reason) => outcome.skipped.push(SkippedLine {
                    line: number + 1,
                    reason,
                }),
            }
        }
        debug!(
            "loaded {} tasks from {} ({} malformed lines skipped)",
            outcome.tasks.len(),
            self.file_path.display(),
            outcome.skipped.len()
        );
        Ok(outcome)
    }

    /// Rewrites the destination in full; never appends or merges.
    fn save(&self, tasks: &[Task]) -> Result<(), CodecError> {
        let file = File::create(&self.file_path)?;
        let mut writer = BufWriter::new(file);
        for task in tasks {
            writeln!(writer, "{}", encode_record(task))?;
        }
        writer.flush()?;
        debug!("saved {} tasks to {}", tasks.len(), self.file_path.display());
        Ok(())
    }
}

fn encode_record(task: &Task) -> String {
    let (is_done, end_date) = match task.status {
        Status::Done { on } => ("True", format_date(on)),
        Status::Open => ("False", NO_DATE.to_string()),
    };
    format!(
        "{},{},{},{},{},{},{},{}",
        task.title,
        task.priority,
        format_date(task.deadline),
        task.category,
        task.description,
        is_done,
        format_date(task.created_on),
        end_date,
    )
}

fn decode_record(line: &str) -> Result<Task, RecordError> {
    let fields: Vec<&str> = line.split(',').collect();
    if fields.len() != FIELD_COUNT {
        return Err(RecordError::FieldCount {
            found: fields.len(),
        });
    }

    let priority = fields[1].parse()?;
    let deadline = parse_stored_date(fields[2]).ok_or_else(|| RecordError::BadDate {
        field: "deadline",
        value: fields[2].to_string(),
    })?;
    let category = fields[3].parse()?;
    let created_on = parse_stored_date(fields[6]).ok_or_else(|| RecordError::BadDate {
        field: "created",
        value: fields[6].to_string(),
    })?;
    // The flag is the literal "True"; anything else means open, in which case
    // the end_date field is not interpreted at all.
    let status = if fields[5] == "True" {
        let on = parse_stored_date(fields[7]).ok_or_else(|| RecordError::BadDate {
            field: "completion",
            value: fields[7].to_string(),
        })?;
        Status::Done { on }
    } else {
        Status::Open
    };

    Ok(Task {
        title: fields[0].to_string(),
        priority,
        deadline,
        category,
        description: fields[4].to_string(),
        status,
        created_on,
    })
}
