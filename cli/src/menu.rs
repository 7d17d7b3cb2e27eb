use std::io::{self, BufRead, Write};

use anyhow::Result;
use log::debug;
use taskdeck_core::{
    Category, Priority, Task, TaskEdit, TaskFilter, TaskRepository, TaskStore,
};

use crate::prompt;
use crate::render;

const MENU: &str = "\
---------------
MENU:
0. Exit
1. Add a new task
2. Delete a task
3. Update a task
4. Mark a task as done
5. Show tasks
6. Show filtered tasks
7. Save tasks to file
8. Show task statistics
---------------";

pub fn run<R: TaskRepository>(store: TaskStore, repo: &R) -> Result<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stdout();
    session(store, repo, &mut input, &mut out)
}

/// The interactive loop. Every error is reported and control returns to the
/// menu; nothing here is fatal except losing the terminal itself.
fn session<R: TaskRepository>(
    mut store: TaskStore,
    repo: &R,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> Result<()> {
    let mut dirty = false;
    loop {
        writeln!(out, "{MENU}")?;
        let Some(answer) = prompt::read_trimmed(input, out, "Enter your choice: ")? else {
            if dirty {
                writeln!(out, "Reached end of input; unsaved changes were not written.")?;
            }
            break;
        };
        let choice: usize = match answer.parse() {
            Ok(n) => n,
            Err(_) => {
                writeln!(out, "Please enter a number between 0 and 8.")?;
                continue;
            }
        };
        match choice {
            0 => {
                if dirty && !confirm_discard(input, out)? {
                    continue;
                }
                break;
            }
            1 => dirty |= add_task(&mut store, input, out)?,
            2 => dirty |= delete_task(&mut store, input, out)?,
            3 => dirty |= update_task(&mut store, input, out)?,
            4 => dirty |= complete_task(&mut store, input, out)?,
            5 => show_tasks(&store, out)?,
            6 => show_filtered(&store, input, out)?,
            7 => match repo.save(store.tasks()) {
                Ok(()) => {
                    dirty = false;
                    debug!("saved {} tasks", store.len());
                    writeln!(out, "Saved {} tasks.", store.len())?;
                }
                Err(e) => writeln!(out, "Saving failed: {e}")?,
            },
            8 => writeln!(out, "{}", render::render_stats(&store))?,
            _ => writeln!(out, "Please enter a number between 0 and 8.")?,
        }
    }
    Ok(())
}

fn confirm_discard(input: &mut impl BufRead, out: &mut impl Write) -> Result<bool> {
    match prompt::read_trimmed(
        input,
        out,
        "You have unsaved changes. Exit without saving? [y/N] ",
    )? {
        Some(answer) => Ok(answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes")),
        None => Ok(true),
    }
}

fn priority_options() -> [(&'static str, Priority); 3] {
    Priority::ALL.map(|p| (p.label(), p))
}

fn category_options() -> [(&'static str, Category); 3] {
    Category::ALL.map(|c| (c.label(), c))
}

/// A one-shot index prompt. A non-numeric answer aborts the action rather
/// than looping; the menu comes right back anyway.
fn read_index(
    input: &mut impl BufRead,
    out: &mut impl Write,
    prompt_text: &str,
) -> Result<Option<usize>> {
    let Some(answer) = prompt::read_trimmed(input, out, prompt_text)? else {
        return Ok(None);
    };
    match answer.parse() {
        Ok(index) => Ok(Some(index)),
        Err(_) => {
            writeln!(out, "Please enter a valid number.")?;
            Ok(None)
        }
    }
}

fn add_task(store: &mut TaskStore, input: &mut impl BufRead, out: &mut impl Write) -> Result<bool> {
    let Some(title) = prompt::read_trimmed(input, out, "Enter a title: ")? else {
        return Ok(false);
    };
    let Some(priority) = prompt::select(input, out, "Pick a priority:", &priority_options())?
    else {
        return Ok(false);
    };
    let Some(deadline) = prompt::read_deadline(input, out)? else {
        return Ok(false);
    };
    let Some(category) = prompt::select(input, out, "Pick a category:", &category_options())?
    else {
        return Ok(false);
    };
    let Some(description) = prompt::read_trimmed(input, out, "Enter a description: ")? else {
        return Ok(false);
    };

    store.add(Task::new(title, priority, deadline, category, description));
    writeln!(out, "Task added as number {}.", store.len() - 1)?;
    Ok(true)
}

fn delete_task(
    store: &mut TaskStore,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> Result<bool> {
    let Some(index) = read_index(input, out, "Enter the number of the task to delete: ")? else {
        return Ok(false);
    };
    match store.delete(index) {
        Ok(task) => {
            writeln!(out, "Deleted '{}'.", task.title)?;
            Ok(true)
        }
        Err(e) => {
            writeln!(out, "{e}")?;
            Ok(false)
        }
    }
}

fn update_task(
    store: &mut TaskStore,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> Result<bool> {
    if store.is_empty() {
        writeln!(out, "There are no tasks to update.")?;
        return Ok(false);
    }
    show_tasks(store, out)?;
    let Some(index) = read_index(input, out, "Enter the number of the task to update: ")? else {
        return Ok(false);
    };
    let task = match store.get(index) {
        Ok(task) => task,
        Err(e) => {
            writeln!(out, "{e}")?;
            return Ok(false);
        }
    };
    if let Some(table) = render::render_tasks(std::iter::once((index, task))) {
        writeln!(out, "{table}")?;
    }

    #[derive(Clone, Copy)]
    enum Field {
        Title,
        Priority,
        Deadline,
        Category,
        Description,
    }
    let Some(field) = prompt::select(
        input,
        out,
        "Which field do you want to change?",
        &[
            ("Title", Field::Title),
            ("Priority", Field::Priority),
            ("Deadline", Field::Deadline),
            ("Category", Field::Category),
            ("Description", Field::Description),
        ],
    )?
    else {
        return Ok(false);
    };

    let edit = match field {
        Field::Title => {
            let Some(title) = prompt::read_trimmed(input, out, "Enter a new title: ")? else {
                return Ok(false);
            };
            TaskEdit::Title(title)
        }
        Field::Priority => {
            let Some(priority) =
                prompt::select(input, out, "Pick a new priority:", &priority_options())?
            else {
                return Ok(false);
            };
            TaskEdit::Priority(priority)
        }
        Field::Deadline => {
            let Some(deadline) = prompt::read_deadline(input, out)? else {
                return Ok(false);
            };
            TaskEdit::Deadline(deadline)
        }
        Field::Category => {
            let Some(category) =
                prompt::select(input, out, "Pick a new category:", &category_options())?
            else {
                return Ok(false);
            };
            TaskEdit::Category(category)
        }
        Field::Description => {
            let Some(description) = prompt::read_trimmed(input, out, "Enter a new description: ")?
            else {
                return Ok(false);
            };
            TaskEdit::Description(description)
        }
    };

    match store.update(index, edit) {
        Ok(()) => {
            writeln!(out, "Task {index} updated.")?;
            Ok(true)
        }
        Err(e) => {
            writeln!(out, "{e}")?;
            Ok(false)
        }
    }
}

fn complete_task(
    store: &mut TaskStore,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> Result<bool> {
    let Some(index) = read_index(input, out, "Enter the number of the task you finished: ")?
    else {
        return Ok(false);
    };
    match store.complete(index) {
        Ok(task) => {
            writeln!(out, "Nice work, '{}' is done.", task.title)?;
            Ok(true)
        }
        Err(e) => {
            writeln!(out, "{e}")?;
            Ok(false)
        }
    }
}

fn show_tasks(store: &TaskStore, out: &mut impl Write) -> Result<()> {
    match render::render_tasks(store.tasks().iter().enumerate()) {
        Some(table) => writeln!(out, "{table}")?,
        None => writeln!(out, "There are no tasks yet.")?,
    }
    Ok(())
}

fn show_filtered(
    store: &TaskStore,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> Result<()> {
    #[derive(Clone, Copy)]
    enum Dimension {
        Priority,
        Deadline,
        Status,
    }
    let Some(dimension) = prompt::select(
        input,
        out,
        "Filter on which field?",
        &[
            ("Priority", Dimension::Priority),
            ("Deadline", Dimension::Deadline),
            ("Status", Dimension::Status),
        ],
    )?
    else {
        return Ok(());
    };

    let filter = match dimension {
        Dimension::Priority => {
            let Some(priority) = prompt::read_parsed(
                input,
                out,
                "Enter a priority (Very Important / Important / Not Important): ",
            )?
            else {
                return Ok(());
            };
            TaskFilter::Priority(priority)
        }
        Dimension::Deadline => {
            let Some(date) = prompt::read_any_date(input, out, "Enter a deadline (DD-MM-YYYY): ")?
            else {
                return Ok(());
            };
            TaskFilter::DeadlineOn(date)
        }
        Dimension::Status => {
            let Some(done) = prompt::read_status(input, out)? else {
                return Ok(());
            };
            TaskFilter::Done(done)
        }
    };

    match render::render_tasks(store.filter(&filter)) {
        Some(table) => writeln!(out, "{table}")?,
        None => writeln!(out, "No tasks match that filter.")?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::io::Cursor;
    use taskdeck_core::{CodecError, LoadOutcome};

    #[derive(Default)]
    struct MemoryRepo {
        saved: RefCell<Vec<Vec<Task>>>,
    }

    impl TaskRepository for MemoryRepo {
        fn load(&self) -> Result<LoadOutcome, CodecError> {
            Ok(LoadOutcome::default())
        }

        fn save(&self, tasks: &[Task]) -> Result<(), CodecError> {
            self.saved.borrow_mut().push(tasks.to_vec());
            Ok(())
        }
    }

    fn run_session(store: TaskStore, script: &str) -> (MemoryRepo, String) {
        let repo = MemoryRepo::default();
        let mut input = Cursor::new(script.as_bytes().to_vec());
        let mut out = Vec::new();
        session(store, &repo, &mut input, &mut out).unwrap();
        let shown = String::from_utf8(out).unwrap();
        (repo, shown)
    }

    #[test]
    fn test_add_then_save_persists_the_new_task() {
        // 1 add: title, priority 2 (Important), deadline, category 2
        // (Private), description; 7 save; 0 exit.
        let script = "1\nbuy milk\n2\n31-12-2099\n2\nsemi-skimmed\n7\n0\n";
        let (repo, shown) = run_session(TaskStore::new(), script);

        let saved = repo.saved.borrow();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].len(), 1);
        assert_eq!(saved[0][0].title, "buy milk");
        assert_eq!(saved[0][0].priority, Priority::Important);
        assert_eq!(saved[0][0].category, Category::Private);
        assert!(shown.contains("Saved 1 tasks."));
    }

    #[test]
    fn test_exit_with_unsaved_changes_asks_first() {
        // Add a task, refuse to discard, save, then exit cleanly.
        let script = "1\nbuy milk\n2\n31-12-2099\n2\n\n0\nn\n7\n0\n";
        let (repo, shown) = run_session(TaskStore::new(), script);

        assert!(shown.contains("unsaved changes"));
        assert_eq!(repo.saved.borrow().len(), 1);
    }

    #[test]
    fn test_exit_can_discard_after_confirmation() {
        let script = "1\nbuy milk\n2\n31-12-2099\n2\n\n0\ny\n";
        let (repo, _) = run_session(TaskStore::new(), script);
        assert!(repo.saved.borrow().is_empty());
    }

    #[test]
    fn test_delete_out_of_range_is_reported_and_harmless() {
        let script = "2\n5\n0\n";
        let (repo, shown) = run_session(TaskStore::new(), script);
        assert!(shown.contains("index 5 is out of range"));
        assert!(repo.saved.borrow().is_empty());
    }

    #[test]
    fn test_bad_menu_choice_returns_to_the_menu() {
        let script = "abc\n9\n0\n";
        let (_, shown) = run_session(TaskStore::new(), script);
        assert_eq!(
            shown.matches("Please enter a number between 0 and 8.").count(),
            2
        );
    }

    #[test]
    fn test_completing_twice_reports_already_completed() {
        let script = "1\nbuy milk\n2\n31-12-2099\n2\n\n4\n0\n4\n0\n0\ny\n";
        let (_, shown) = run_session(TaskStore::new(), script);
        assert!(shown.contains("'buy milk' is done"));
        assert!(shown.contains("task 0 is already completed"));
    }
}
