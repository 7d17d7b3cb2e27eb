use tabled::settings::Style;
use tabled::{Table, Tabled};
use taskdeck_core::{format_date, Task, TaskStore};

#[derive(Tabled)]
struct TaskRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Priority")]
    priority: String,
    #[tabled(rename = "Deadline")]
    deadline: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Done")]
    done: String,
    #[tabled(rename = "Created")]
    created: String,
    #[tabled(rename = "Completed")]
    completed: String,
}

impl TaskRow {
    fn new(index: usize, task: &Task) -> Self {
        Self {
            index,
            title: task.title.clone(),
            priority: task.priority.to_string(),
            deadline: format_date(task.deadline),
            category: task.category.to_string(),
            description: task.description.clone(),
            done: if task.status.is_done() { "yes" } else { "no" }.to_string(),
            created: format_date(task.created_on),
            completed: task
                .status
                .completed_on()
                .map(format_date)
                .unwrap_or_else(|| "-".to_string()),
        }
    }
}

/// Table over (position, task) pairs so filtered views keep the numbers the
/// other menu actions expect. `None` when there is nothing to show.
pub fn render_tasks<'a>(tasks: impl Iterator<Item = (usize, &'a Task)>) -> Option<String> {
    let rows: Vec<TaskRow> = tasks
        .map(|(index, task)| TaskRow::new(index, task))
        .collect();
    if rows.is_empty() {
        return None;
    }
    let mut table = Table::new(rows);
    table.with(Style::modern());
    Some(table.to_string())
}

/// The three aggregates, each reporting its own empty condition instead of
/// taking the whole view down.
pub fn render_stats(store: &TaskStore) -> String {
    let completion = match store.completion_rate() {
        Ok(rate) => format!("Completion rate: {rate:.1}%"),
        Err(e) => format!("Completion rate: {e}"),
    };
    let average = match store.average_completion_days() {
        Ok(days) => format!("Average completion time: {days:.1} days"),
        Err(e) => format!("Average completion time: {e}"),
    };
    let most_common = match store.most_common_priority() {
        Ok((priority, count)) => format!("Most common priority: {priority} ({count} tasks)"),
        Err(e) => format!("Most common priority: {e}"),
    };
    [completion, average, most_common].join("\n")
}
