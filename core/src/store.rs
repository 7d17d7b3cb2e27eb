use chrono::{Local, NaiveDate};

use crate::error::{StatsError, StoreError};
use crate::model::task::{Category, Priority, Status, Task};

/// One editable field of a task, carrying its already-validated replacement
/// value. Priority, category and deadline arrive here as typed values, so an
/// invalid selection cannot reach the store at all.
#[derive(Debug, Clone, PartialEq)]
pub enum TaskEdit {
    Title(String),
    Priority(Priority),
    Deadline(NaiveDate),
    Category(Category),
    Description(String),
}

/// A single filter dimension over the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskFilter {
    Priority(Priority),
    DeadlineOn(NaiveDate),
    Done(bool),
}

impl TaskFilter {
    fn matches(&self, task: &Task) -> bool {
        match self {
            TaskFilter::Priority(priority) => task.priority == *priority,
            TaskFilter::DeadlineOn(date) => task.deadline == *date,
            TaskFilter::Done(done) => task.status.is_done() == *done,
        }
    }
}

/// Ordered in-memory task collection. Positions double as the user-facing
/// task numbers: indices stay contiguous and deleting shifts everything after
/// the removed task down by one. Duplicates are allowed.
#[derive(Debug, Default)]
pub struct TaskStore {
    tasks: Vec<Task>,
}

impl TaskStore {
    pub fn new() -> Self {
        Self { tasks: Vec::new() }
    }

    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter()
    }

    pub fn add(&mut self, task: Task) {
        self.tasks.push(task);
    }

    pub fn get(&self, index: usize) -> Result<&Task, StoreError> {
        self.tasks.get(index).ok_or(StoreError::IndexOutOfRange {
            index,
            len: self.tasks.len(),
        })
    }

    /// Removes and returns the task at `index`. The store is untouched when
    /// the index is out of range.
    pub fn delete(&mut self, index: usize) -> Result<Task, StoreError> {
        if index >= self.tasks.len() {
            return Err(StoreError::IndexOutOfRange {
                index,
                len: self.tasks.len(),
            });
        }
        Ok(self.tasks.remove(index))
    }

    pub fn update(&mut self, index: usize, edit: TaskEdit) -> Result<(), StoreError> {
        let len = self.tasks.len();
        let task = self
            .tasks
            .get_mut(index)
            .ok_or(StoreError::IndexOutOfRange { index, len })?;
        match edit {
            TaskEdit::Title(title) => task.title = title,
            TaskEdit::Priority(priority) => task.priority = priority,
            TaskEdit::Deadline(deadline) => task.deadline = deadline,
            TaskEdit::Category(category) => task.category = category,
            TaskEdit::Description(description) => task.description = description,
        }
        Ok(())
    }

    /// The completion transition, stamped with today's date.
    pub fn complete(&mut self, index: usize) -> Result<&Task, StoreError> {
        self.complete_on(index, Local::now().date_naive())
    }

    /// Completing an already-done task is rejected and leaves the original
    /// completion date in place.
    pub fn complete_on(&mut self, index: usize, on: NaiveDate) -> Result<&Task, StoreError> {
        let len = self.tasks.len();
        let task = self
            .tasks
            .get_mut(index)
            .ok_or(StoreError::IndexOutOfRange { index, len })?;
        if task.status.is_done() {
            return Err(StoreError::AlreadyCompleted { index });
        }
        task.status = Status::Done { on };
        Ok(&self.tasks[index])
    }

    /// Lazy pass over the store in original order. Each call starts a fresh
    /// scan; the yielded indices are the user-facing positions.
    pub fn filter<'a>(
        &'a self,
        filter: &'a TaskFilter,
    ) -> impl Iterator<Item = (usize, &'a Task)> + 'a {
        self.tasks
            .iter()
            .enumerate()
            .filter(move |(_, task)| filter.matches(task))
    }

    /// Share of completed tasks, in percent.
    pub fn completion_rate(&self) -> Result<f64, StatsError> {
        if self.tasks.is_empty() {
            return Err(StatsError::EmptyStore);
        }
        let done = self.tasks.iter().filter(|t| t.status.is_done()).count();
        Ok(done as f64 / self.tasks.len() as f64 * 100.0)
    }

    /// Mean of (completion date - creation date) in whole days over the
    /// completed tasks. Independent of `completion_rate`: a non-empty store
    /// with nothing completed still has no average.
    pub fn average_completion_days(&self) -> Result<f64, StatsError> {
        let mut total_days = 0i64;
        let mut completed = 0usize;
        for task in &self.tasks {
            if let Status::Done { on } = task.status {
                total_days += (on - task.created_on).num_days();
                completed += 1;
            }
        }
        if completed == 0 {
            return Err(StatsError::NoCompletedTasks);
        }
        Ok(total_days as f64 / completed as f64)
    }

    /// The priority with the highest occurrence count, together with that
    /// count. Single scan with a running maximum; on a tie the priority that
    /// reached the maximum first wins.
    pub fn most_common_priority(&self) -> Result<(Priority, usize), StatsError> {
        let mut counts = [0usize; 3];
        let mut best: Option<(Priority, usize)> = None;
        for task in &self.tasks {
            let slot = match task.priority {
                Priority::VeryImportant => 0,
                Priority::Important => 1,
                Priority::NotImportant => 2,
            };
            counts[slot] += 1;
            let count = counts[slot];
            match best {
                Some((_, best_count)) if count <= best_count => {}
                _ => best = Some((task.priority, count)),
            }
        }
        best.ok_or(StatsError::EmptyStore)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(day: u32, month: u32, year: i32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn task(title: &str, priority: Priority) -> Task {
        Task {
            title: title.to_string(),
            priority,
            deadline: date(31, 12, 2026),
            category: Category::Job,
            description: String::new(),
            status: Status::Open,
            created_on: date(1, 1, 2024),
        }
    }

    fn sample_store() -> TaskStore {
        let mut store = TaskStore::new();
        store.add(task("write report", Priority::Important));
        store.add(task("water plants", Priority::NotImportant));
        store.add(task("file taxes", Priority::VeryImportant));
        store
    }

    #[test]
    fn test_delete_shifts_following_tasks_down() {
        let mut store = sample_store();
        let removed = store.delete(1).unwrap();
        assert_eq!(removed.title, "water plants");
        assert_eq!(store.len(), 2);
        assert_eq!(store.get(0).unwrap().title, "write report");
        assert_eq!(store.get(1).unwrap().title, "file taxes");
    }

    #[test]
    fn test_out_of_range_operations_leave_store_unchanged() {
        let mut store = sample_store();
        let oor = StoreError::IndexOutOfRange { index: 3, len: 3 };

        assert_eq!(store.get(3).unwrap_err(), oor);
        assert_eq!(store.delete(3).unwrap_err(), oor);
        assert_eq!(
            store
                .update(3, TaskEdit::Title("renamed".to_string()))
                .unwrap_err(),
            oor
        );
        assert_eq!(store.complete_on(3, date(2, 1, 2024)).unwrap_err(), oor);

        assert_eq!(store.len(), 3);
        assert_eq!(store.get(0).unwrap().title, "write report");
        assert!(store.iter().all(|t| !t.status.is_done()));
    }

    #[test]
    fn test_update_replaces_exactly_one_field() {
        let mut store = sample_store();
        store.update(0, TaskEdit::Priority(Priority::NotImportant)).unwrap();
        store
            .update(0, TaskEdit::Deadline(date(15, 6, 2027)))
            .unwrap();
        let updated = store.get(0).unwrap();
        assert_eq!(updated.priority, Priority::NotImportant);
        assert_eq!(updated.deadline, date(15, 6, 2027));
        assert_eq!(updated.title, "write report");
        assert_eq!(updated.created_on, date(1, 1, 2024));
    }

    #[test]
    fn test_complete_stamps_date_once() {
        let mut store = sample_store();
        let first = date(5, 1, 2024);
        store.complete_on(0, first).unwrap();
        assert_eq!(store.get(0).unwrap().status, Status::Done { on: first });

        let err = store.complete_on(0, date(9, 1, 2024)).unwrap_err();
        assert_eq!(err, StoreError::AlreadyCompleted { index: 0 });
        // The original completion date survives the rejected second attempt.
        assert_eq!(store.get(0).unwrap().status, Status::Done { on: first });
    }

    #[test]
    fn test_filter_by_priority_preserves_order_and_indices() {
        let mut store = TaskStore::new();
        store.add(task("a", "important".parse().unwrap()));
        store.add(task("b", "Important".parse().unwrap()));
        store.add(task("c", "Not Important".parse().unwrap()));

        let filter = TaskFilter::Priority(Priority::Important);
        let hits: Vec<(usize, &str)> = store
            .filter(&filter)
            .map(|(i, t)| (i, t.title.as_str()))
            .collect();
        assert_eq!(hits, vec![(0, "a"), (1, "b")]);

        // Restartable: a second pass yields the same result.
        assert_eq!(store.filter(&filter).count(), 2);
    }

    #[test]
    fn test_filter_by_status_and_deadline() {
        let mut store = sample_store();
        store.complete_on(2, date(3, 1, 2024)).unwrap();

        let done: Vec<usize> = store.filter(&TaskFilter::Done(true)).map(|(i, _)| i).collect();
        assert_eq!(done, vec![2]);
        let open: Vec<usize> = store.filter(&TaskFilter::Done(false)).map(|(i, _)| i).collect();
        assert_eq!(open, vec![0, 1]);

        store
            .update(1, TaskEdit::Deadline(date(15, 6, 2027)))
            .unwrap();
        let due: Vec<usize> = store
            .filter(&TaskFilter::DeadlineOn(date(15, 6, 2027)))
            .map(|(i, _)| i)
            .collect();
        assert_eq!(due, vec![1]);
    }

    #[test]
    fn test_completion_rate() {
        let mut store = sample_store();
        store.add(task("one more", Priority::Important));
        store.complete_on(0, date(2, 1, 2024)).unwrap();
        assert_eq!(store.completion_rate().unwrap(), 25.0);
    }

    #[test]
    fn test_stats_on_empty_store_error_cleanly() {
        let store = TaskStore::new();
        assert_eq!(store.completion_rate().unwrap_err(), StatsError::EmptyStore);
        assert_eq!(
            store.most_common_priority().unwrap_err(),
            StatsError::EmptyStore
        );
        assert_eq!(
            store.average_completion_days().unwrap_err(),
            StatsError::NoCompletedTasks
        );
    }

    #[test]
    fn test_average_needs_a_completed_task_even_when_store_is_not_empty() {
        let store = sample_store();
        assert_eq!(
            store.average_completion_days().unwrap_err(),
            StatsError::NoCompletedTasks
        );
    }

    #[test]
    fn test_average_completion_days_is_the_mean_of_whole_day_deltas() {
        let mut store = sample_store();
        // created 01-01-2024 in the fixture; deltas of 4 and 10 days.
        store.complete_on(0, date(5, 1, 2024)).unwrap();
        store.complete_on(1, date(11, 1, 2024)).unwrap();
        assert_eq!(store.average_completion_days().unwrap(), 7.0);

        // Deltas of 4 and 11 days give a fractional mean.
        let mut store = sample_store();
        store.complete_on(0, date(5, 1, 2024)).unwrap();
        store.complete_on(1, date(12, 1, 2024)).unwrap();
        assert_eq!(store.average_completion_days().unwrap(), 7.5);
    }

    #[test]
    fn test_most_common_priority_counts() {
        let mut store = TaskStore::new();
        store.add(task("a", Priority::NotImportant));
        store.add(task("b", Priority::Important));
        store.add(task("c", Priority::Important));
        assert_eq!(
            store.most_common_priority().unwrap(),
            (Priority::Important, 2)
        );
    }

    #[test]
    fn test_most_common_priority_tie_goes_to_first_encountered_maximum() {
        let mut store = TaskStore::new();
        store.add(task("a", Priority::NotImportant));
        store.add(task("b", Priority::Important));
        assert_eq!(
            store.most_common_priority().unwrap(),
            (Priority::NotImportant, 1)
        );
    }
}
