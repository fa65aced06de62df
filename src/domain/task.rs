use super::enums::Category;
use super::errors::{IndexError, ValidationError};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// A daily task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Task name (trimmed, never empty when created through the store)
    pub name: String,
    /// Category
    pub tag: Category,
    /// Whether the task is done
    #[serde(default)]
    pub completed: bool,
    /// Calendar day on which the task was last marked done.
    /// Cleared again when the task is un-completed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completion_date: Option<NaiveDate>,
}

impl Task {
    pub fn new(name: String, tag: Category) -> Self {
        Self {
            name,
            tag,
            completed: false,
            completion_date: None,
        }
    }

    /// Mark done on the given day
    pub fn complete(&mut self, date: NaiveDate) {
        self.completed = true;
        self.completion_date = Some(date);
    }

    /// Undo completion. The completion date goes away with it so a task is
    /// never both incomplete and dated.
    pub fn uncomplete(&mut self) {
        self.completed = false;
        self.completion_date = None;
    }

    /// Checkbox glyph for list rendering
    pub fn checkbox(&self) -> &'static str {
        if self.completed {
            "[x]"
        } else {
            "[ ]"
        }
    }
}

/// Ordered collection of today's tasks. Insertion order is display order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskStore {
    tasks: Vec<Task>,
}

impl TaskStore {
    /// Build a store from previously persisted tasks
    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    /// Append a new, not yet completed task
    pub fn add(&mut self, name: &str, tag: Category) -> Result<Task, ValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }

        let task = Task::new(name.to_string(), tag);
        self.tasks.push(task.clone());
        Ok(task)
    }

    /// Flip completion of the task at `index`, stamping today's date when it
    /// becomes completed
    pub fn toggle_completion(&mut self, index: usize) -> Result<Task, IndexError> {
        self.toggle_completion_on(index, Local::now().date_naive())
    }

    /// Same as [`toggle_completion`](Self::toggle_completion) with an explicit "today"
    pub fn toggle_completion_on(&mut self, index: usize, today: NaiveDate) -> Result<Task, IndexError> {
        let len = self.tasks.len();
        let task = self
            .tasks
            .get_mut(index)
            .ok_or(IndexError { index, len })?;

        if task.completed {
            task.uncomplete();
        } else {
            task.complete(today);
        }

        Ok(task.clone())
    }

    /// Read-only view in insertion order
    pub fn all(&self) -> &[Task] {
        &self.tasks
    }

    /// Drop every task (end of day)
    pub fn clear(&mut self) {
        self.tasks.clear();
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.completed).count()
    }
}
