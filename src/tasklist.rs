use serde::{Deserialize, Serialize};

use crate::datetime::Temporal;
use crate::error::{DukeError, Result};
use crate::models::Task;

pub const EMPTY_LISTING: &str = "There are currently no tasks in your list.";

/// The ordered list of every task the user has entered.
///
/// Insertion order is the only ordering. Indices are 0-based; the 1-based
/// numbers users see only appear in the rendered lines.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct TaskList {
    tasks: Vec<Task>,
}

impl TaskList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn size(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, index: usize) -> Result<&Task> {
        let size = self.size();
        self.tasks
            .get(index)
            .ok_or(DukeError::IndexOutOfRange { index, size })
    }

    pub fn get_mut(&mut self, index: usize) -> Result<&mut Task> {
        let size = self.size();
        self.tasks
            .get_mut(index)
            .ok_or(DukeError::IndexOutOfRange { index, size })
    }

    /// Appends to the end of the list.
    pub fn add(&mut self, task: Task) {
        self.tasks.push(task);
    }

    /// Removes and returns the task at `index`; later tasks move up by one.
    pub fn remove(&mut self, index: usize) -> Result<Task> {
        let size = self.size();
        if index >= size {
            return Err(DukeError::IndexOutOfRange { index, size });
        }
        Ok(self.tasks.remove(index))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter()
    }

    /// One numbered line per task, or a single line saying the list is empty.
    pub fn render_listing(&self) -> Vec<String> {
        if self.tasks.is_empty() {
            return vec![EMPTY_LISTING.to_string()];
        }
        self.numbered(|_| true)
    }

    /// Numbered lines for tasks whose description contains `keyword`,
    /// ignoring case. Empty when nothing matches.
    pub fn find(&self, keyword: &str) -> Vec<String> {
        let needle = keyword.to_lowercase();
        self.numbered(|t| t.description.to_lowercase().contains(&needle))
    }

    /// Numbered lines for deadlines and events falling on `date`.
    pub fn on(&self, date: &Temporal) -> Vec<String> {
        self.numbered(|t| t.occurs_on(date))
    }

    // Keeps each task's real position so the numbers can be fed back to
    // mark/delete.
    fn numbered<F>(&self, keep: F) -> Vec<String>
    where
        F: Fn(&Task) -> bool,
    {
        self.tasks
            .iter()
            .enumerate()
            .filter(|(_, t)| keep(t))
            .map(|(i, t)| format!("{}. {}", i + 1, t.status_string()))
            .collect()
    }
}
