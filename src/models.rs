use serde::{Deserialize, Serialize};

use crate::datetime::{self, Temporal};
use crate::error::{DukeError, Result};

/// The three kinds of task the assistant tracks.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TaskKind {
    Todo,
    Deadline { by: Temporal },
    Event { from: Temporal, to: Temporal },
}

/// Represents a single task in the list.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Task {
    /// What needs doing.
    pub description: String,
    /// Whether the task has been completed.
    #[serde(default)]
    pub done: bool,
    #[serde(flatten)]
    pub kind: TaskKind,
}

impl Task {
    pub fn todo(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            done: false,
            kind: TaskKind::Todo,
        }
    }

    pub fn deadline(description: impl Into<String>, by: Temporal) -> Self {
        Self {
            description: description.into(),
            done: false,
            kind: TaskKind::Deadline { by },
        }
    }

    /// Creates an event, rejecting one that ends before it starts.
    pub fn event(description: impl Into<String>, from: Temporal, to: Temporal) -> Result<Self> {
        if !datetime::is_valid_duration(&from, &to) {
            return Err(DukeError::InvalidDuration);
        }
        Ok(Self {
            description: description.into(),
            done: false,
            kind: TaskKind::Event { from, to },
        })
    }

    /// Single-letter tag shown in the first bracket.
    pub fn type_icon(&self) -> char {
        match self.kind {
            TaskKind::Todo => 'T',
            TaskKind::Deadline { .. } => 'D',
            TaskKind::Event { .. } => 'E',
        }
    }

    pub fn status_icon(&self) -> char {
        if self.done { 'X' } else { ' ' }
    }

    pub fn mark_done(&mut self) {
        self.done = true;
    }

    pub fn mark_undone(&mut self) {
        self.done = false;
    }

    /// Human-readable timing, e.g. `by: Mar 05 2024`. Empty for todos.
    pub fn timing(&self) -> String {
        match &self.kind {
            TaskKind::Todo => String::new(),
            TaskKind::Deadline { by } => format!("by: {}", by),
            TaskKind::Event { from, to } => format!("from: {} to: {}", from, to),
        }
    }

    /// True if any date on the task falls on `date`.
    pub fn occurs_on(&self, date: &Temporal) -> bool {
        match &self.kind {
            TaskKind::Todo => false,
            TaskKind::Deadline { by } => datetime::is_equal_date(by, date),
            TaskKind::Event { from, to } => {
                datetime::is_equal_date(from, date) || datetime::is_equal_date(to, date)
            }
        }
    }

    /// `[D][X] return book (by: Mar 05 2024)`
    pub fn status_string(&self) -> String {
        let head = format!("[{}][{}] {}", self.type_icon(), self.status_icon(), self.description);
        match self.kind {
            TaskKind::Todo => head,
            _ => format!("{} ({})", head, self.timing()),
        }
    }
}
