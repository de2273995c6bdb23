use thiserror::Error;

use crate::datetime::TemporalParseError;

#[derive(Debug, Error)]
pub enum DukeError {
    #[error("Invalid date: {0}. Please use yyyy-MM-dd or yyyy-MM-dd HH:mm.")]
    TemporalParse(#[from] TemporalParseError),

    #[error("Task number {} is out of range (you have {size} task(s)).", .index + 1)]
    IndexOutOfRange { index: usize, size: usize },

    #[error("The end of an event cannot be before its start.")]
    InvalidDuration,

    #[error("{0}")]
    MissingArgument(String),

    #[error("'{0}' is not a valid task number. Task numbers start at 1.")]
    InvalidTaskNumber(String),

    #[error("I'm sorry, but I don't know what '{0}' means. Type 'help' to see what I can do.")]
    UnknownCommand(String),

    #[error("Could not access the task file: {0}")]
    Io(#[from] std::io::Error),

    #[error("The task file is corrupted: {0}")]
    Corrupt(#[from] serde_json::Error),
}

impl DukeError {
    /// User errors exit with code 1, everything else with 2.
    pub fn is_user_error(&self) -> bool {
        !matches!(self, DukeError::Io(_) | DukeError::Corrupt(_))
    }
}

pub type Result<T> = std::result::Result<T, DukeError>;
