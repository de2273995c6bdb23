//! # Duke
//!
//! A small terminal task assistant. Duke keeps an ordered list of todos,
//! deadlines and events, understands dates like `2024-03-05` or
//! `2024-03-05 18:00`, and remembers the list between sessions.
//!
//! ## Usage
//!
//! Run without arguments for an interactive session:
//!
//! ```text
//! $ duke
//! todo read book
//! deadline return book /by 2024-03-05
//! event camp /from 2024-03-01 /to 2024-03-05 18:00
//! list
//! mark 1
//! on 2024-03-05
//! bye
//! ```
//!
//! Or run a single command:
//!
//! ```bash
//! duke deadline "return book" --by 2024-03-05
//! duke list --table
//! duke delete 2
//! ```
//!
//! ## Data Storage
//!
//! Tasks are saved as JSON in your local data directory:
//! *   Linux: `~/.local/share/duke/tasks.json`
//! *   macOS: `~/Library/Application Support/duke/tasks.json`
//! *   Windows: `%APPDATA%\duke\tasks.json`
//!
//! You can override this with `--db <path>` or the `DUKE_DB` environment
//! variable.

pub mod commands;
pub mod datetime;
pub mod error;
pub mod models;
pub mod parser;
pub mod storage;
pub mod tasklist;
pub mod ui;

pub use error::{DukeError, Result};
