use std::io::{self, BufRead, Write};

use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};
use log::{debug, info};

use crate::datetime::Temporal;
use crate::error::Result;
use crate::models::{Task, TaskKind};
use crate::storage::Storage;
use crate::tasklist::{TaskList, EMPTY_LISTING};

pub const NO_MATCHES: &str = "No matching tasks found.";

pub const HELP_LINES: &[&str] = &[
    "Here is what I understand:",
    "  list                                   show all tasks",
    "  todo <description>                     add a todo",
    "  deadline <description> /by <date>      add a deadline",
    "  event <description> /from <date> /to <date>",
    "                                         add an event",
    "  mark <n> | unmark <n>                  mark task n as done / not done",
    "  delete <n>                             remove task n",
    "  find <keyword>                         search task descriptions",
    "  on <date>                              deadlines and events on a date",
    "  bye                                    leave",
    "Dates are yyyy-MM-dd or yyyy-MM-dd HH:mm.",
];

/// A single user instruction, ready to run against a [`TaskList`].
///
/// Task indices are 0-based here; the parser converts from what the user typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    Todo { description: String },
    Deadline { description: String, by: Temporal },
    Event { description: String, from: Temporal, to: Temporal },
    Mark(usize),
    Unmark(usize),
    Delete(usize),
    Find(String),
    On(Temporal),
    Help,
    Bye,
    /// Input that could not be understood; running it just reports why.
    Invalid(String),
}

/// What a command produced: lines to show, and what the caller should do next.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Response {
    pub lines: Vec<String>,
    /// The list changed and should be saved.
    pub modified: bool,
    /// The session should end.
    pub exit: bool,
}

impl Response {
    fn show(lines: Vec<String>) -> Self {
        Self { lines, ..Self::default() }
    }

    fn changed(lines: Vec<String>) -> Self {
        Self { lines, modified: true, exit: false }
    }
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::List => "list",
            Command::Todo { .. } => "todo",
            Command::Deadline { .. } => "deadline",
            Command::Event { .. } => "event",
            Command::Mark(_) => "mark",
            Command::Unmark(_) => "unmark",
            Command::Delete(_) => "delete",
            Command::Find(_) => "find",
            Command::On(_) => "on",
            Command::Help => "help",
            Command::Bye => "bye",
            Command::Invalid(_) => "invalid",
        }
    }

    /// Runs the command against `tasks`.
    ///
    /// Errors (bad index, backwards event) leave the list untouched.
    pub fn execute(self, tasks: &mut TaskList) -> Result<Response> {
        debug!("executing '{}'", self.name());
        match self {
            Command::List => {
                let mut lines = Vec::new();
                if !tasks.is_empty() {
                    lines.push("Here are the tasks in your list:".to_string());
                }
                lines.extend(tasks.render_listing());
                Ok(Response::show(lines))
            }
            Command::Todo { description } => Ok(add(tasks, Task::todo(description))),
            Command::Deadline { description, by } => Ok(add(tasks, Task::deadline(description, by))),
            Command::Event { description, from, to } => {
                let task = Task::event(description, from, to)?;
                Ok(add(tasks, task))
            }
            Command::Mark(index) => {
                let task = tasks.get_mut(index)?;
                task.mark_done();
                Ok(Response::changed(vec![
                    "Nice! I've marked this task as done:".to_string(),
                    format!("  {}", task.status_string()),
                ]))
            }
            Command::Unmark(index) => {
                let task = tasks.get_mut(index)?;
                task.mark_undone();
                Ok(Response::changed(vec![
                    "OK, I've marked this task as not done yet:".to_string(),
                    format!("  {}", task.status_string()),
                ]))
            }
            Command::Delete(index) => {
                let task = tasks.remove(index)?;
                Ok(Response::changed(vec![
                    "Noted. I've removed this task:".to_string(),
                    format!("  {}", task.status_string()),
                    count_line(tasks),
                ]))
            }
            Command::Find(keyword) => {
                let found = tasks.find(&keyword);
                if found.is_empty() {
                    return Ok(Response::show(vec![NO_MATCHES.to_string()]));
                }
                let mut lines = vec!["Here are the matching tasks in your list:".to_string()];
                lines.extend(found);
                Ok(Response::show(lines))
            }
            Command::On(date) => {
                let found = tasks.on(&date);
                if found.is_empty() {
                    return Ok(Response::show(vec![format!("No tasks occur on {}.", date)]));
                }
                let mut lines = vec![format!("Here are the tasks on {}:", date)];
                lines.extend(found);
                Ok(Response::show(lines))
            }
            Command::Help => Ok(Response::show(HELP_LINES.iter().map(|l| l.to_string()).collect())),
            Command::Bye => Ok(Response {
                lines: vec!["Bye. Hope to see you again soon!".to_string()],
                modified: false,
                exit: true,
            }),
            Command::Invalid(message) => Ok(Response::show(vec![format!("OOPS!!! {}", message)])),
        }
    }
}

fn add(tasks: &mut TaskList, task: Task) -> Response {
    let line = format!("  {}", task.status_string());
    tasks.add(task);
    Response::changed(vec![
        "Got it. I've added this task:".to_string(),
        line,
        count_line(tasks),
    ])
}

fn count_line(tasks: &TaskList) -> String {
    match tasks.size() {
        1 => "Now you have 1 task in the list.".to_string(),
        n => format!("Now you have {} tasks in the list.", n),
    }
}

/// Loads the list, runs one command, saves if it changed, and prints the
/// response unless `silent`.
pub fn cmd_run(storage: &Storage, command: Command, silent: bool) -> Result<Response> {
    let mut tasks = storage.load()?;
    let response = command.execute(&mut tasks)?;
    if response.modified {
        storage.save(&tasks)?;
    }
    if !silent {
        for line in &response.lines {
            println!("{}", line);
        }
    }
    Ok(response)
}

/// Lists tasks in a formatted table, in list order.
pub fn cmd_list_table(storage: &Storage) -> Result<()> {
    let tasks = storage.load()?;
    if tasks.is_empty() {
        println!("{}", EMPTY_LISTING);
        return Ok(());
    }
    println!("{}", task_table(&tasks));
    Ok(())
}

pub fn task_table(tasks: &TaskList) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("#").add_attribute(Attribute::Bold),
            Cell::new("Type").add_attribute(Attribute::Bold),
            Cell::new("Description").add_attribute(Attribute::Bold),
            Cell::new("When").add_attribute(Attribute::Bold),
            Cell::new("Status").add_attribute(Attribute::Bold),
        ]);

    for (i, t) in tasks.iter().enumerate() {
        let kind = match t.kind {
            TaskKind::Todo => "Todo",
            TaskKind::Deadline { .. } => "Deadline",
            TaskKind::Event { .. } => "Event",
        };
        let status = if t.done { "Done" } else { "Pending" };
        let status_color = if t.done { Color::Green } else { Color::Yellow };

        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(kind),
            Cell::new(&t.description),
            Cell::new(t.timing()),
            Cell::new(status).fg(status_color),
        ]);
    }
    table
}

/// Deletes the task file, asking first unless `force`.
pub fn cmd_reset<R: BufRead>(storage: &Storage, force: bool, mut input: R) -> Result<bool> {
    if !force {
        print!("Are you sure you want to delete all tasks? This cannot be undone. [y/N] ");
        io::stdout().flush()?;
        let mut answer = String::new();
        input.read_line(&mut answer)?;
        if answer.trim().to_lowercase() != "y" {
            println!("Aborted.");
            return Ok(false);
        }
    }
    storage.delete()?;
    info!("deleted task file {}", storage.path().display());
    println!("All tasks deleted.");
    Ok(true)
}
