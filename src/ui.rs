use std::io::{self, BufRead, Write};

use log::{debug, warn};

use crate::error::DukeError;
use crate::parser;
use crate::storage::Storage;
use crate::tasklist::TaskList;

pub const LINE: &str = "____________________________________________________________";

/// Prints framed responses to any writer.
pub struct Ui<W: Write> {
    out: W,
}

impl<W: Write> Ui<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn show_welcome(&mut self) -> io::Result<()> {
        self.show_lines(&[
            "Hello! I'm Duke.".to_string(),
            "What can I do for you? (type 'help' for commands)".to_string(),
        ])
    }

    pub fn show_lines(&mut self, lines: &[String]) -> io::Result<()> {
        writeln!(self.out, "{}", LINE)?;
        for line in lines {
            writeln!(self.out, "{}", line)?;
        }
        writeln!(self.out, "{}", LINE)?;
        self.out.flush()
    }

    pub fn show_error(&mut self, error: &DukeError) -> io::Result<()> {
        self.show_lines(&[format!("OOPS!!! {}", error)])
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Runs an interactive session until `bye` or end of input.
///
/// The list is saved after every command that changes it.
pub fn run_session<R, W>(input: R, output: W, storage: &Storage) -> io::Result<W>
where
    R: BufRead,
    W: Write,
{
    let mut ui = Ui::new(output);
    ui.show_welcome()?;

    // Cleared when an unreadable task file could not be moved aside, so it
    // is never overwritten.
    let mut can_save = true;
    let mut tasks = match storage.load() {
        Ok(tasks) => tasks,
        Err(e) => {
            warn!("could not load {}: {}", storage.path().display(), e);
            ui.show_error(&e)?;
            let notice = match storage.back_up() {
                Ok(backup) => format!("Your old tasks were moved to {}.", backup.display()),
                Err(backup_err) => {
                    ui.show_error(&backup_err)?;
                    can_save = false;
                    "Changes in this session will not be saved.".to_string()
                }
            };
            ui.show_lines(&[notice, "Starting with an empty list.".to_string()])?;
            TaskList::new()
        }
    };

    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let command = parser::parse(&line);
        match command.execute(&mut tasks) {
            Ok(response) => {
                ui.show_lines(&response.lines)?;
                if response.modified && can_save {
                    if let Err(e) = storage.save(&tasks) {
                        ui.show_error(&e)?;
                    }
                }
                if response.exit {
                    return Ok(ui.into_inner());
                }
            }
            Err(e) => {
                debug!("command failed: {}", e);
                ui.show_error(&e)?;
            }
        }
    }
    Ok(ui.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn session(script: &str, storage: &Storage) -> String {
        let out = run_session(Cursor::new(script.to_string()), Vec::new(), storage).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_frames_every_response() {
        let mut ui = Ui::new(Vec::new());
        ui.show_lines(&["hi".to_string()]).unwrap();
        let text = String::from_utf8(ui.into_inner()).unwrap();
        assert_eq!(text, format!("{LINE}\nhi\n{LINE}\n"));
    }

    #[test]
    fn test_session_persists_and_stops_on_bye() {
        let dir = TempDir::new().unwrap();
        let storage = Storage::new(dir.path().join("tasks.json"));

        let text = session("todo read book\n\nmark 1\nbye\ntodo ignored\n", &storage);
        assert!(text.contains("Got it. I've added this task:"));
        assert!(text.contains("[T][X] read book"));
        assert!(text.contains("Bye. Hope to see you again soon!"));

        let tasks = storage.load().unwrap();
        assert_eq!(tasks.size(), 1);
        assert!(tasks.get(0).unwrap().done);
    }

    #[test]
    fn test_errors_are_reported_and_session_continues() {
        let dir = TempDir::new().unwrap();
        let storage = Storage::new(dir.path().join("tasks.json"));

        let text = session("delete 3\ndeadline x /by 2024-13-01\nfoo\nlist\n", &storage);
        assert!(text.contains("OOPS!!! Task number 3 is out of range"));
        assert!(text.contains("OOPS!!! Invalid date"));
        assert!(text.contains("OOPS!!! I'm sorry, but I don't know what 'foo' means."));
        assert!(text.contains(crate::tasklist::EMPTY_LISTING));
    }

    #[test]
    fn test_corrupt_file_starts_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tasks.json");
        std::fs::write(&path, "garbage").unwrap();
        let storage = Storage::new(&path);

        let text = session("list\n", &storage);
        assert!(text.contains("The task file is corrupted"));
        assert!(text.contains("Starting with an empty list."));
    }

    #[test]
    fn test_corrupt_file_survives_new_changes() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tasks.json");
        let original = r#"[{"description":"important","done":false,"type":"todo"},]"#;
        std::fs::write(&path, original).unwrap();
        let storage = Storage::new(&path);

        let text = session("todo new\nbye\n", &storage);
        let backup = dir.path().join("tasks.json.bak");
        assert!(text.contains(&format!("Your old tasks were moved to {}.", backup.display())));
        assert_eq!(std::fs::read_to_string(&backup).unwrap(), original);

        let tasks = storage.load().unwrap();
        assert_eq!(tasks.size(), 1);
        assert_eq!(tasks.get(0).unwrap().description, "new");
    }
}
