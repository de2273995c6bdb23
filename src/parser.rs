//! Turns a raw input line into a [`Command`].

use crate::commands::Command;
use crate::datetime;
use crate::error::{DukeError, Result};

/// Parses a line, folding any error into [`Command::Invalid`].
pub fn parse(line: &str) -> Command {
    parse_command(line).unwrap_or_else(|e| Command::Invalid(e.to_string()))
}

pub fn parse_command(line: &str) -> Result<Command> {
    let line = line.trim();
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    match verb.to_lowercase().as_str() {
        "list" => Ok(Command::List),
        "todo" => Ok(Command::Todo {
            description: parse_description(rest, "todo")?,
        }),
        "deadline" => {
            let (desc, by) = split_flag(rest, "/by", "deadline")?;
            Ok(Command::Deadline {
                description: parse_description(desc, "deadline")?,
                by: datetime::parse(by)?,
            })
        }
        "event" => {
            let (desc, range) = split_flag(rest, "/from", "event")?;
            let (from, to) = split_flag(range, "/to", "event")?;
            Ok(Command::Event {
                description: parse_description(desc, "event")?,
                from: datetime::parse(from)?,
                to: datetime::parse(to)?,
            })
        }
        "mark" | "done" => Ok(Command::Mark(parse_task_number(rest)?)),
        "unmark" => Ok(Command::Unmark(parse_task_number(rest)?)),
        "delete" => Ok(Command::Delete(parse_task_number(rest)?)),
        "find" => Ok(Command::Find(parse_keyword(rest)?)),
        "on" => {
            if rest.is_empty() {
                return Err(DukeError::MissingArgument(
                    "Please give a date, e.g. 'on 2024-03-05'.".to_string(),
                ));
            }
            Ok(Command::On(datetime::parse(rest)?))
        }
        "help" => Ok(Command::Help),
        "bye" => Ok(Command::Bye),
        _ => Err(DukeError::UnknownCommand(line.to_string())),
    }
}

/// Converts the 1-based number a user typed into a list index.
pub fn parse_task_number(raw: &str) -> Result<usize> {
    let raw = raw.trim();
    match raw.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n - 1),
        _ if raw.is_empty() => Err(DukeError::MissingArgument(
            "Please give a task number.".to_string(),
        )),
        _ => Err(DukeError::InvalidTaskNumber(raw.to_string())),
    }
}

/// Trims a search keyword, rejecting an empty one.
pub fn parse_keyword(raw: &str) -> Result<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(DukeError::MissingArgument(
            "Please tell me what to look for, e.g. 'find book'.".to_string(),
        ));
    }
    Ok(raw.to_string())
}

/// Trims a description, rejecting an empty one.
pub fn parse_description(raw: &str, kind: &str) -> Result<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(DukeError::MissingArgument(format!(
            "The description of a {} cannot be empty.",
            kind
        )));
    }
    Ok(raw.to_string())
}

// Splits on the last occurrence so descriptions may contain the flag text.
fn split_flag<'a>(raw: &'a str, flag: &str, kind: &str) -> Result<(&'a str, &'a str)> {
    match raw.rsplit_once(flag) {
        Some((before, after)) if !after.trim().is_empty() => Ok((before.trim(), after.trim())),
        _ => Err(DukeError::MissingArgument(format!(
            "A {} needs '{} <date>'.",
            kind, flag
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_verbs() {
        assert_eq!(parse("list"), Command::List);
        assert_eq!(parse("  LIST  "), Command::List);
        assert_eq!(parse("help"), Command::Help);
        assert_eq!(parse("bye"), Command::Bye);
    }

    #[test]
    fn test_todo() {
        assert_eq!(
            parse("todo read book"),
            Command::Todo { description: "read book".into() }
        );
        assert!(matches!(
            parse_command("todo   "),
            Err(DukeError::MissingArgument(_))
        ));
    }

    #[test]
    fn test_deadline() {
        assert_eq!(
            parse("deadline return book /by 2024-03-05 18:00"),
            Command::Deadline {
                description: "return book".into(),
                by: datetime::parse("2024-03-05 18:00").unwrap(),
            }
        );
        assert!(matches!(
            parse_command("deadline return book"),
            Err(DukeError::MissingArgument(_))
        ));
        assert!(matches!(
            parse_command("deadline return book /by 05/03/2024"),
            Err(DukeError::TemporalParse(_))
        ));
        assert!(matches!(
            parse_command("deadline /by 2024-03-05"),
            Err(DukeError::MissingArgument(_))
        ));
    }

    #[test]
    fn test_event() {
        assert_eq!(
            parse("event camp /from 2024-03-01 /to 2024-03-05"),
            Command::Event {
                description: "camp".into(),
                from: datetime::parse("2024-03-01").unwrap(),
                to: datetime::parse("2024-03-05").unwrap(),
            }
        );
        assert!(matches!(
            parse_command("event camp /from 2024-03-01"),
            Err(DukeError::MissingArgument(_))
        ));
    }

    #[test]
    fn test_task_numbers() {
        assert_eq!(parse("mark 1"), Command::Mark(0));
        assert_eq!(parse("done 3"), Command::Mark(2));
        assert_eq!(parse("unmark 2"), Command::Unmark(1));
        assert_eq!(parse("delete 10"), Command::Delete(9));
        assert!(matches!(parse_command("delete 0"), Err(DukeError::InvalidTaskNumber(_))));
        assert!(matches!(parse_command("delete -1"), Err(DukeError::InvalidTaskNumber(_))));
        assert!(matches!(parse_command("delete two"), Err(DukeError::InvalidTaskNumber(_))));
        assert!(matches!(parse_command("delete"), Err(DukeError::MissingArgument(_))));
    }

    #[test]
    fn test_find_and_on() {
        assert_eq!(parse("find book"), Command::Find("book".into()));
        assert!(matches!(parse_command("find   "), Err(DukeError::MissingArgument(_))));
        assert!(matches!(parse_keyword(""), Err(DukeError::MissingArgument(_))));
        assert_eq!(parse_keyword("  book ").unwrap(), "book");
        assert_eq!(
            parse("on 2024-03-05"),
            Command::On(datetime::parse("2024-03-05").unwrap())
        );
        assert!(matches!(parse_command("on"), Err(DukeError::MissingArgument(_))));
    }

    #[test]
    fn test_unknown_becomes_invalid() {
        match parse("blah blah") {
            Command::Invalid(message) => assert!(message.contains("blah blah")),
            other => panic!("expected invalid command, got {:?}", other),
        }
    }
}
