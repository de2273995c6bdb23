use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use env_logger::Env;

use duke::commands::{cmd_list_table, cmd_reset, cmd_run, Command};
use duke::parser::{parse_description, parse_keyword, parse_task_number};
use duke::storage::Storage;
use duke::ui::run_session;
use duke::{datetime, DukeError};

#[derive(Parser)]
#[command(name = "duke")]
#[command(about = "A terminal task assistant for todos, deadlines and events", long_about = None)]
struct Cli {
    /// Path of the task file
    #[arg(long, global = true, env = "DUKE_DB")]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive session
    Chat,
    /// Add a todo
    Todo {
        /// Task description (quoted if it has spaces)
        description: String,
    },
    /// Add a deadline
    Deadline {
        description: String,
        /// Due date, yyyy-MM-dd or "yyyy-MM-dd HH:mm"
        #[arg(short, long)]
        by: String,
    },
    /// Add an event
    Event {
        description: String,
        /// Start, yyyy-MM-dd or "yyyy-MM-dd HH:mm"
        #[arg(short, long)]
        from: String,
        /// End, yyyy-MM-dd or "yyyy-MM-dd HH:mm"
        #[arg(short, long)]
        to: String,
    },
    /// List all tasks
    List {
        /// Show a table instead of numbered lines
        #[arg(short, long)]
        table: bool,
    },
    /// Mark a task as done
    Mark {
        /// Task number as shown by `list`
        number: String,
    },
    /// Mark a task as not done
    Unmark {
        number: String,
    },
    /// Remove a task
    Delete {
        number: String,
    },
    /// Find tasks by keyword
    Find {
        keyword: String,
    },
    /// Show deadlines and events on a date
    On {
        date: String,
    },
    /// Delete all tasks
    Reset {
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
    /// Generate shell completions
    Completions {
        shell: Shell,
    },
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let storage = match cli.db {
        Some(path) => Storage::new(path),
        None => Storage::open_default(),
    };

    let command = match cli.command {
        Some(Commands::Chat) | None => {
            let stdin = io::stdin();
            run_session(stdin.lock(), io::stdout(), &storage).context("session I/O failed")?;
            return Ok(());
        }
        Some(Commands::List { table: true }) => return Ok(cmd_list_table(&storage)?),
        Some(Commands::Reset { force }) => {
            cmd_reset(&storage, force, io::stdin().lock())?;
            return Ok(());
        }
        Some(Commands::Completions { shell }) => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "duke", &mut io::stdout());
            return Ok(());
        }
        Some(Commands::Todo { description }) => Command::Todo {
            description: parse_description(&description, "todo")?,
        },
        Some(Commands::Deadline { description, by }) => Command::Deadline {
            description: parse_description(&description, "deadline")?,
            by: datetime::parse(&by).map_err(DukeError::from)?,
        },
        Some(Commands::Event { description, from, to }) => Command::Event {
            description: parse_description(&description, "event")?,
            from: datetime::parse(&from).map_err(DukeError::from)?,
            to: datetime::parse(&to).map_err(DukeError::from)?,
        },
        Some(Commands::List { table: false }) => Command::List,
        Some(Commands::Mark { number }) => Command::Mark(parse_task_number(&number)?),
        Some(Commands::Unmark { number }) => Command::Unmark(parse_task_number(&number)?),
        Some(Commands::Delete { number }) => Command::Delete(parse_task_number(&number)?),
        Some(Commands::Find { keyword }) => Command::Find(parse_keyword(&keyword)?),
        Some(Commands::On { date }) => Command::On(datetime::parse(&date).map_err(DukeError::from)?),
    };

    cmd_run(&storage, command, false)?;
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        match e.downcast_ref::<DukeError>() {
            Some(err) if err.is_user_error() => {
                eprintln!("Error: {}", err);
                std::process::exit(1);
            }
            _ => {
                eprintln!("Internal error: {:#}", e);
                std::process::exit(2);
            }
        }
    }
}
