use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Read, Write};
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::error::Result;
use crate::tasklist::TaskList;

/// Returns the default path of the task file (`tasks.json`).
///
/// `~/.local/share/duke/tasks.json` on Linux, or `./tasks.json` when there is
/// no data directory. `--db` / `DUKE_DB` are resolved by the CLI.
pub fn db_path() -> PathBuf {
    let mut p = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    p.push("duke");
    p.push("tasks.json");
    p
}

/// Reads and writes the task list as a JSON array.
#[derive(Debug, Clone)]
pub struct Storage {
    path: PathBuf,
}

impl Storage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Storage at [`db_path`].
    pub fn open_default() -> Self {
        Self::new(db_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the task list.
    ///
    /// A missing file is an empty list; an unreadable or malformed one is an
    /// error.
    pub fn load(&self) -> Result<TaskList> {
        let mut f = match OpenOptions::new().read(true).open(&self.path) {
            Ok(f) => f,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("no task file at {}, starting empty", self.path.display());
                return Ok(TaskList::new());
            }
            Err(e) => return Err(e.into()),
        };
        let mut s = String::new();
        f.read_to_string(&mut s)?;
        let tasks: TaskList = serde_json::from_str(&s).map_err(|e| {
            warn!("task file {} is malformed: {}", self.path.display(), e);
            e
        })?;
        debug!("loaded {} task(s) from {}", tasks.size(), self.path.display());
        Ok(tasks)
    }

    /// Saves the given list, overwriting the existing file.
    pub fn save(&self, tasks: &TaskList) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() && !dir.exists() {
                fs::create_dir_all(dir)?;
            }
        }
        let s = serde_json::to_string_pretty(tasks)?;
        let mut f = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&self.path)?;
        f.write_all(s.as_bytes())?;
        debug!("saved {} task(s) to {}", tasks.size(), self.path.display());
        Ok(())
    }

    /// Moves the task file aside to `<path>.bak` so a later save cannot
    /// overwrite it. Returns where it went.
    pub fn back_up(&self) -> Result<PathBuf> {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".bak");
        let backup = PathBuf::from(name);
        fs::rename(&self.path, &backup)?;
        warn!("moved {} to {}", self.path.display(), backup.display());
        Ok(backup)
    }

    /// Deletes the task file.
    pub fn delete(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datetime;
    use crate::error::DukeError;
    use crate::models::Task;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let storage = Storage::new(dir.path().join("tasks.json"));
        assert!(storage.load().unwrap().is_empty());
    }

    #[test]
    fn test_save_then_load_keeps_order_and_status() {
        let dir = TempDir::new().unwrap();
        let storage = Storage::new(dir.path().join("nested").join("tasks.json"));

        let mut list = TaskList::new();
        list.add(Task::todo("read book"));
        let mut deadline = Task::deadline("essay", datetime::parse("2024-03-05 23:59").unwrap());
        deadline.mark_done();
        list.add(deadline);
        storage.save(&list).unwrap();

        let loaded = storage.load().unwrap();
        assert_eq!(loaded, list);
        assert!(loaded.get(1).unwrap().done);
    }

    #[test]
    fn test_malformed_file_is_corrupt() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tasks.json");
        fs::write(&path, "{ not json").unwrap();
        let err = Storage::new(&path).load().unwrap_err();
        assert!(matches!(err, DukeError::Corrupt(_)));
    }

    #[test]
    fn test_back_up_moves_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tasks.json");
        fs::write(&path, "[{").unwrap();
        let storage = Storage::new(&path);

        let backup = storage.back_up().unwrap();
        assert_eq!(backup, dir.path().join("tasks.json.bak"));
        assert!(!path.exists());
        assert_eq!(fs::read_to_string(backup).unwrap(), "[{");
    }

    #[test]
    fn test_default_path_is_under_duke_dir() {
        let path = db_path();
        assert!(path.ends_with("duke/tasks.json"));
    }

    #[test]
    fn test_delete() {
        let dir = TempDir::new().unwrap();
        let storage = Storage::new(dir.path().join("tasks.json"));
        storage.save(&TaskList::new()).unwrap();
        assert!(storage.path().exists());
        storage.delete().unwrap();
        assert!(!storage.path().exists());
        storage.delete().unwrap();
    }
}
