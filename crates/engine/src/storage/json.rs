use std::{
    fs, io,
    path::{Path, PathBuf},
};

use super::ExpenseStore;
use crate::{EngineError, Expense, ResultEngine};

/// Stores the expense collection as a pretty-printed JSON array in a single
/// file. A missing or empty file reads as an empty collection.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ExpenseStore for JsonFileStore {
    fn load(&self) -> ResultEngine<Vec<Expense>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => {
                return Err(EngineError::Storage(format!(
                    "cannot read {}: {err}",
                    self.path.display()
                )));
            }
        };

        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }

        serde_json::from_str(&raw).map_err(|err| {
            EngineError::Storage(format!("malformed {}: {err}", self.path.display()))
        })
    }

    fn save(&self, expenses: &[Expense]) -> ResultEngine<()> {
        let json = serde_json::to_string_pretty(expenses)?;
        write_replacing(&self.path, &json).map_err(|err| {
            EngineError::Storage(format!("cannot write {}: {err}", self.path.display()))
        })
    }
}

/// Writes `contents` next to `path` and moves it into place, so readers see
/// either the old or the new collection.
fn write_replacing(path: &Path, contents: &str) -> io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let tmp = tmp_path(path);
    fs::write(&tmp, contents)?;
    match fs::rename(&tmp, path) {
        Ok(()) => Ok(()),
        Err(_) => {
            fs::copy(&tmp, path)?;
            let _ = fs::remove_file(&tmp);
            Ok(())
        }
    }
}

/// `expenses.json` -> `expenses.json.tmp`, so stores sharing a stem never
/// share a temp file.
fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    PathBuf::from(tmp)
}
