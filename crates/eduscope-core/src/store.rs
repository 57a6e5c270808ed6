//! Durable progress storage keyed by lesson.
//!
//! Records are stored as JSON in the `{currentIndex, completed, notes}`
//! shape. A missing key is not an error: `load` returns `Ok(None)` and the
//! caller starts fresh.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use eduscope_logic::progress::ProgressRecord;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("progress record is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
    #[error("'{0}' is not a usable lesson key")]
    InvalidKey(String),
}

/// Read/write access to stored progress.
pub trait ProgressStore {
    fn load(&self, lesson_key: &str) -> Result<Option<ProgressRecord>, StoreError>;
    fn save(&mut self, lesson_key: &str, record: &ProgressRecord) -> Result<(), StoreError>;
}

/// In-process store holding serialized records, like browser local storage.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw stored JSON for a key.
    pub fn raw(&self, lesson_key: &str) -> Option<&str> {
        self.entries.get(lesson_key).map(String::as_str)
    }

    /// Overwrite the raw JSON for a key (used to simulate corruption).
    pub fn insert_raw(&mut self, lesson_key: &str, json: &str) {
        self.entries.insert(lesson_key.to_string(), json.to_string());
    }
}

impl ProgressStore for MemoryStore {
    fn load(&self, lesson_key: &str) -> Result<Option<ProgressRecord>, StoreError> {
        match self.entries.get(lesson_key) {
            Some(json) => Ok(Some(serde_json::from_str(json)?)),
            None => Ok(None),
        }
    }

    fn save(&mut self, lesson_key: &str, record: &ProgressRecord) -> Result<(), StoreError> {
        let json = serde_json::to_string(record)?;
        self.entries.insert(lesson_key.to_string(), json);
        Ok(())
    }
}

/// One `<lesson_key>.json` file per lesson under a directory.
#[derive(Debug, Clone)]
pub struct JsonDirStore {
    dir: PathBuf,
}

impl JsonDirStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, lesson_key: &str) -> Result<PathBuf, StoreError> {
        let valid = !lesson_key.is_empty()
            && lesson_key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(StoreError::InvalidKey(lesson_key.to_string()));
        }
        Ok(self.dir.join(format!("{lesson_key}.json")))
    }
}

impl ProgressStore for JsonDirStore {
    fn load(&self, lesson_key: &str) -> Result<Option<ProgressRecord>, StoreError> {
        let path = self.path_for(lesson_key)?;
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_str(&text)?))
    }

    fn save(&mut self, lesson_key: &str, record: &ProgressRecord) -> Result<(), StoreError> {
        let path = self.path_for(lesson_key)?;
        fs::create_dir_all(&self.dir)?;
        let json = serde_json::to_string_pretty(record)?;
        // write-then-rename so a crash never leaves a half-written record
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }
}
