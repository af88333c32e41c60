use std::cell::Cell;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::ScoreError;

const APP_DIR_NAME: &str = "grid-snake";
const SCORE_FILE_NAME: &str = "scores.json";

/// Persistent best-score storage.
///
/// Neither method may fail: a store that cannot read reports 0, and a store
/// that cannot write drops the value.
pub trait ScoreStore {
    fn load(&self) -> u32;
    fn save(&self, value: u32);
}

impl<T: ScoreStore + ?Sized> ScoreStore for Box<T> {
    fn load(&self) -> u32 {
        (**self).load()
    }

    fn save(&self, value: u32) {
        (**self).save(value);
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct ScoreFile {
    high_score: u32,
}

/// Returns the platform-correct score file path.
#[must_use]
pub fn scores_path() -> PathBuf {
    let mut base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    base.push(SCORE_FILE_NAME);
    base
}

/// JSON file holding a single `high_score` value.
#[derive(Debug, Clone)]
pub struct FileScoreStore {
    path: PathBuf,
}

impl FileScoreStore {
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Store at the default per-user data location.
    #[must_use]
    pub fn at_default_location() -> Self {
        Self::new(scores_path())
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ScoreStore for FileScoreStore {
    fn load(&self) -> u32 {
        match load_high_score_from_path(&self.path) {
            Ok(score) => score,
            Err(error) => {
                warn!(path = %self.path.display(), %error, "ignoring unreadable score file");
                0
            }
        }
    }

    fn save(&self, value: u32) {
        if let Err(error) = save_high_score_to_path(&self.path, value) {
            warn!(path = %self.path.display(), %error, "failed to save best score");
        }
    }
}

/// In-process store for tests and `--no-save` runs.
#[derive(Debug, Default)]
pub struct MemoryScoreStore {
    value: Cell<u32>,
    saves: Cell<u32>,
}

impl MemoryScoreStore {
    #[must_use]
    pub fn with_value(value: u32) -> Self {
        Self {
            value: Cell::new(value),
            saves: Cell::new(0),
        }
    }

    /// Number of `save` calls so far.
    #[must_use]
    pub fn save_count(&self) -> u32 {
        self.saves.get()
    }
}

impl ScoreStore for MemoryScoreStore {
    fn load(&self) -> u32 {
        self.value.get()
    }

    fn save(&self, value: u32) {
        self.value.set(value);
        self.saves.set(self.saves.get() + 1);
    }
}

fn load_high_score_from_path(path: &Path) -> Result<u32, ScoreError> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(0),
        Err(e) => return Err(e.into()),
    };

    let file = serde_json::from_str::<ScoreFile>(&raw)?;
    Ok(file.high_score)
}

fn save_high_score_to_path(path: &Path, score: u32) -> Result<(), ScoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let payload = ScoreFile { high_score: score };
    let json = serde_json::to_string_pretty(&payload)?;

    fs::write(path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    use super::{
        load_high_score_from_path, save_high_score_to_path, FileScoreStore, MemoryScoreStore,
        ScoreStore,
    };

    #[test]
    fn score_file_round_trip() {
        let path = unique_test_path("round_trip");

        save_high_score_to_path(&path, 42).expect("score save should succeed");
        let loaded = load_high_score_from_path(&path).expect("load should succeed");

        assert_eq!(loaded, 42);
        cleanup_test_path(&path);
    }

    #[test]
    fn missing_score_file_loads_zero() {
        let path = unique_test_path("missing");
        // Deliberately do not create the file.
        assert_eq!(FileScoreStore::new(path).load(), 0);
    }

    #[test]
    fn malformed_score_file_loads_zero() {
        let path = unique_test_path("malformed");
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("test parent directory should be creatable");
        }
        fs::write(&path, "not-json").expect("test file write should succeed");

        assert!(load_high_score_from_path(&path).is_err());
        assert_eq!(FileScoreStore::new(path.clone()).load(), 0);

        cleanup_test_path(&path);
    }

    #[test]
    fn negative_score_in_file_loads_zero() {
        let path = unique_test_path("negative");
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("test parent directory should be creatable");
        }
        fs::write(&path, r#"{"high_score": -5}"#).expect("test file write should succeed");

        assert_eq!(FileScoreStore::new(path.clone()).load(), 0);

        cleanup_test_path(&path);
    }

    #[test]
    fn unwritable_location_is_swallowed() {
        let blocker = unique_test_path("blocker");
        if let Some(parent) = blocker.parent() {
            fs::create_dir_all(parent).expect("test parent directory should be creatable");
        }
        fs::write(&blocker, "file, not a directory").expect("test file write should succeed");

        // The parent of this path is a regular file, so the write must fail.
        let store = FileScoreStore::new(blocker.join("scores.json"));
        store.save(10);
        assert_eq!(store.load(), 0);

        cleanup_test_path(&blocker);
    }

    #[test]
    fn memory_store_counts_saves() {
        let store = MemoryScoreStore::with_value(7);

        store.save(30);

        assert_eq!(store.load(), 30);
        assert_eq!(store.save_count(), 1);
    }

    fn unique_test_path(label: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time should be after epoch")
            .as_nanos();

        std::env::temp_dir()
            .join("grid-snake-score-tests")
            .join(format!("{label}-{nanos}.json"))
    }

    fn cleanup_test_path(path: &PathBuf) {
        let _ = fs::remove_file(path);
        if let Some(parent) = path.parent() {
            let _ = fs::remove_dir(parent);
        }
    }
}
