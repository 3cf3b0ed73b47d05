//! Best-time records.
//!
//! Stored as a flat JSON object mapping the level number (as a string) to
//! the fastest completion time in seconds, e.g. `{"1": 42.5, "3": 118.0}`.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Result of submitting a completion time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecordOutcome {
    /// Best time before this submission.
    pub previous: Option<f64>,
    /// Whether the submission beat the previous best.
    pub new_record: bool,
}

/// Best completion time per level.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Records {
    best: BTreeMap<String, f64>,
}

impl Records {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads records from `path`.
    ///
    /// A missing or unreadable file yields an empty table; records are a
    /// convenience and never block a game from starting.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            return Self::default();
        }
        match Self::read(path) {
            Ok(records) => {
                tracing::info!("Loaded records from {:?}", path);
                records
            }
            Err(e) => {
                tracing::warn!("Failed to load records: {:#}", e);
                Self::default()
            }
        }
    }

    fn read(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_json(&json)
    }

    /// Writes the records to `path` as JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        fs::write(path, self.to_json()?)
            .with_context(|| format!("Failed to write records to {}", path.display()))
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).context("Failed to serialize records")
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse records")
    }

    /// Best time for `level`, if any.
    pub fn best(&self, level: u32) -> Option<f64> {
        self.best.get(&level.to_string()).copied()
    }

    /// Records `seconds` for `level` if it beats the stored best.
    pub fn submit(&mut self, level: u32, seconds: f64) -> RecordOutcome {
        let previous = self.best(level);
        let new_record = previous.is_none_or(|best| seconds < best);
        if new_record {
            self.best.insert(level.to_string(), seconds);
        }
        RecordOutcome {
            previous,
            new_record,
        }
    }

    pub fn len(&self) -> usize {
        self.best.len()
    }

    pub fn is_empty(&self) -> bool {
        self.best.is_empty()
    }
}

/// Records bound to the file they persist to.
#[derive(Debug, Clone)]
pub struct RecordStore {
    path: PathBuf,
    records: Records,
}

impl RecordStore {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let records = Records::load(&path);
        Self { path, records }
    }

    pub fn records(&self) -> &Records {
        &self.records
    }

    /// Submits a time and saves immediately on a new record. Save
    /// failures are logged, not returned.
    pub fn submit(&mut self, level: u32, seconds: f64) -> RecordOutcome {
        let outcome = self.records.submit(level, seconds);
        if outcome.new_record {
            if let Err(e) = self.records.save(&self.path) {
                tracing::error!("Failed to save records: {:#}", e);
            }
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("mazetui-{}-{}.json", name, std::process::id()))
    }

    #[test]
    fn test_submit_keeps_fastest() {
        let mut records = Records::new();
        let first = records.submit(1, 50.0);
        assert_eq!(
            first,
            RecordOutcome {
                previous: None,
                new_record: true
            }
        );

        let slower = records.submit(1, 60.0);
        assert!(!slower.new_record);
        assert_eq!(slower.previous, Some(50.0));
        assert_eq!(records.best(1), Some(50.0));

        let faster = records.submit(1, 40.0);
        assert!(faster.new_record);
        assert_eq!(records.best(1), Some(40.0));
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_json_format() {
        let mut records = Records::new();
        records.submit(3, 118.0);
        records.submit(1, 42.5);
        assert_eq!(records.to_json().unwrap(), r#"{"1":42.5,"3":118.0}"#);

        let loaded = Records::from_json(r#"{"2": 10.25}"#).unwrap();
        assert_eq!(loaded.best(2), Some(10.25));
    }

    #[test]
    fn test_load_missing_or_corrupt_is_empty() {
        assert!(Records::load(temp_path("missing")).is_empty());

        let corrupt = temp_path("corrupt");
        fs::write(&corrupt, "{not json").unwrap();
        assert!(Records::load(&corrupt).is_empty());
        let _ = fs::remove_file(&corrupt);
    }

    #[test]
    fn test_store_persists_new_records() {
        let path = temp_path("store");
        let _ = fs::remove_file(&path);

        let mut store = RecordStore::open(&path);
        assert!(store.submit(4, 99.0).new_record);
        assert!(!store.submit(4, 120.0).new_record);

        let reopened = RecordStore::open(&path);
        assert_eq!(reopened.records().best(4), Some(99.0));
        let _ = fs::remove_file(&path);
    }
}
