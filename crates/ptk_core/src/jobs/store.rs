//! Bounded, ordered persistence for job records.
//!
//! The ledger occupies one namespaced key inside a shared JSON data file;
//! any other top-level keys the host owns survive every save. Malformed
//! or absent ledger data loads as empty, never as an error.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use serde_json::{Map, Value};
use thiserror::Error;

use super::record::JobRecord;

/// Maximum number of records retained; older entries are silently
/// discarded on save.
pub const MAX_RECORDS: usize = 200;

/// Top-level key the ledger occupies inside the data file.
const JOBS_KEY: &str = "jobs";

/// Errors that can occur while persisting the ledger.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to write job ledger: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to encode job ledger: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Persisted job ledger, most-recently-created-first, capped at
/// [`MAX_RECORDS`].
#[derive(Debug)]
pub struct JobsStore {
    /// Path to the shared JSON data file.
    data_path: PathBuf,
    /// Serializes each load-modify-save sequence so interleaved upserts
    /// cannot lose an update.
    write_lock: Mutex<()>,
}

impl JobsStore {
    /// Create a store backed by the given data file.
    pub fn new(data_path: impl Into<PathBuf>) -> Self {
        Self {
            data_path: data_path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Get the data file path.
    pub fn path(&self) -> &Path {
        &self.data_path
    }

    /// Load the persisted records.
    ///
    /// Absent files and malformed shapes load as an empty list.
    pub fn load(&self) -> Vec<JobRecord> {
        let data = self.read_data();
        match data.get(JOBS_KEY) {
            Some(value) => serde_json::from_value(value.clone()).unwrap_or_else(|e| {
                tracing::warn!("Malformed job ledger, starting empty: {}", e);
                Vec::new()
            }),
            None => Vec::new(),
        }
    }

    /// Persist the given records verbatim.
    ///
    /// Merges non-destructively with any other keys in the data file.
    pub fn save(&self, records: &[JobRecord]) -> StoreResult<()> {
        let mut data = self.read_data();
        data.insert(JOBS_KEY.to_string(), serde_json::to_value(records)?);

        let json = serde_json::to_string_pretty(&Value::Object(data))?;
        self.atomic_write(&json)?;

        tracing::debug!("Saved {} job records", records.len());
        Ok(())
    }

    /// Insert or replace a record by id.
    ///
    /// An existing record keeps its position; a new one goes to the
    /// front. The list is truncated to [`MAX_RECORDS`] before saving.
    pub fn upsert(&self, record: JobRecord) -> StoreResult<()> {
        let _guard = self.write_lock.lock();

        let mut records = self.load();
        if let Some(existing) = records.iter_mut().find(|r| r.id == record.id) {
            *existing = record;
        } else {
            records.insert(0, record);
        }
        records.truncate(MAX_RECORDS);

        self.save(&records)
    }

    /// Read the shared data file as a JSON object.
    ///
    /// Anything unreadable or non-object degrades to an empty object.
    fn read_data(&self) -> Map<String, Value> {
        let content = match fs::read_to_string(&self.data_path) {
            Ok(content) => content,
            Err(e) => {
                if e.kind() != io::ErrorKind::NotFound {
                    tracing::warn!("Failed to read {}: {}", self.data_path.display(), e);
                }
                return Map::new();
            }
        };

        match serde_json::from_str::<Value>(&content) {
            Ok(Value::Object(map)) => map,
            Ok(_) => {
                tracing::warn!(
                    "Data file {} is not a JSON object, ignoring",
                    self.data_path.display()
                );
                Map::new()
            }
            Err(e) => {
                tracing::warn!("Failed to parse {}: {}", self.data_path.display(), e);
                Map::new()
            }
        }
    }

    /// Write content to the data file atomically (temp file, then rename).
    fn atomic_write(&self, content: &str) -> io::Result<()> {
        if let Some(parent) = self.data_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let temp_path = self.data_path.with_extension("json.tmp");
        fs::write(&temp_path, content)?;
        fs::rename(&temp_path, &self.data_path)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jobs::JobStatus;
    use tempfile::tempdir;

    fn make_record(id: &str) -> JobRecord {
        JobRecord::started(id, vec!["pdf-toolkit".to_string(), "render".to_string()])
    }

    #[test]
    fn missing_file_loads_empty() {
        let dir = tempdir().unwrap();
        let store = JobsStore::new(dir.path().join("data.json"));
        assert!(store.load().is_empty());
    }

    #[test]
    fn malformed_file_loads_empty() {
        let dir = tempdir().unwrap();
        let data_path = dir.path().join("data.json");

        for content in ["not json", "[1, 2, 3]", "{\"jobs\": \"oops\"}"] {
            fs::write(&data_path, content).unwrap();
            let store = JobsStore::new(&data_path);
            assert!(store.load().is_empty(), "expected empty for {content:?}");
        }
    }

    #[test]
    fn upsert_inserts_at_front() {
        let dir = tempdir().unwrap();
        let store = JobsStore::new(dir.path().join("data.json"));

        store.upsert(make_record("a")).unwrap();
        store.upsert(make_record("b")).unwrap();

        let records = store.load();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, "b");
        assert_eq!(records[1].id, "a");
    }

    #[test]
    fn upsert_replaces_in_place() {
        let dir = tempdir().unwrap();
        let store = JobsStore::new(dir.path().join("data.json"));

        store.upsert(make_record("a")).unwrap();
        store.upsert(make_record("b")).unwrap();
        store.upsert(make_record("c")).unwrap();

        let mut finished = make_record("b");
        finished.status = JobStatus::Ok;
        finished.exit_code = Some(0);
        store.upsert(finished).unwrap();

        let records = store.load();
        assert_eq!(records.len(), 3);
        // Same relative position as the first insertion
        assert_eq!(records[1].id, "b");
        assert_eq!(records[1].status, JobStatus::Ok);
        assert_eq!(records[1].exit_code, Some(0));
    }

    #[test]
    fn retention_cap_evicts_oldest() {
        let dir = tempdir().unwrap();
        let store = JobsStore::new(dir.path().join("data.json"));

        for i in 0..=MAX_RECORDS {
            store.upsert(make_record(&format!("run-{i}"))).unwrap();
        }

        let records = store.load();
        assert_eq!(records.len(), MAX_RECORDS);
        // Newest first; the very first insertion fell off the end
        assert_eq!(records[0].id, format!("run-{MAX_RECORDS}"));
        assert!(!records.iter().any(|r| r.id == "run-0"));
    }

    #[test]
    fn save_preserves_unrelated_keys() {
        let dir = tempdir().unwrap();
        let data_path = dir.path().join("data.json");
        fs::write(&data_path, "{\"theme\": \"dark\", \"jobs\": []}").unwrap();

        let store = JobsStore::new(&data_path);
        store.upsert(make_record("a")).unwrap();

        let raw: Value = serde_json::from_str(&fs::read_to_string(&data_path).unwrap()).unwrap();
        assert_eq!(raw["theme"], "dark");
        assert_eq!(raw["jobs"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn records_survive_round_trip() {
        let dir = tempdir().unwrap();
        let store = JobsStore::new(dir.path().join("data.json"));

        let mut record = make_record("a");
        record.status = JobStatus::Error {
            summary: "engine exploded".to_string(),
        };
        record.exit_code = Some(2);
        record.stderr_tail = Some("engine exploded".to_string());
        store.upsert(record.clone()).unwrap();

        assert_eq!(store.load(), vec![record]);
    }
}
