//! Job record types.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle status of a run.
///
/// `Error` carries its summary so an "ok" record can never also hold an
/// error message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum JobStatus {
    /// Process not yet exited (or the run was interrupted before the
    /// final write).
    #[default]
    Running,
    /// Process exited with code 0.
    Ok,
    /// Process exited non-zero, could not be started, or was terminated
    /// without a code.
    Error {
        /// Bounded trailing excerpt of stderr.
        summary: String,
    },
}

impl JobStatus {
    /// Get display string for UI.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::Ok => "ok",
            Self::Error { .. } => "error",
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }
}

/// Persisted summary of one run's lifecycle and outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobRecord {
    /// Run identity. Assigned once at creation, never reused or changed;
    /// records are replaced in place by this id.
    pub id: String,

    pub started_at: DateTime<Utc>,

    /// Absent while the run is in flight or if it crashed before
    /// completion.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ended_at: Option<DateTime<Utc>>,

    #[serde(flatten)]
    pub status: JobStatus,

    /// Engine exit code; absent if the process never exited.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exit_code: Option<i32>,

    /// The fully-assembled command line, recorded verbatim for
    /// reproducibility.
    pub command: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_path: Option<PathBuf>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub manifest_path: Option<PathBuf>,

    /// Bounded trailing excerpt of captured stdout.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stdout_tail: Option<String>,

    /// Bounded trailing excerpt of captured stderr.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stderr_tail: Option<String>,
}

impl JobRecord {
    /// Create a freshly-started record for a run.
    pub fn started(id: impl Into<String>, command: Vec<String>) -> Self {
        Self {
            id: id.into(),
            started_at: Utc::now(),
            ended_at: None,
            status: JobStatus::Running,
            exit_code: None,
            command,
            input_path: None,
            output_dir: None,
            manifest_path: None,
            stdout_tail: None,
            stderr_tail: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_display() {
        assert_eq!(JobStatus::Running.as_str(), "running");
        assert_eq!(JobStatus::Ok.as_str(), "ok");
        assert_eq!(
            JobStatus::Error {
                summary: "boom".to_string()
            }
            .as_str(),
            "error"
        );
    }

    #[test]
    fn started_record_is_running() {
        let record = JobRecord::started("run-1", vec!["pdf-toolkit".to_string()]);
        assert_eq!(record.status, JobStatus::Running);
        assert!(record.ended_at.is_none());
        assert!(record.exit_code.is_none());
    }

    #[test]
    fn status_tag_flattens_into_record() {
        let mut record = JobRecord::started("run-2", vec!["pdf-toolkit".to_string()]);
        record.status = JobStatus::Error {
            summary: "exit 2".to_string(),
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["state"], "error");
        assert_eq!(json["summary"], "exit 2");
        // Absent optionals are omitted entirely
        assert!(json.get("ended_at").is_none());

        let back: JobRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, record);
    }
}
