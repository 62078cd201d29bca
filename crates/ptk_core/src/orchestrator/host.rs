//! Host capability interfaces injected into the orchestrator.
//!
//! The core has zero dependency on any specific host environment; a GUI
//! shell, a CLI, or tests supply these narrow collaborators. Failures in
//! them never escalate to job failures.

use std::fs;
use std::io;
use std::path::Path;
use std::sync::Arc;

use crate::jobs::JobRecord;

/// Creates output directories for staged runs.
pub trait DirectoryCreator: Send + Sync {
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;
}

/// Delivers user-facing notices (toasts, terminal lines, ...).
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str);
}

/// Reveals a finished run's output location in the host environment.
pub trait OutputRevealer: Send + Sync {
    fn reveal(&self, path: &Path) -> io::Result<()>;
}

/// A live view of the job history, refreshed after every ledger change.
pub trait HistoryView: Send + Sync {
    fn refresh(&self, records: &[JobRecord]);
}

/// Bundle of host collaborators handed to the orchestrator.
#[derive(Clone)]
pub struct HostServices {
    pub dirs: Arc<dyn DirectoryCreator>,
    pub notifier: Arc<dyn Notifier>,
    pub revealer: Arc<dyn OutputRevealer>,
    pub history: Arc<dyn HistoryView>,
}

impl HostServices {
    /// Headless defaults: real directories, notices through tracing, no
    /// reveal, no live view.
    pub fn headless() -> Self {
        Self {
            dirs: Arc::new(FsDirectoryCreator),
            notifier: Arc::new(LogNotifier),
            revealer: Arc::new(NullRevealer),
            history: Arc::new(NullHistoryView),
        }
    }
}

/// std::fs-backed directory creation.
pub struct FsDirectoryCreator;

impl DirectoryCreator for FsDirectoryCreator {
    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        fs::create_dir_all(path)
    }
}

/// Notifier that routes notices through tracing.
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, message: &str) {
        tracing::info!("{}", message);
    }
}

/// Revealer that does nothing.
pub struct NullRevealer;

impl OutputRevealer for NullRevealer {
    fn reveal(&self, _path: &Path) -> io::Result<()> {
        Ok(())
    }
}

/// History view that ignores refreshes.
pub struct NullHistoryView;

impl HistoryView for NullHistoryView {
    fn refresh(&self, _records: &[JobRecord]) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn fs_directory_creator_creates_nested_dirs() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("a").join("b").join("c");

        FsDirectoryCreator.create_dir_all(&target).unwrap();
        assert!(target.is_dir());
    }
}
