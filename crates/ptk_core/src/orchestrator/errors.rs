//! Error types for run orchestration.
//!
//! Every variant is terminal to the current run only; the orchestrator
//! stays usable for the next run after any of them.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A run that could not proceed.
#[derive(Error, Debug)]
pub enum OrchestratorError {
    /// No engine command configured; detected before anything else.
    #[error("Engine command is not configured. Set it in settings first.")]
    EngineNotConfigured,

    /// Output staging failed before the process was spawned.
    #[error("Could not create run output folder '{path}': {source}")]
    Preflight {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Another run of the same guarded operation is in progress.
    #[error("A {operation} run is already in progress.")]
    AlreadyRunning { operation: &'static str },
}

/// Result type for orchestration operations.
pub type OrchestratorResult<T> = Result<T, OrchestratorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_name_the_problem() {
        let err = OrchestratorError::AlreadyRunning {
            operation: "page-images",
        };
        assert!(err.to_string().contains("page-images"));

        let err = OrchestratorError::Preflight {
            path: PathBuf::from("/out/run-1"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.to_string().contains("/out/run-1"));
    }
}
