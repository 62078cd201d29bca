//! Run orchestration: run identity, output staging, engine execution,
//! and job-record lifecycle.
//!
//! The orchestrator owns no UI. Host environments inject the capability
//! interfaces in [`host`] and receive notices, history refreshes, and
//! reveal requests through them.

mod dispatch;
mod errors;
mod host;
mod inflight;
mod runs;

pub use dispatch::{tail_chars, Orchestrator, ERROR_TAIL_LIMIT, OUTPUT_TAIL_LIMIT};
pub use errors::{OrchestratorError, OrchestratorResult};
pub use host::{
    DirectoryCreator, FsDirectoryCreator, HistoryView, HostServices, LogNotifier, Notifier,
    NullHistoryView, NullRevealer, OutputRevealer,
};
pub use inflight::{InFlight, InFlightGuard, OpKind};
pub use runs::{make_run_id, RunPaths};
