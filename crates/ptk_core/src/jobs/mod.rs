//! Job ledger: per-run records and bounded persistence.

mod record;
mod store;

pub use record::{JobRecord, JobStatus};
pub use store::{JobsStore, StoreError, StoreResult, MAX_RECORDS};
