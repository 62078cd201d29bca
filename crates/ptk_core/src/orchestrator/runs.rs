//! Run identity and output layout.

use std::path::{Path, PathBuf};

use chrono::Utc;
use rand::Rng;

/// Allocate a run identity: UTC timestamp plus a random hex suffix.
///
/// Monotonically-ish ordered by creation time; uniqueness is operational,
/// not cryptographic.
pub fn make_run_id() -> String {
    let ts = Utc::now().format("%Y-%m-%dT%H-%M-%S-%3fZ");
    let suffix: u32 = rand::rng().random_range(0..0x0100_0000);
    format!("{ts}_{suffix:06x}")
}

/// Deterministic output locations for one run, keyed by its identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunPaths {
    /// Dedicated output directory for this run.
    pub out_dir: PathBuf,
    /// Manifest file inside the output directory.
    pub manifest: PathBuf,
}

impl RunPaths {
    pub fn new(output_root: &Path, run_id: &str) -> Self {
        let out_dir = output_root.join(run_id);
        let manifest = out_dir.join("manifest.json");
        Self { out_dir, manifest }
    }

    /// Run-local output path for a rotated copy of `input`.
    pub fn rotated_pdf(&self, input: &Path) -> PathBuf {
        let stem = input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "output".to_string());
        self.out_dir.join(format!("{stem}.rotated.pdf"))
    }
}
