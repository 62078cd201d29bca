//! Per-operation run dispatch.
//!
//! One method per engine operation, all following the same lifecycle:
//! ensure the engine is configured, stage the run output directory,
//! persist a running record, execute, finalize the record, and notify.
//! Host collaborator failures are logged and swallowed; they never change
//! a job's status.

use std::path::{Path, PathBuf};

use chrono::Utc;

use crate::config::Settings;
use crate::engine::{
    page_images_args, render_args, rotate_args, split_args, EngineRunner, RunOutput,
};
use crate::jobs::{JobRecord, JobStatus, JobsStore};
use crate::options::{PageImagesOptions, RenderOptions, RotateOptions, SplitOptions};

use super::errors::{OrchestratorError, OrchestratorResult};
use super::host::HostServices;
use super::inflight::{InFlight, OpKind};
use super::runs::{make_run_id, RunPaths};

/// Maximum characters of stdout/stderr retained on a job record.
pub const OUTPUT_TAIL_LIMIT: usize = 20_000;

/// Maximum characters of stderr retained as an error summary.
pub const ERROR_TAIL_LIMIT: usize = 2_000;

/// The trailing `limit` characters of `text`.
///
/// Counts characters, not bytes, so the cut never lands inside a
/// multibyte sequence.
pub fn tail_chars(text: &str, limit: usize) -> &str {
    let total = text.chars().count();
    if total <= limit {
        return text;
    }
    match text.char_indices().nth(total - limit) {
        Some((idx, _)) => &text[idx..],
        None => text,
    }
}

/// Ties options, run identity, engine execution, and the job ledger
/// together, one run at a time.
pub struct Orchestrator {
    settings: Settings,
    /// Directory all relative inputs and the output root resolve against.
    base_dir: PathBuf,
    store: JobsStore,
    host: HostServices,
    in_flight: InFlight,
}

impl Orchestrator {
    pub fn new(
        settings: Settings,
        base_dir: impl Into<PathBuf>,
        store: JobsStore,
        host: HostServices,
    ) -> Self {
        Self {
            settings,
            base_dir: base_dir.into(),
            store,
            host,
            in_flight: InFlight::new(),
        }
    }

    /// The job ledger backing this orchestrator.
    pub fn store(&self) -> &JobsStore {
        &self.store
    }

    /// Render a PDF to page images.
    ///
    /// `None` options means the caller abandoned the interaction: no
    /// record, no process, no notice.
    pub async fn render(
        &self,
        pdf: &Path,
        options: Option<RenderOptions>,
    ) -> OrchestratorResult<Option<JobRecord>> {
        self.ensure_engine_configured()?;
        let Some(options) = options else {
            return Ok(None);
        };

        let pdf = self.absolutize(pdf);
        let run_id = make_run_id();
        let paths = self.stage_run(&run_id)?;
        let args = render_args(&options, &pdf, &paths.out_dir, &paths.manifest).to_args();

        let mut record = self.new_record(&run_id, &args, &paths);
        record.input_path = Some(pdf);

        let record = self
            .execute(record, &args, &paths.out_dir, "Render complete.", "Render failed.")
            .await;
        Ok(Some(record))
    }

    /// Split a PDF into parts by ranges or page count.
    pub async fn split(
        &self,
        pdf: &Path,
        options: Option<SplitOptions>,
    ) -> OrchestratorResult<Option<JobRecord>> {
        self.ensure_engine_configured()?;
        let Some(options) = options else {
            return Ok(None);
        };

        let pdf = self.absolutize(pdf);
        let run_id = make_run_id();
        let paths = self.stage_run(&run_id)?;
        let args = split_args(&options, &pdf, &paths.out_dir, &paths.manifest).to_args();

        let mut record = self.new_record(&run_id, &args, &paths);
        record.input_path = Some(pdf);

        let record = self
            .execute(record, &args, &paths.out_dir, "Split complete.", "Split failed.")
            .await;
        Ok(Some(record))
    }

    /// Rotate pages of a PDF into a run-local output PDF.
    pub async fn rotate(
        &self,
        pdf: &Path,
        options: Option<RotateOptions>,
    ) -> OrchestratorResult<Option<JobRecord>> {
        self.ensure_engine_configured()?;
        let Some(options) = options else {
            return Ok(None);
        };

        let pdf = self.absolutize(pdf);
        let run_id = make_run_id();
        let paths = self.stage_run(&run_id)?;
        let out_pdf = paths.rotated_pdf(&pdf);
        let args = rotate_args(&options, &pdf, &out_pdf, &paths.manifest).to_args();

        let mut record = self.new_record(&run_id, &args, &paths);
        record.input_path = Some(pdf);

        let record = self
            .execute(record, &args, &paths.out_dir, "Rotate complete.", "Rotate failed.")
            .await;
        Ok(Some(record))
    }

    /// Normalize a folder of page images (split spreads, crop).
    ///
    /// At most one page-images run may be in flight; a second concurrent
    /// invocation is rejected with a notice and no record.
    pub async fn page_images(
        &self,
        options: Option<PageImagesOptions>,
    ) -> OrchestratorResult<Option<JobRecord>> {
        self.ensure_engine_configured()?;

        let Some(_guard) = self.in_flight.try_begin(OpKind::PageImages) else {
            self.host
                .notifier
                .notify("A page-images run is already in progress.");
            return Err(OrchestratorError::AlreadyRunning {
                operation: OpKind::PageImages.as_str(),
            });
        };
        let Some(options) = options else {
            return Ok(None);
        };

        let in_dir = self.absolutize(Path::new(&options.in_dir));
        let run_id = make_run_id();
        let paths = self.stage_run(&run_id)?;
        let args =
            page_images_args(&options, &in_dir, &paths.out_dir, &paths.manifest).to_args();

        let mut record = self.new_record(&run_id, &args, &paths);
        record.input_path = Some(in_dir);

        let record = self
            .execute(
                record,
                &args,
                &paths.out_dir,
                "Page images complete.",
                "Page images failed.",
            )
            .await;
        Ok(Some(record))
    }

    fn ensure_engine_configured(&self) -> OrchestratorResult<()> {
        if self.settings.engine.is_configured() {
            return Ok(());
        }
        self.host
            .notifier
            .notify("Engine command is not configured. Set it in settings first.");
        Err(OrchestratorError::EngineNotConfigured)
    }

    fn runner(&self) -> EngineRunner {
        EngineRunner::new(&self.settings.engine, &self.base_dir)
    }

    fn output_root(&self) -> PathBuf {
        self.base_dir.join(&self.settings.paths.output_root)
    }

    fn absolutize(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }

    /// Derive run paths and create the output directory.
    fn stage_run(&self, run_id: &str) -> OrchestratorResult<RunPaths> {
        let paths = RunPaths::new(&self.output_root(), run_id);
        if let Err(source) = self.host.dirs.create_dir_all(&paths.out_dir) {
            self.host
                .notifier
                .notify("Could not create the run output folder.");
            return Err(OrchestratorError::Preflight {
                path: paths.out_dir,
                source,
            });
        }
        Ok(paths)
    }

    fn new_record(&self, run_id: &str, args: &[String], paths: &RunPaths) -> JobRecord {
        let mut record = JobRecord::started(run_id, self.runner().command_line(args));
        record.output_dir = Some(paths.out_dir.clone());
        record.manifest_path = Some(paths.manifest.clone());
        record
    }

    /// Persist a record and refresh the history view. Failures are logged
    /// and swallowed.
    fn record_job(&self, record: &JobRecord) {
        if let Err(e) = self.store.upsert(record.clone()) {
            tracing::error!("Failed to persist job {}: {}", record.id, e);
        }
        self.host.history.refresh(&self.store.load());
    }

    /// Run the engine and drive the record from running to its terminal
    /// status.
    async fn execute(
        &self,
        mut record: JobRecord,
        args: &[String],
        out_dir: &Path,
        success_notice: &str,
        failure_notice: &str,
    ) -> JobRecord {
        self.record_job(&record);
        tracing::info!("Job {} started", record.id);

        let output = self.runner().run(args).await;

        record.ended_at = Some(Utc::now());
        record.exit_code = output.exit_code;
        record.stdout_tail = non_empty_tail(&output.stdout);
        record.stderr_tail = non_empty_tail(&output.stderr);
        record.status = if output.exit_code == Some(0) {
            JobStatus::Ok
        } else {
            JobStatus::Error {
                summary: error_summary(&output),
            }
        };
        self.record_job(&record);
        tracing::info!("Job {} finished: {}", record.id, record.status.as_str());

        if record.status.is_ok() {
            self.host.notifier.notify(success_notice);
            if self.settings.behavior.reveal_after_success {
                if let Err(e) = self.host.revealer.reveal(out_dir) {
                    tracing::warn!("Failed to reveal {}: {}", out_dir.display(), e);
                }
            }
        } else {
            self.host.notifier.notify(failure_notice);
        }

        record
    }
}

fn non_empty_tail(text: &str) -> Option<String> {
    if text.is_empty() {
        None
    } else {
        Some(tail_chars(text, OUTPUT_TAIL_LIMIT).to_string())
    }
}

/// Bounded error summary: the trailing excerpt of trimmed stderr, or a
/// description of how the process ended when stderr was empty.
fn error_summary(output: &RunOutput) -> String {
    let trimmed = output.stderr.trim();
    if !trimmed.is_empty() {
        return tail_chars(trimmed, ERROR_TAIL_LIMIT).to_string();
    }
    match output.exit_code {
        Some(code) => format!("Engine exited with code {code}"),
        None => "Engine process could not be started".to_string(),
    }
}
