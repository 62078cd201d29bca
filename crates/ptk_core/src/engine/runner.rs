//! External engine execution with incremental output capture.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use tokio::io::AsyncReadExt;
use tokio::process::Command;

use crate::config::EngineSettings;

/// Outcome of one engine invocation.
///
/// `exit_code` is absent when the process could not be started or was
/// terminated without a code; callers distinguish "ran and failed" from
/// "could not run" via that absence.
#[derive(Debug, Clone, Default)]
pub struct RunOutput {
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

/// Executes one external-engine invocation and captures its outcome.
///
/// The process runs non-interactively with stdout and stderr captured
/// independently as they arrive. There is no kill or timeout path; a
/// hung engine hangs the run.
#[derive(Debug, Clone)]
pub struct EngineRunner {
    command: String,
    args_prefix: Vec<String>,
    verbosity_args: Vec<String>,
    cwd: PathBuf,
}

impl EngineRunner {
    /// Create a runner from engine settings and a working directory.
    pub fn new(settings: &EngineSettings, cwd: impl Into<PathBuf>) -> Self {
        Self {
            command: settings.command.clone(),
            args_prefix: settings.args_prefix.clone(),
            verbosity_args: settings
                .verbosity
                .as_args()
                .iter()
                .map(|s| s.to_string())
                .collect(),
            cwd: cwd.into(),
        }
    }

    /// The full command line for the given operation arguments, as it
    /// will be executed. Recorded verbatim on job records.
    pub fn command_line(&self, args: &[String]) -> Vec<String> {
        let mut line = Vec::with_capacity(
            1 + self.args_prefix.len() + self.verbosity_args.len() + args.len(),
        );
        line.push(self.command.clone());
        line.extend(self.args_prefix.iter().cloned());
        line.extend(self.verbosity_args.iter().cloned());
        line.extend(args.iter().cloned());
        line
    }

    /// Run the engine with the given operation arguments and wait for it
    /// to exit.
    ///
    /// Spawn failures surface through the same result path as normal
    /// completion: an absent exit code and empty output.
    pub async fn run(&self, args: &[String]) -> RunOutput {
        let mut cmd = Command::new(&self.command);
        cmd.args(&self.args_prefix)
            .args(&self.verbosity_args)
            .args(args)
            .current_dir(&self.cwd)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        tracing::debug!(
            "Running: {} {}",
            self.command,
            self.command_line(args)[1..].join(" ")
        );

        let mut child = match cmd.spawn() {
            Ok(child) => child,
            Err(e) => {
                tracing::warn!("Failed to spawn engine '{}': {}", self.command, e);
                return RunOutput::default();
            }
        };

        let stdout_pipe = child.stdout.take();
        let stderr_pipe = child.stderr.take();

        let stdout_fut = async {
            let mut buf = Vec::new();
            if let Some(mut pipe) = stdout_pipe {
                let _ = pipe.read_to_end(&mut buf).await;
            }
            buf
        };
        let stderr_fut = async {
            let mut buf = Vec::new();
            if let Some(mut pipe) = stderr_pipe {
                let _ = pipe.read_to_end(&mut buf).await;
            }
            buf
        };

        let (stdout_buf, stderr_buf, status) =
            tokio::join!(stdout_fut, stderr_fut, child.wait());

        let exit_code = match status {
            Ok(status) => status.code(),
            Err(e) => {
                tracing::warn!("Failed to wait for engine '{}': {}", self.command, e);
                None
            }
        };

        RunOutput {
            exit_code,
            stdout: String::from_utf8_lossy(&stdout_buf).into_owned(),
            stderr: String::from_utf8_lossy(&stderr_buf).into_owned(),
        }
    }

    /// Get the configured working directory.
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }
}
