//! PDF Toolkit Desk - command-line host.
//!
//! Wires native collaborators (terminal notices, system file-manager
//! reveal, std-fs directory creation) into the core orchestrator and
//! exposes one subcommand per engine operation, plus ledger and settings
//! inspection.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use ptk_core::config::{ConfigManager, ConfigSection, Verbosity};
use ptk_core::jobs::{JobRecord, JobsStore};
use ptk_core::options::{
    PageImagesForm, PageImagesMode, RenderForm, RotateForm, SplitForm, SplitStrategy,
    SymmetryStrategy,
};
use ptk_core::orchestrator::{HostServices, Notifier, Orchestrator, OutputRevealer};

#[derive(Parser)]
#[command(name = "pdf-toolkit-desk", version, about = "Run PDF Toolkit engine operations")]
struct Cli {
    /// Directory runs resolve against. Defaults to the current directory.
    #[arg(long, global = true)]
    base_dir: Option<PathBuf>,

    /// Settings file. Defaults to the platform config directory.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render a PDF to page images.
    Render {
        pdf: PathBuf,
        /// Output resolution.
        #[arg(long, default_value = "300")]
        dpi: String,
        /// Page selector, e.g. "1-5,8,10-".
        #[arg(long, default_value = "")]
        pages: String,
        #[arg(long)]
        overwrite: bool,
    },
    /// Split a PDF into parts.
    Split {
        pdf: PathBuf,
        /// Explicit page ranges, e.g. "1-120,121-240".
        #[arg(long, default_value = "")]
        ranges: String,
        /// Fixed number of pages per output file.
        #[arg(long)]
        pages_per_file: Option<String>,
        #[arg(long)]
        overwrite: bool,
    },
    /// Rotate pages of a PDF.
    Rotate {
        pdf: PathBuf,
        /// One of 90, 180, 270.
        #[arg(long, default_value = "90")]
        degrees: String,
        /// Page selector, e.g. "1-5,8,10-".
        #[arg(long, default_value = "")]
        pages: String,
    },
    /// Normalize a folder of page images (split spreads, crop).
    PageImages {
        /// Folder containing the page images.
        in_dir: String,
        /// One of auto, split, crop.
        #[arg(long, default_value = "auto")]
        mode: String,
        #[arg(long, default_value = "*.png")]
        glob: String,
        #[arg(long, default_value = "0")]
        gutter_trim_px: String,
        #[arg(long, default_value = "0")]
        edge_inset_px: String,
        #[arg(long, default_value = "")]
        outer_margin_percent: String,
        /// One of independent, match_max_width, mirror_from_gutter.
        #[arg(long, default_value = "independent")]
        symmetry: String,
        #[arg(long)]
        overwrite: bool,
        #[arg(long)]
        debug: bool,
    },
    /// Print the job ledger, newest first.
    Jobs {
        #[arg(long, default_value_t = 20)]
        limit: usize,
    },
    /// Show current settings, or change them.
    Config {
        /// Engine command path, e.g. /opt/venv/bin/pdf-toolkit.
        #[arg(long)]
        engine_command: Option<String>,
        /// One of quiet, normal, verbose.
        #[arg(long)]
        verbosity: Option<String>,
        /// Run output folder, relative to the base directory.
        #[arg(long)]
        output_root: Option<String>,
        /// Reveal the output folder after a successful run.
        #[arg(long)]
        reveal_after_success: Option<bool>,
    },
}

/// Notifier that prints notices to the terminal.
struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&self, message: &str) {
        println!("{message}");
    }
}

/// Revealer that opens the path in the system file manager.
struct SystemRevealer;

impl OutputRevealer for SystemRevealer {
    fn reveal(&self, path: &Path) -> io::Result<()> {
        #[cfg(target_os = "macos")]
        let program = "open";
        #[cfg(target_os = "windows")]
        let program = "explorer";
        #[cfg(all(unix, not(target_os = "macos")))]
        let program = "xdg-open";

        std::process::Command::new(program).arg(path).spawn()?;
        Ok(())
    }
}

fn default_config_path() -> Result<PathBuf> {
    let dirs = directories::ProjectDirs::from("", "", "pdf-toolkit-desk")
        .context("Could not determine the platform config directory")?;
    Ok(dirs.config_dir().join("settings.toml"))
}

fn print_jobs(records: &[JobRecord], limit: usize) {
    if records.is_empty() {
        println!("No jobs recorded yet.");
        return;
    }
    for record in records.iter().take(limit) {
        println!(
            "{}  {:7}  exit={}  {}",
            record.id,
            record.status.as_str(),
            record
                .exit_code
                .map(|c| c.to_string())
                .unwrap_or_else(|| "-".to_string()),
            record.command.join(" "),
        );
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    ptk_core::logging::init_tracing("info");

    let cli = Cli::parse();

    let base_dir = match cli.base_dir {
        Some(dir) => dir,
        None => std::env::current_dir().context("Could not determine the current directory")?,
    };
    let config_path = match cli.config {
        Some(path) => path,
        None => default_config_path()?,
    };

    let mut config = ConfigManager::new(&config_path);
    config
        .load_or_create()
        .with_context(|| format!("Failed to load settings from {}", config_path.display()))?;
    tracing::debug!("Settings: {}", config_path.display());

    // The ledger shares the directory (not the file) with the settings
    let store = JobsStore::new(config_path.with_file_name("data.json"));

    match cli.command {
        Command::Jobs { limit } => {
            print_jobs(&store.load(), limit);
            return Ok(());
        }
        Command::Config {
            engine_command,
            verbosity,
            output_root,
            reveal_after_success,
        } => {
            return apply_config(
                &mut config,
                engine_command,
                verbosity,
                output_root,
                reveal_after_success,
            );
        }
        _ => {}
    }

    let mut host = HostServices::headless();
    host.notifier = Arc::new(TerminalNotifier);
    host.revealer = Arc::new(SystemRevealer);

    let orchestrator =
        Orchestrator::new(config.settings().clone(), base_dir, store, host);

    let record = match cli.command {
        Command::Render {
            pdf,
            dpi,
            pages,
            overwrite,
        } => {
            let options = RenderForm {
                dpi,
                pages,
                overwrite,
            }
            .build()?;
            orchestrator.render(&pdf, Some(options)).await?
        }
        Command::Split {
            pdf,
            ranges,
            pages_per_file,
            overwrite,
        } => {
            let form = match pages_per_file {
                Some(pages_per_file) => SplitForm {
                    strategy: SplitStrategy::PagesPerFile,
                    pages_per_file,
                    overwrite,
                    ..Default::default()
                },
                None => SplitForm {
                    strategy: SplitStrategy::Ranges,
                    ranges,
                    overwrite,
                    ..Default::default()
                },
            };
            orchestrator.split(&pdf, Some(form.build()?)).await?
        }
        Command::Rotate { pdf, degrees, pages } => {
            let options = RotateForm { degrees, pages }.build()?;
            orchestrator.rotate(&pdf, Some(options)).await?
        }
        Command::PageImages {
            in_dir,
            mode,
            glob,
            gutter_trim_px,
            edge_inset_px,
            outer_margin_percent,
            symmetry,
            overwrite,
            debug,
        } => {
            let mode = PageImagesMode::from_input(&mode)
                .with_context(|| format!("Unknown mode '{mode}' (auto, split, crop)"))?;
            let symmetry = SymmetryStrategy::from_input(&symmetry).with_context(|| {
                format!(
                    "Unknown symmetry '{symmetry}' (independent, match_max_width, mirror_from_gutter)"
                )
            })?;
            let options = PageImagesForm {
                in_dir,
                mode,
                glob,
                gutter_trim_px,
                edge_inset_px,
                outer_margin_percent,
                symmetry,
                overwrite,
                debug,
            }
            .build()?;
            orchestrator.page_images(Some(options)).await?
        }
        Command::Jobs { .. } | Command::Config { .. } => unreachable!("handled above"),
    };

    if let Some(record) = record {
        if record.status.is_error() {
            bail!("Job {} failed", record.id);
        }
    }
    Ok(())
}

fn apply_config(
    config: &mut ConfigManager,
    engine_command: Option<String>,
    verbosity: Option<String>,
    output_root: Option<String>,
    reveal_after_success: Option<bool>,
) -> Result<()> {
    let mut engine_changed = false;
    let mut paths_changed = false;
    let mut behavior_changed = false;

    if let Some(command) = engine_command {
        config.settings_mut().engine.command = command;
        engine_changed = true;
    }
    if let Some(verbosity) = verbosity {
        config.settings_mut().engine.verbosity = match verbosity.as_str() {
            "quiet" => Verbosity::Quiet,
            "normal" => Verbosity::Normal,
            "verbose" => Verbosity::Verbose,
            other => bail!("Unknown verbosity '{other}' (quiet, normal, verbose)"),
        };
        engine_changed = true;
    }
    if let Some(output_root) = output_root {
        config.settings_mut().paths.output_root = output_root;
        paths_changed = true;
    }
    if let Some(reveal) = reveal_after_success {
        config.settings_mut().behavior.reveal_after_success = reveal;
        behavior_changed = true;
    }

    if engine_changed {
        config.update_section(ConfigSection::Engine)?;
    }
    if paths_changed {
        config.update_section(ConfigSection::Paths)?;
    }
    if behavior_changed {
        config.update_section(ConfigSection::Behavior)?;
    }

    if !(engine_changed || paths_changed || behavior_changed) {
        let settings = config.settings();
        println!("settings file:        {}", config.path().display());
        println!(
            "engine.command:       {}",
            if settings.engine.is_configured() {
                settings.engine.command.as_str()
            } else {
                "(not configured)"
            }
        );
        println!("engine.args_prefix:   {:?}", settings.engine.args_prefix);
        println!("engine.verbosity:     {}", settings.engine.verbosity.as_str());
        println!("paths.output_root:    {}", settings.paths.output_root);
        println!(
            "behavior.reveal_after_success: {}",
            settings.behavior.reveal_after_success
        );
    } else {
        println!("Settings updated.");
    }
    Ok(())
}
