//! Settings struct with TOML-based sections.
//!
//! Settings are organized into logical sections that map to TOML tables.
//! Each section can be updated independently for atomic section-level updates.

use serde::{Deserialize, Serialize};

/// Root settings structure containing all configuration sections.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// External engine invocation settings.
    #[serde(default)]
    pub engine: EngineSettings,

    /// Path-related settings.
    #[serde(default)]
    pub paths: PathSettings,

    /// Behavior toggles.
    #[serde(default)]
    pub behavior: BehaviorSettings,
}

/// How the external processing engine is invoked.
///
/// An explicit command path is preferred over PATH assumptions, e.g.
/// `/path/to/venv/bin/pdf-toolkit`, or a Python interpreter with
/// `args_prefix = ["-m", "pdf-toolkit"]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineSettings {
    /// Full path (or name) of the engine command. Empty means unconfigured.
    #[serde(default)]
    pub command: String,

    /// Arguments inserted before the operation arguments.
    #[serde(default)]
    pub args_prefix: Vec<String>,

    /// Console verbosity requested from the engine.
    #[serde(default)]
    pub verbosity: Verbosity,
}

impl EngineSettings {
    /// Whether a usable engine command has been configured.
    pub fn is_configured(&self) -> bool {
        !self.command.trim().is_empty()
    }
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            command: String::new(),
            args_prefix: Vec::new(),
            verbosity: Verbosity::Quiet,
        }
    }
}

/// Engine console verbosity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Verbosity {
    /// Pass `--quiet` to the engine.
    #[default]
    Quiet,
    /// No verbosity flag.
    Normal,
    /// Pass `--verbose` to the engine.
    Verbose,
}

impl Verbosity {
    /// Flag(s) prepended to every engine invocation.
    pub fn as_args(&self) -> &'static [&'static str] {
        match self {
            Self::Quiet => &["--quiet"],
            Self::Normal => &[],
            Self::Verbose => &["--verbose"],
        }
    }

    /// Get display string for UI.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Quiet => "quiet",
            Self::Normal => "normal",
            Self::Verbose => "verbose",
        }
    }
}

/// Path configuration for run output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathSettings {
    /// Folder (relative to the base directory) where runs are written.
    #[serde(default = "default_output_root")]
    pub output_root: String,
}

fn default_output_root() -> String {
    "pdf-toolkit_Output".to_string()
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            output_root: default_output_root(),
        }
    }
}

/// Behavior toggles.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BehaviorSettings {
    /// Reveal the run output folder after a successful run.
    #[serde(default = "default_true")]
    pub reveal_after_success: bool,
}

fn default_true() -> bool {
    true
}

impl Default for BehaviorSettings {
    fn default() -> Self {
        Self {
            reveal_after_success: true,
        }
    }
}

/// Identifies a settings section for section-level updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSection {
    Engine,
    Paths,
    Behavior,
}

impl ConfigSection {
    /// TOML table name for this section.
    pub fn table_name(&self) -> &'static str {
        match self {
            Self::Engine => "engine",
            Self::Paths => "paths",
            Self::Behavior => "behavior",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_require_explicit_engine() {
        let settings = Settings::default();
        assert!(!settings.engine.is_configured());
        assert_eq!(settings.engine.verbosity, Verbosity::Quiet);
        assert_eq!(settings.paths.output_root, "pdf-toolkit_Output");
        assert!(settings.behavior.reveal_after_success);
    }

    #[test]
    fn verbosity_args() {
        assert_eq!(Verbosity::Quiet.as_args(), &["--quiet"]);
        assert!(Verbosity::Normal.as_args().is_empty());
        assert_eq!(Verbosity::Verbose.as_args(), &["--verbose"]);
    }

    #[test]
    fn settings_round_trip() {
        let toml_str = r#"
            [engine]
            command = "/opt/venv/bin/pdf-toolkit"
            args_prefix = ["-m", "pdf-toolkit"]
            verbosity = "verbose"

            [paths]
            output_root = "runs"
        "#;

        let settings: Settings = toml::from_str(toml_str).unwrap();
        assert!(settings.engine.is_configured());
        assert_eq!(settings.engine.args_prefix.len(), 2);
        assert_eq!(settings.engine.verbosity, Verbosity::Verbose);
        assert_eq!(settings.paths.output_root, "runs");
        // Missing section falls back to defaults
        assert!(settings.behavior.reveal_after_success);
    }
}
