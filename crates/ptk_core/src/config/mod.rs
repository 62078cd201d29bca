//! Application configuration.
//!
//! Settings are TOML-based with independent sections, managed through
//! `ConfigManager` which provides atomic writes and section-level updates.

mod manager;
mod settings;

pub use manager::{ConfigError, ConfigManager, ConfigResult};
pub use settings::{
    BehaviorSettings, ConfigSection, EngineSettings, PathSettings, Settings, Verbosity,
};
