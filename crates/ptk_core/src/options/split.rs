//! Split-into-parts options.

use super::{OptionsError, OptionsResult};

/// How a PDF is split into parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SplitStrategy {
    /// Explicit page ranges, e.g. "1-120,121-240".
    #[default]
    Ranges,
    /// Fixed number of pages per output file.
    PagesPerFile,
}

impl SplitStrategy {
    /// Engine flag spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ranges => "ranges",
            Self::PagesPerFile => "pages_per_file",
        }
    }

    /// Parse raw input.
    pub fn from_input(value: &str) -> Option<Self> {
        match value {
            "ranges" => Some(Self::Ranges),
            "pages_per_file" => Some(Self::PagesPerFile),
            _ => None,
        }
    }
}

/// Raw input for a split run.
#[derive(Debug, Clone)]
pub struct SplitForm {
    pub strategy: SplitStrategy,
    /// Range expression, used when strategy is `Ranges`.
    pub ranges: String,
    /// Pages per output file, used when strategy is `PagesPerFile`.
    pub pages_per_file: String,
    pub overwrite: bool,
}

impl Default for SplitForm {
    fn default() -> Self {
        Self {
            strategy: SplitStrategy::Ranges,
            ranges: String::new(),
            pages_per_file: "120".to_string(),
            overwrite: false,
        }
    }
}

impl SplitForm {
    /// Validate and produce immutable split options.
    pub fn build(&self) -> OptionsResult<SplitOptions> {
        let spec = match self.strategy {
            SplitStrategy::Ranges => {
                let ranges = self.ranges.trim();
                if ranges.is_empty() {
                    return Err(OptionsError::Required { field: "Ranges" });
                }
                SplitSpec::Ranges(ranges.to_string())
            }
            SplitStrategy::PagesPerFile => {
                let pages_per_file = self
                    .pages_per_file
                    .trim()
                    .parse::<u32>()
                    .ok()
                    .filter(|&n| (1..=10_000).contains(&n))
                    .ok_or(OptionsError::IntRange {
                        field: "Pages per file",
                        min: 1,
                        max: 10_000,
                    })?;
                SplitSpec::PagesPerFile(pages_per_file)
            }
        };

        Ok(SplitOptions {
            spec,
            overwrite: self.overwrite,
        })
    }
}

/// Validated split specification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SplitSpec {
    Ranges(String),
    PagesPerFile(u32),
}

/// Validated options for a split run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitOptions {
    pub spec: SplitSpec,
    pub overwrite: bool,
}
