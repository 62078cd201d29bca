//! Page-image normalization options (split spreads + crop).
//!
//! The richest parameter set of the four operations: numeric trims, a
//! percentage-derived margin fraction, and two closed enums.

use std::path::Path;

use super::{OptionsError, OptionsResult};

/// Spread handling mode.
///
/// `auto` splits only pages wider than expected, `split` always splits,
/// `crop` never splits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageImagesMode {
    #[default]
    Auto,
    Split,
    Crop,
}

impl PageImagesMode {
    /// Engine flag spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Split => "split",
            Self::Crop => "crop",
        }
    }

    /// Parse raw input.
    pub fn from_input(value: &str) -> Option<Self> {
        match value {
            "auto" => Some(Self::Auto),
            "split" => Some(Self::Split),
            "crop" => Some(Self::Crop),
            _ => None,
        }
    }
}

/// How left/right crop boxes are reconciled after being computed
/// independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SymmetryStrategy {
    #[default]
    Independent,
    MatchMaxWidth,
    MirrorFromGutter,
}

impl SymmetryStrategy {
    /// Engine flag spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Independent => "independent",
            Self::MatchMaxWidth => "match_max_width",
            Self::MirrorFromGutter => "mirror_from_gutter",
        }
    }

    /// Parse raw input.
    pub fn from_input(value: &str) -> Option<Self> {
        match value {
            "independent" => Some(Self::Independent),
            "match_max_width" => Some(Self::MatchMaxWidth),
            "mirror_from_gutter" => Some(Self::MirrorFromGutter),
            _ => None,
        }
    }
}

/// Raw input for a page-images run.
#[derive(Debug, Clone)]
pub struct PageImagesForm {
    /// Folder containing page images, picked from `filter_input_dirs`
    /// candidates.
    pub in_dir: String,
    pub mode: PageImagesMode,
    /// Input file pattern.
    pub glob: String,
    /// Pixels shaved on both sides of the gutter after split.
    pub gutter_trim_px: String,
    /// Inward inset of the final crop box to remove faint borders.
    pub edge_inset_px: String,
    /// Clamp away from the outer edge, in percent. Empty means 0.
    pub outer_margin_percent: String,
    pub symmetry: SymmetryStrategy,
    pub overwrite: bool,
    pub debug: bool,
}

impl Default for PageImagesForm {
    fn default() -> Self {
        Self {
            in_dir: String::new(),
            mode: PageImagesMode::Auto,
            glob: "*.png".to_string(),
            gutter_trim_px: "0".to_string(),
            edge_inset_px: "0".to_string(),
            outer_margin_percent: String::new(),
            symmetry: SymmetryStrategy::Independent,
            overwrite: false,
            debug: false,
        }
    }
}

impl PageImagesForm {
    /// Validate and produce immutable page-images options.
    pub fn build(&self) -> OptionsResult<PageImagesOptions> {
        let in_dir = self.in_dir.trim();
        if in_dir.is_empty() {
            return Err(OptionsError::Required {
                field: "Input folder",
            });
        }

        let glob = self.glob.trim();
        if glob.is_empty() {
            return Err(OptionsError::Empty {
                field: "Glob pattern",
            });
        }

        let gutter_trim_px =
            parse_non_negative(&self.gutter_trim_px, "Gutter trim (px)")?;
        let edge_inset_px = parse_non_negative(&self.edge_inset_px, "Edge inset (px)")?;

        let percent = self.outer_margin_percent.trim();
        let outer_margin_percent = if percent.is_empty() {
            0.0
        } else {
            percent.parse::<f64>().unwrap_or(f64::NAN)
        };
        if !outer_margin_percent.is_finite()
            || outer_margin_percent < 0.0
            || outer_margin_percent > 25.0
        {
            return Err(OptionsError::NumberRange {
                field: "Outer margin clamp (%)",
                min: 0.0,
                max: 25.0,
            });
        }
        let outer_margin_frac = outer_margin_percent / 100.0;

        Ok(PageImagesOptions {
            in_dir: in_dir.to_string(),
            mode: self.mode,
            glob: glob.to_string(),
            gutter_trim_px,
            edge_inset_px,
            outer_margin_frac,
            symmetry: self.symmetry,
            overwrite: self.overwrite,
            debug: self.debug,
        })
    }
}

/// Validated options for a page-images run.
#[derive(Debug, Clone, PartialEq)]
pub struct PageImagesOptions {
    pub in_dir: String,
    pub mode: PageImagesMode,
    pub glob: String,
    pub gutter_trim_px: u32,
    pub edge_inset_px: u32,
    /// Stored as a fraction: percent input divided by 100.
    pub outer_margin_frac: f64,
    pub symmetry: SymmetryStrategy,
    pub overwrite: bool,
    pub debug: bool,
}

fn parse_non_negative(value: &str, field: &'static str) -> OptionsResult<u32> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(0);
    }
    value
        .parse::<u32>()
        .map_err(|_| OptionsError::NonNegativeInt { field })
}

/// Filter input-folder candidates to those usable for a run.
///
/// Hidden/system-style folders (any path segment starting with a dot) are
/// excluded; the survivors are sorted for stable presentation.
pub fn filter_input_dirs<I>(candidates: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut dirs: Vec<String> = candidates
        .into_iter()
        .filter(|dir| !is_hidden_or_system(dir))
        .collect();
    dirs.sort();
    dirs
}

fn is_hidden_or_system(dir: &str) -> bool {
    Path::new(dir).components().any(|component| {
        component
            .as_os_str()
            .to_string_lossy()
            .starts_with('.')
    })
}
