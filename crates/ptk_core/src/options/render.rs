//! Render-to-images options.

use super::{OptionsError, OptionsResult};

/// Raw input for a render run.
#[derive(Debug, Clone)]
pub struct RenderForm {
    /// Output resolution in DPI.
    pub dpi: String,
    /// Optional page selector, e.g. "1-5,8,10-". Empty means all pages.
    pub pages: String,
    /// Overwrite existing files.
    pub overwrite: bool,
}

impl Default for RenderForm {
    fn default() -> Self {
        Self {
            dpi: "300".to_string(),
            pages: String::new(),
            overwrite: false,
        }
    }
}

impl RenderForm {
    /// Validate and produce immutable render options.
    pub fn build(&self) -> OptionsResult<RenderOptions> {
        let dpi = self
            .dpi
            .trim()
            .parse::<u32>()
            .ok()
            .filter(|&dpi| dpi >= 1)
            .ok_or(OptionsError::PositiveInt { field: "DPI" })?;

        let pages = self.pages.trim();
        let pages = (!pages.is_empty()).then(|| pages.to_string());

        Ok(RenderOptions {
            dpi,
            pages,
            overwrite: self.overwrite,
        })
    }
}

/// Validated options for a render run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    pub dpi: u32,
    pub pages: Option<String>,
    pub overwrite: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_build() {
        let options = RenderForm::default().build().unwrap();
        assert_eq!(options.dpi, 300);
        assert_eq!(options.pages, None);
        assert!(!options.overwrite);
    }

    #[test]
    fn dpi_must_be_positive_integer() {
        for bad in ["0", "-72", "1.5", "fast", ""] {
            let form = RenderForm {
                dpi: bad.to_string(),
                ..Default::default()
            };
            assert_eq!(
                form.build().unwrap_err(),
                OptionsError::PositiveInt { field: "DPI" },
                "expected rejection for {bad:?}"
            );
        }
    }

    #[test]
    fn pages_trimmed_and_optional() {
        let form = RenderForm {
            pages: "  1-5,8  ".to_string(),
            ..Default::default()
        };
        assert_eq!(form.build().unwrap().pages.as_deref(), Some("1-5,8"));
    }
}
