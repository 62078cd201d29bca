//! Rotate-pages options.

use super::{OptionsError, OptionsResult};

/// Allowed rotation amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RotateDegrees {
    #[default]
    D90,
    D180,
    D270,
}

impl RotateDegrees {
    /// Engine flag spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::D90 => "90",
            Self::D180 => "180",
            Self::D270 => "270",
        }
    }

    /// Parse raw input.
    pub fn from_input(value: &str) -> Option<Self> {
        match value.trim() {
            "90" => Some(Self::D90),
            "180" => Some(Self::D180),
            "270" => Some(Self::D270),
            _ => None,
        }
    }
}

/// Raw input for a rotate run.
#[derive(Debug, Clone)]
pub struct RotateForm {
    /// Rotation amount in degrees.
    pub degrees: String,
    /// Optional page selector, e.g. "1-5,8,10-". Empty means all pages.
    pub pages: String,
}

impl Default for RotateForm {
    fn default() -> Self {
        Self {
            degrees: "90".to_string(),
            pages: String::new(),
        }
    }
}

impl RotateForm {
    /// Validate and produce immutable rotate options.
    pub fn build(&self) -> OptionsResult<RotateOptions> {
        let degrees =
            RotateDegrees::from_input(&self.degrees).ok_or(OptionsError::OneOf {
                field: "Degrees",
                allowed: "90, 180, 270",
            })?;

        let pages = self.pages.trim();
        let pages = (!pages.is_empty()).then(|| pages.to_string());

        Ok(RotateOptions { degrees, pages })
    }
}

/// Validated options for a rotate run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotateOptions {
    pub degrees: RotateDegrees,
    pub pages: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_quarter_turns_only() {
        for (input, expected) in [
            ("90", RotateDegrees::D90),
            ("180", RotateDegrees::D180),
            ("270", RotateDegrees::D270),
        ] {
            let form = RotateForm {
                degrees: input.to_string(),
                ..Default::default()
            };
            assert_eq!(form.build().unwrap().degrees, expected);
        }

        for bad in ["0", "45", "360", "-90", ""] {
            let form = RotateForm {
                degrees: bad.to_string(),
                ..Default::default()
            };
            assert_eq!(
                form.build().unwrap_err(),
                OptionsError::OneOf {
                    field: "Degrees",
                    allowed: "90, 180, 270",
                },
                "expected rejection for {bad:?}"
            );
        }
    }

    #[test]
    fn pages_optional() {
        let options = RotateForm::default().build().unwrap();
        assert_eq!(options.pages, None);

        let form = RotateForm {
            pages: "1-5,8,10-".to_string(),
            ..Default::default()
        };
        assert_eq!(form.build().unwrap().pages.as_deref(), Some("1-5,8,10-"));
    }
}
