//! Per-operation run options and their validating builders.
//!
//! Each operation has a raw "form" type carrying unchecked input (numeric
//! fields arrive as strings, the way an interactive surface collects them)
//! and a `build()` that either produces an immutable, fully-validated
//! options value or rejects with a user-facing reason. The first violated
//! constraint wins; no partially-valid options value can exist.
//!
//! Abandoning the interaction is not a validation failure: the caller
//! simply hands `None` to the orchestrator instead of building.

mod page_images;
mod render;
mod rotate;
mod split;

pub use page_images::{
    filter_input_dirs, PageImagesForm, PageImagesMode, PageImagesOptions, SymmetryStrategy,
};
pub use render::{RenderForm, RenderOptions};
pub use rotate::{RotateDegrees, RotateForm, RotateOptions};
pub use split::{SplitForm, SplitOptions, SplitSpec, SplitStrategy};

use thiserror::Error;

/// A rejected option build, with a user-facing reason.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OptionsError {
    #[error("{field} is required.")]
    Required { field: &'static str },

    #[error("{field} cannot be empty.")]
    Empty { field: &'static str },

    #[error("{field} must be an integer >= 0.")]
    NonNegativeInt { field: &'static str },

    #[error("{field} must be an integer >= 1.")]
    PositiveInt { field: &'static str },

    #[error("{field} must be an integer from {min} to {max}.")]
    IntRange {
        field: &'static str,
        min: i64,
        max: i64,
    },

    #[error("{field} must be a number from {min} to {max}.")]
    NumberRange {
        field: &'static str,
        min: f64,
        max: f64,
    },

    #[error("{field} must be one of {allowed}.")]
    OneOf {
        field: &'static str,
        allowed: &'static str,
    },
}

/// Result type for option builds.
pub type OptionsResult<T> = Result<T, OptionsError>;

/// The closed set of validated per-operation option values.
#[derive(Debug, Clone, PartialEq)]
pub enum RunOptions {
    Render(RenderOptions),
    Split(SplitOptions),
    Rotate(RotateOptions),
    PageImages(PageImagesOptions),
}

impl RunOptions {
    /// Engine operation name for this variant.
    pub fn operation(&self) -> &'static str {
        match self {
            Self::Render(_) => "render",
            Self::Split(_) => "split",
            Self::Rotate(_) => "rotate",
            Self::PageImages(_) => "page-images",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_are_user_facing() {
        let err = OptionsError::NumberRange {
            field: "Outer margin clamp (%)",
            min: 0.0,
            max: 25.0,
        };
        assert_eq!(
            err.to_string(),
            "Outer margin clamp (%) must be a number from 0 to 25."
        );

        let err = OptionsError::IntRange {
            field: "Pages per file",
            min: 1,
            max: 10000,
        };
        assert_eq!(
            err.to_string(),
            "Pages per file must be an integer from 1 to 10000."
        );
    }

    #[test]
    fn run_options_operation_names() {
        let options = RunOptions::Render(RenderForm::default().build().unwrap());
        assert_eq!(options.operation(), "render");
    }
}
