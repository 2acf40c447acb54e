use thiserror::Error;

use crate::fonts::{FontFamily, FontStyle};

/// Errors that can occur while rendering an invoice page.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The drawing surface cannot provide a font the layout needs.
    /// Raised before any content is placed on the page.
    #[error("font not available: {family:?} {style:?}")]
    FontUnavailable {
        family: FontFamily,
        style: FontStyle,
    },

    /// A font file could not be parsed when registering it.
    #[error("failed to parse font: {0}")]
    FontParse(String),

    /// A monetary input was rejected in strict mode.
    #[error("invalid {field}: {value}")]
    InvalidAmount { field: &'static str, value: f64 },

    /// A rotation was popped with none active, or pushed while one
    /// was already active.
    #[error("rotation push/pop imbalance")]
    UnbalancedRotation,
}

/// Result type for rendering operations.
pub type Result<T> = std::result::Result<T, RenderError>;
