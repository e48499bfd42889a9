//! Error type shared by every crop engine operation.

use thiserror::Error;

/// Error types for layout, conversion and session operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CropError {
    /// A viewport, image or crop dimension is non-positive or not finite.
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    /// Persisted inset values describe a crop window with no positive size.
    #[error("Invalid inset: sum {sum} must be in [0, 1)")]
    InvalidInset {
        /// The offending inset sum (or single component).
        sum: f64,
    },

    /// Inverse interpolation over an empty range.
    #[error("Division undefined: interpolation range is empty")]
    DivisionUndefined,

    /// No crop with the given alias exists in the editor value.
    #[error("Unknown crop: {0}")]
    UnknownCrop(String),

    /// The operation requires a crop to be selected.
    #[error("No crop is being edited")]
    NoActiveCrop,

    /// Layout has not run yet (image size or viewport still unknown).
    #[error("Layout is pending: image or viewport not ready")]
    LayoutPending,

    /// A configuration value is out of range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The persisted editor value could not be parsed or written.
    #[error("Invalid editor value: {0}")]
    InvalidValue(String),
}

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, CropError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CropError::InvalidInset { sum: 1.0 };
        assert_eq!(err.to_string(), "Invalid inset: sum 1 must be in [0, 1)");

        let err = CropError::UnknownCrop("hero".to_string());
        assert_eq!(err.to_string(), "Unknown crop: hero");

        let err = CropError::DivisionUndefined;
        assert_eq!(
            err.to_string(),
            "Division undefined: interpolation range is empty"
        );
    }
}
