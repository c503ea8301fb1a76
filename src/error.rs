//! Error types for drawing operations.

use thiserror::Error;

/// Errors raised by a single draw call.
///
/// A failed draw never touches the registry: the command is validated before it
/// is stored or painted.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DrawError {
    /// An option carried a value of the wrong type.
    #[error("option `{key}` must be {expected}, found {found}")]
    InvalidOption {
        /// Option key as written by the caller (e.g. `filled`)
        key: &'static str,
        /// Human readable description of the accepted type
        expected: &'static str,
        /// Type name of the rejected value
        found: String,
    },
}

/// Errors raised while parsing a TOML option table.
#[derive(Debug, Error)]
pub enum OptionsError {
    #[error("failed to parse draw options: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Errors raised by the Cairo rendering backend.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("cairo error: {0}")]
    Cairo(#[from] cairo::Error),

    #[error("surface pixels unavailable: {0}")]
    Borrow(#[from] cairo::BorrowError),
}
