//! Error types for docview.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - Top-level error for the binary, wrapping configuration,
//!   logging, input file and text-layer failures
//!   - [`TextLayerError`] - Precondition failures when wiring a text layer
//!   - [`crate::config::ConfigError`] - Config file read/parse/validation failures
//!   - [`crate::logging::LoggingError`] - Tracing subscriber initialization failures
//!
//! # Recovery Strategy
//!
//! Only integrator wiring bugs are errors. Runtime conditions such as navigation
//! to an unknown page, a click on a disabled toolbar item, or a pointer event
//! outside any text box are tolerated no-ops and never produce an error value.

use crate::config::ConfigError;
use crate::logging::LoggingError;
use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error used by the `docview` binary.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded or is inconsistent.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Tracing could not be initialized.
    #[error("Logging error: {0}")]
    Logging(#[from] LoggingError),

    /// An input file (datasource or OCR boxes) could not be read.
    #[error("Failed to read {path}: {source}")]
    ReadInput {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Input JSON does not match the expected shape, or output failed to serialize.
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Text layer wiring failed.
    #[error("Text layer error: {0}")]
    TextLayer(#[from] TextLayerError),
}

/// Precondition failures of the text-layer engine.
///
/// These indicate a wiring bug in the integrating application (a host page
/// without identity or with a degenerate natural size), so they fail fast.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TextLayerError {
    /// The host context cannot be used to scale text boxes.
    #[error("Invalid host context: {reason}")]
    InvalidHostContext {
        /// What was wrong with the context.
        reason: String,
    },
}

impl TextLayerError {
    pub(crate) fn invalid_host(reason: impl Into<String>) -> Self {
        Self::InvalidHostContext {
            reason: reason.into(),
        }
    }
}
