//! Renderer error types.

use thiserror::Error;

use krump_decoder::DecodeError;

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Errors that can occur while producing a report.
///
/// Layout and emission never fail; these come from decoding, asset
/// resolution and writing the finished document.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Outcomes could not be decoded into moves.
    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    /// A branding asset could not be resolved.
    #[error("Asset '{source_ref}' unavailable: {reason}")]
    Asset {
        /// URL or path of the asset.
        source_ref: String,
        /// What went wrong.
        reason: String,
    },

    /// HTTP client setup failed.
    #[error("HTTP client error: {0}")]
    Http(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(String),
}

impl RenderError {
    pub(crate) fn asset(source_ref: impl Into<String>, reason: impl ToString) -> Self {
        RenderError::Asset {
            source_ref: source_ref.into(),
            reason: reason.to_string(),
        }
    }
}
