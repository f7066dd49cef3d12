//! Error types for the factura-inference crate.

use thiserror::Error;

/// Errors raised while talking to the remote inference service.
#[derive(Error, Debug)]
pub enum InferenceError {
    /// Transport-level HTTP failure.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("inference API returned {status}: {message}")]
    Api { status: u16, message: String },

    /// A remote asset never left the processing state.
    #[error("remote asset {name} still processing after {attempts} status checks")]
    AssetTimeout { name: String, attempts: u32 },

    /// A remote asset reached a terminal failure state.
    #[error("remote asset {name} failed processing")]
    AssetFailed { name: String },

    /// The model produced no candidates or no text.
    #[error("model returned an empty response")]
    EmptyResponse,
}
