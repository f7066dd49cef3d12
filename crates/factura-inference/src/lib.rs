//! Remote inference abstraction layer for factura.
//!
//! This crate wraps the external multimodal inference service behind a small
//! trait so the extraction pipeline can run against a mock in tests:
//! - binary asset upload with readiness polling
//! - single-shot text generation over mixed text/file content

mod error;
mod gemini;
mod model;

pub use error::InferenceError;
pub use gemini::{AssetState, GeminiClient, RemoteFile, DEFAULT_BASE_URL, DEFAULT_MODEL};
pub use model::{AssetRef, ContentPart, RemoteModel};

/// Result type for inference operations.
pub type Result<T> = std::result::Result<T, InferenceError>;
