//! The trait seam between the extraction pipeline and the remote service.

use async_trait::async_trait;

use crate::Result;

/// One segment of the content sequence sent to the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentPart {
    /// Inline text (instructions or normalized spreadsheet content).
    Text(String),
    /// Reference to a previously uploaded remote asset.
    FileRef { uri: String, mime_type: String },
}

/// A remote asset that has reached its terminal ready state and may be
/// referenced in a generation call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetRef {
    /// Remote locator assigned by the service.
    pub uri: String,
    /// Media type as resolved by the service.
    pub mime_type: String,
}

/// Trait for multimodal inference services.
///
/// Abstracts the two operations the pipeline needs so tests can substitute
/// a mock for the real HTTP client.
#[async_trait]
pub trait RemoteModel: Send + Sync {
    /// Upload binary content and wait until the asset is ready to be
    /// referenced. Returns only once the asset has left its processing state.
    async fn upload_asset(
        &self,
        bytes: Vec<u8>,
        mime_type: &str,
        display_name: &str,
    ) -> Result<AssetRef>;

    /// Run a single generation call over the assembled content sequence and
    /// return the raw text response.
    async fn generate(&self, parts: &[ContentPart]) -> Result<String>;
}
