//! End-to-end extraction request lifecycle.
//!
//! Files are processed strictly in submission order; each file is fully
//! normalized or uploaded before the next one starts. The assembled content
//! sequence always opens with the fixed instruction block and feeds exactly
//! one generation call.

use factura_inference::{ContentPart, RemoteModel};
use tracing::{debug, warn};

use crate::error::{IngestError, Result};
use crate::extract::parser::parse_response;
use crate::extract::prompt::EXTRACTION_PROMPT;
use crate::extract::spreadsheet::sheets_to_text;
use crate::models::ExtractionOutcome;

/// One uploaded file awaiting extraction.
#[derive(Debug, Clone)]
pub struct SourceFile {
    /// Original filename, used to tag inline content and name remote assets.
    pub name: String,
    /// Declared media type; drives the per-file dispatch.
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

/// Run one extraction request over an ordered batch of files.
///
/// Spreadsheets are normalized to inline text; PDFs and images are uploaded
/// and referenced by locator; files of any other media type are skipped with
/// a warning. An empty batch is rejected before any network call.
pub async fn run_extraction<M>(model: &M, files: &[SourceFile]) -> Result<ExtractionOutcome>
where
    M: RemoteModel + ?Sized,
{
    if files.is_empty() {
        return Err(IngestError::NoFiles.into());
    }

    let mut parts = vec![ContentPart::Text(EXTRACTION_PROMPT.to_string())];
    for file in files {
        let mime_type = file.mime_type.as_str();
        if mime_type.contains("spreadsheet") || mime_type.contains("excel") {
            debug!(name = %file.name, "normalizing spreadsheet");
            let text = sheets_to_text(&file.bytes)?;
            parts.push(ContentPart::Text(format!(
                "\n\n=== Excel File: {} ===\n{}",
                file.name, text
            )));
        } else if mime_type.contains("pdf") || mime_type.contains("image") {
            debug!(name = %file.name, mime_type, "uploading binary asset");
            let asset = model
                .upload_asset(file.bytes.clone(), mime_type, &file.name)
                .await?;
            parts.push(ContentPart::FileRef {
                uri: asset.uri,
                mime_type: asset.mime_type,
            });
        } else {
            warn!(name = %file.name, mime_type, "skipping file with unrecognized media type");
        }
    }

    let raw = model.generate(&parts).await?;
    Ok(parse_response(&raw))
}
