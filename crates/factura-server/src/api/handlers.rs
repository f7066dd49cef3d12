//! Request handlers for the extraction and record APIs.

use axum::extract::{Json, Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use tracing::{error, info};

use factura_core::{
    apply_edit, run_extraction, ExtractionOutcome, FacturaError, IngestError, RecordEdit,
    SourceFile,
};

use crate::AppState;

/// Per-file size ceiling, checked before any upload to the inference
/// service starts.
const MAX_FILE_SIZE: usize = 10 * 1024 * 1024;

/// File extensions accepted by the extract endpoint.
const ACCEPTED_EXTENSIONS: &[&str] = &["pdf", "xlsx", "xls", "jpg", "jpeg", "png"];

/// Transport-level failure body.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub details: String,
}

impl ErrorResponse {
    fn new(error: &str, details: impl Into<String>) -> Self {
        Self {
            error: error.to_string(),
            details: details.into(),
        }
    }
}

/// Health check
pub async fn health_check() -> &'static str {
    "OK"
}

/// Extract records from a multipart batch of files.
///
/// Both the structured and the degraded payload come back with a success
/// status; only transport-level failures (no files, oversize or unsupported
/// files, unhandled errors) use the error envelope.
pub async fn extract(State(state): State<AppState>, mut multipart: Multipart) -> Response {
    let mut files = Vec::new();
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(err) => {
                return error_response(
                    StatusCode::BAD_REQUEST,
                    ErrorResponse::new("Failed to read upload", err.to_string()),
                );
            }
        };

        // Non-file parts are ignored.
        let Some(name) = field.file_name().map(str::to_string) else {
            continue;
        };
        let declared_mime = field.content_type().map(str::to_string);

        let bytes = match field.bytes().await {
            Ok(bytes) => bytes,
            Err(err) => {
                return error_response(
                    StatusCode::BAD_REQUEST,
                    ErrorResponse::new("Failed to read upload", err.to_string()),
                );
            }
        };

        if let Err(rejection) = validate_file(&name, bytes.len()) {
            return error_response(StatusCode::BAD_REQUEST, rejection);
        }

        let mime_type = declared_mime.unwrap_or_else(|| guess_mime(&name).to_string());
        files.push(SourceFile {
            name,
            mime_type,
            bytes: bytes.to_vec(),
        });
    }

    match run_extraction(state.model.as_ref(), &files).await {
        Ok(outcome) => {
            if let ExtractionOutcome::Parsed(payload) = &outcome {
                info!(
                    invoices = payload.invoices.len(),
                    products = payload.products.len(),
                    customers = payload.customers.len(),
                    "extraction complete"
                );
                state.store.write().await.load_extraction(payload.clone());
            }
            (StatusCode::OK, Json(outcome)).into_response()
        }
        Err(FacturaError::Ingest(IngestError::NoFiles)) => error_response(
            StatusCode::BAD_REQUEST,
            ErrorResponse::new("No files uploaded", "the request contained no file parts"),
        ),
        Err(err) => {
            error!(%err, "extraction failed");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse::new("Failed to process files", err.to_string()),
            )
        }
    }
}

/// Current snapshot of the three record sets, with record ids.
pub async fn records(State(state): State<AppState>) -> Response {
    let snapshot = state.store.read().await.snapshot();
    (StatusCode::OK, Json(snapshot)).into_response()
}

/// Apply a single-field edit and reconcile dependent records.
pub async fn edit_record(State(state): State<AppState>, Json(edit): Json<RecordEdit>) -> Response {
    let mut store = state.store.write().await;
    match apply_edit(&mut store, edit) {
        Ok(outcome) => (StatusCode::OK, Json(outcome)).into_response(),
        Err(err) => error_response(
            StatusCode::NOT_FOUND,
            ErrorResponse::new("Unknown record", err.to_string()),
        ),
    }
}

/// Clear all record sets.
pub async fn reset(State(state): State<AppState>) -> Response {
    state.store.write().await.clear_all();
    StatusCode::NO_CONTENT.into_response()
}

fn error_response(status: StatusCode, body: ErrorResponse) -> Response {
    (status, Json(body)).into_response()
}

fn validate_file(name: &str, size: usize) -> Result<(), ErrorResponse> {
    let extension = std::path::Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());

    match extension {
        Some(ext) if ACCEPTED_EXTENSIONS.contains(&ext.as_str()) => {}
        _ => {
            return Err(ErrorResponse::new(
                "Unsupported file type",
                format!("'{name}' is not one of: .pdf .xlsx .xls .jpg .jpeg .png"),
            ));
        }
    }

    if size > MAX_FILE_SIZE {
        return Err(ErrorResponse::new(
            "File too large",
            format!("'{name}' exceeds the 10 MB per-file limit"),
        ));
    }

    Ok(())
}

/// Fallback media type by extension, for clients that omit per-part
/// content types.
fn guess_mime(name: &str) -> &'static str {
    let extension = std::path::Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());

    match extension.as_deref() {
        Some("pdf") => "application/pdf",
        Some("xlsx") => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        Some("xls") => "application/vnd.ms-excel",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn accepts_whitelisted_extensions_case_insensitively() {
        assert!(validate_file("invoice.pdf", 1024).is_ok());
        assert!(validate_file("Ledger.XLSX", 1024).is_ok());
        assert!(validate_file("scan.JPG", 1024).is_ok());
    }

    #[test]
    fn rejects_unknown_extensions_and_extensionless_names() {
        assert!(validate_file("notes.txt", 1024).is_err());
        assert!(validate_file("archive.zip", 1024).is_err());
        assert!(validate_file("README", 1024).is_err());
    }

    #[test]
    fn enforces_the_per_file_size_ceiling() {
        assert!(validate_file("big.pdf", MAX_FILE_SIZE).is_ok());
        let rejection = validate_file("big.pdf", MAX_FILE_SIZE + 1).unwrap_err();
        assert_eq!(rejection.error, "File too large");
    }

    #[test]
    fn guesses_media_types_from_extensions() {
        assert_eq!(guess_mime("scan.png"), "image/png");
        assert_eq!(guess_mime("photo.JPEG"), "image/jpeg");
        assert_eq!(
            guess_mime("book.xlsx"),
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
        );
        assert_eq!(guess_mime("mystery.bin"), "application/octet-stream");
    }
}
