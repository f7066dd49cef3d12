//! Error types for the factura-core library.

use thiserror::Error;

use crate::store::RecordId;

/// Main error type for the factura library.
#[derive(Error, Debug)]
pub enum FacturaError {
    /// Request-level intake error.
    #[error("ingest error: {0}")]
    Ingest(#[from] IngestError),

    /// Spreadsheet normalization error.
    #[error("spreadsheet error: {0}")]
    Spreadsheet(#[from] SpreadsheetError),

    /// Error from the remote inference layer.
    #[error("inference error: {0}")]
    Inference(#[from] factura_inference::InferenceError),

    /// Record store error.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

/// Errors raised before any inference work starts.
#[derive(Error, Debug)]
pub enum IngestError {
    /// The extraction request contained no files.
    #[error("no files uploaded")]
    NoFiles,
}

/// Errors related to spreadsheet normalization.
#[derive(Error, Debug)]
pub enum SpreadsheetError {
    /// The bytes could not be decoded as a supported workbook container.
    #[error("failed to read workbook: {0}")]
    Workbook(#[from] calamine::Error),

    /// A sheet listed by the workbook could not be read.
    #[error("failed to read sheet '{name}': {reason}")]
    Sheet { name: String, reason: String },
}

/// Errors related to the record store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// No record with the given id exists in the collection.
    #[error("no {collection} record with id {id}")]
    UnknownRecord {
        collection: &'static str,
        id: RecordId,
    },
}

/// Result type for the factura library.
pub type Result<T> = std::result::Result<T, FacturaError>;
