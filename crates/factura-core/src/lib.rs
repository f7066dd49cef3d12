//! Core library for factura - AI-assisted invoice data extraction.
//!
//! This crate provides:
//! - Spreadsheet normalization into inference-ready text
//! - The extraction pipeline against a remote multimodal model
//! - Response parsing with a degraded-output fallback
//! - An identity-addressed store for invoices, products, and customers
//! - Per-field validation and cross-collection reconciliation of edits

pub mod error;
pub mod extract;
pub mod models;
pub mod reconcile;
pub mod store;
pub mod validate;

pub use error::{FacturaError, IngestError, Result, SpreadsheetError, StoreError};
pub use extract::{parse_response, run_extraction, sheets_to_text, SourceFile, EXTRACTION_PROMPT};
pub use models::{
    Customer, CustomerField, DegradedOutput, ExtractionOutcome, ExtractionPayload, FieldError,
    Invoice, InvoiceField, Product, ProductField,
};
pub use reconcile::{apply_edit, EditOutcome, RecordEdit};
pub use store::{Collection, DataStore, Keyed, RecordId, StoreSnapshot};

/// Re-export the inference seam used by the pipeline.
pub use factura_inference::{AssetRef, ContentPart, RemoteModel};
