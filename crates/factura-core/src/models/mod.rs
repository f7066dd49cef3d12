//! Record types and field identifiers for the three collections.

pub mod field;
pub mod record;

pub use field::{CustomerField, InvoiceField, ProductField};
pub use record::{
    Customer, DegradedOutput, ExtractionOutcome, ExtractionPayload, FieldError, Invoice, Product,
};
