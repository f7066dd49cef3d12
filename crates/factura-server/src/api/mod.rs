//! HTTP handlers.

mod handlers;

pub use handlers::{edit_record, extract, health_check, records, reset};
