//! Cross-collection reconciliation of user edits.
//!
//! An edit is an explicit command against one record; applying it validates
//! the record, writes it back, and then propagates derived fields to
//! dependent records in the other collections, keyed by name equality.
//! Propagation is best-effort and per-record independent.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::StoreError;
use crate::models::{CustomerField, FieldError, InvoiceField, ProductField};
use crate::store::{DataStore, RecordId};
use crate::validate::{validate_customer, validate_invoice, validate_product};

/// A single-field edit to one record in one collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "collection", rename_all = "camelCase")]
pub enum RecordEdit {
    Invoice {
        id: RecordId,
        field: InvoiceField,
        value: String,
    },
    Product {
        id: RecordId,
        field: ProductField,
        value: String,
    },
    Customer {
        id: RecordId,
        field: CustomerField,
        value: String,
    },
}

/// What applying an edit did: the (advisory) validation errors now attached
/// to the edited record, and how many dependent records were rewritten.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EditOutcome {
    pub errors: Vec<FieldError>,
    pub propagated: usize,
}

/// Apply an edit and propagate it to dependent records.
///
/// Validation never blocks the write; errors are attached to the record and
/// reported in the outcome. Only the three name edits listed in the match
/// arms trigger propagation.
pub fn apply_edit(store: &mut DataStore, edit: RecordEdit) -> Result<EditOutcome, StoreError> {
    match edit {
        RecordEdit::Invoice { id, field, value } => edit_invoice(store, id, field, value),
        RecordEdit::Product { id, field, value } => edit_product(store, id, field, value),
        RecordEdit::Customer { id, field, value } => edit_customer(store, id, field, value),
    }
}

fn edit_invoice(
    store: &mut DataStore,
    id: RecordId,
    field: InvoiceField,
    value: String,
) -> Result<EditOutcome, StoreError> {
    let mut invoice = store.invoice(id)?.clone();
    invoice.set(field, value.clone());

    let errors = validate_invoice(&invoice);
    invoice.validation_errors = errors.clone();
    store.update_invoice(id, invoice.clone())?;

    // Invoice -> product is one-directional and keyed on the new name: the
    // catalog entry the invoice now points at receives the invoice's values.
    let mut propagated = 0;
    if field == InvoiceField::ProductName {
        if let Some(product_id) = store.product_id_by_name(&value) {
            let mut product = store.product(product_id)?.clone();
            product.quantity = invoice.quantity.clone();
            product.tax_percent = invoice.tax_percent.clone();
            store.update_product(product_id, product)?;
            propagated = 1;
            debug!(%id, %product_id, "synced invoice edit into product catalog");
        }
    }

    Ok(EditOutcome { errors, propagated })
}

fn edit_product(
    store: &mut DataStore,
    id: RecordId,
    field: ProductField,
    value: String,
) -> Result<EditOutcome, StoreError> {
    let mut product = store.product(id)?.clone();
    // The join key is the name the invoices currently carry, captured before
    // the edit lands.
    let prior_name = product.name.clone();
    product.set(field, value.clone());

    let errors = validate_product(&product);
    product.validation_errors = errors.clone();
    store.update_product(id, product.clone())?;

    let mut propagated = 0;
    if field == ProductField::Name {
        for invoice_id in store.invoice_ids_with_product(&prior_name) {
            let mut invoice = store.invoice(invoice_id)?.clone();
            invoice.product_name = value.clone();
            invoice.quantity = product.quantity.clone();
            invoice.tax_percent = product.tax_percent.clone();
            invoice.price_with_tax = product.price_with_tax.clone();
            store.update_invoice(invoice_id, invoice)?;
            propagated += 1;
        }
        debug!(%id, propagated, "renamed product across invoices");
    }

    Ok(EditOutcome { errors, propagated })
}

fn edit_customer(
    store: &mut DataStore,
    id: RecordId,
    field: CustomerField,
    value: String,
) -> Result<EditOutcome, StoreError> {
    let mut customer = store.customer(id)?.clone();
    let prior_name = customer.customer_name.clone();
    customer.set(field, value.clone());

    let errors = validate_customer(&customer);
    customer.validation_errors = errors.clone();
    store.update_customer(id, customer.clone())?;

    let mut propagated = 0;
    if field == CustomerField::CustomerName {
        for invoice_id in store.invoice_ids_with_customer(&prior_name) {
            let mut invoice = store.invoice(invoice_id)?.clone();
            invoice.customer_name = value.clone();
            invoice.phone_number = customer.phone_number.clone();
            invoice.company_name = customer.company_name.clone().unwrap_or_default();
            store.update_invoice(invoice_id, invoice)?;
            propagated += 1;
        }
        debug!(%id, propagated, "renamed customer across invoices");
    }

    Ok(EditOutcome { errors, propagated })
}
