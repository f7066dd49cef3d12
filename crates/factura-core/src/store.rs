//! Identity-addressed, order-preserving record collections.
//!
//! Records are addressed by a stable synthetic [`RecordId`] assigned at
//! insertion, so outstanding references survive edits elsewhere in the
//! collection. Insertion order is preserved for display.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::models::{Customer, ExtractionPayload, FieldError, Invoice, Product};

/// Stable synthetic identifier for a record within one collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(u64);

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Records that carry an attached validation error list.
pub trait ErrorCarrier {
    fn set_validation_errors(&mut self, errors: Vec<FieldError>);
}

impl ErrorCarrier for Invoice {
    fn set_validation_errors(&mut self, errors: Vec<FieldError>) {
        self.validation_errors = errors;
    }
}

impl ErrorCarrier for Product {
    fn set_validation_errors(&mut self, errors: Vec<FieldError>) {
        self.validation_errors = errors;
    }
}

impl ErrorCarrier for Customer {
    fn set_validation_errors(&mut self, errors: Vec<FieldError>) {
        self.validation_errors = errors;
    }
}

/// A record paired with its id, the shape served by the read endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct Keyed<T> {
    pub id: RecordId,
    #[serde(flatten)]
    pub record: T,
}

/// An insertion-ordered collection addressed by stable record ids.
#[derive(Debug, Clone)]
pub struct Collection<T> {
    label: &'static str,
    next_id: u64,
    records: IndexMap<RecordId, T>,
}

impl<T> Collection<T> {
    fn new(label: &'static str) -> Self {
        Self {
            label,
            next_id: 0,
            records: IndexMap::new(),
        }
    }

    /// Replace the whole collection; ids are reassigned.
    pub fn load(&mut self, records: Vec<T>) {
        self.records.clear();
        for record in records {
            self.insert(record);
        }
    }

    /// Append a record, assigning it a fresh id.
    pub fn insert(&mut self, record: T) -> RecordId {
        let id = RecordId(self.next_id);
        self.next_id += 1;
        self.records.insert(id, record);
        id
    }

    /// Look up a record by id.
    pub fn get(&self, id: RecordId) -> Result<&T, StoreError> {
        self.records.get(&id).ok_or(StoreError::UnknownRecord {
            collection: self.label,
            id,
        })
    }

    /// Overwrite a record in place, keeping its id and position.
    pub fn update(&mut self, id: RecordId, record: T) -> Result<(), StoreError> {
        let slot = self.records.get_mut(&id).ok_or(StoreError::UnknownRecord {
            collection: self.label,
            id,
        })?;
        *slot = record;
        Ok(())
    }

    /// Remove all records. Ids are not reused afterwards.
    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate records in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (RecordId, &T)> {
        self.records.iter().map(|(id, record)| (*id, record))
    }
}

impl<T: ErrorCarrier> Collection<T> {
    /// Attach a validation error list to a record.
    pub fn attach_errors(
        &mut self,
        id: RecordId,
        errors: Vec<FieldError>,
    ) -> Result<(), StoreError> {
        let record = self.records.get_mut(&id).ok_or(StoreError::UnknownRecord {
            collection: self.label,
            id,
        })?;
        record.set_validation_errors(errors);
        Ok(())
    }
}

impl<T: Clone> Collection<T> {
    fn keyed(&self) -> Vec<Keyed<T>> {
        self.records
            .iter()
            .map(|(id, record)| Keyed {
                id: *id,
                record: record.clone(),
            })
            .collect()
    }
}

/// Snapshot of all three collections with record ids.
#[derive(Debug, Clone, Serialize)]
pub struct StoreSnapshot {
    pub invoices: Vec<Keyed<Invoice>>,
    pub products: Vec<Keyed<Product>>,
    pub customers: Vec<Keyed<Customer>>,
}

/// The three record collections plus cross-set lookups by shared key.
///
/// Relationships are name-based joins, not foreign keys; nothing here
/// enforces referential integrity. Consistency across collections is the
/// [reconciliation](crate::reconcile) layer's job.
#[derive(Debug, Clone)]
pub struct DataStore {
    invoices: Collection<Invoice>,
    products: Collection<Product>,
    customers: Collection<Customer>,
}

impl DataStore {
    pub fn new() -> Self {
        Self {
            invoices: Collection::new("invoice"),
            products: Collection::new("product"),
            customers: Collection::new("customer"),
        }
    }

    /// Bulk-replace all three collections from an extraction payload.
    pub fn load_extraction(&mut self, payload: ExtractionPayload) {
        self.invoices.load(payload.invoices);
        self.products.load(payload.products);
        self.customers.load(payload.customers);
    }

    /// Clear all three collections.
    pub fn clear_all(&mut self) {
        self.invoices.clear();
        self.products.clear();
        self.customers.clear();
    }

    /// Snapshot all collections for the read endpoint.
    pub fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            invoices: self.invoices.keyed(),
            products: self.products.keyed(),
            customers: self.customers.keyed(),
        }
    }

    pub fn invoices(&self) -> &Collection<Invoice> {
        &self.invoices
    }

    pub fn products(&self) -> &Collection<Product> {
        &self.products
    }

    pub fn customers(&self) -> &Collection<Customer> {
        &self.customers
    }

    pub fn invoice(&self, id: RecordId) -> Result<&Invoice, StoreError> {
        self.invoices.get(id)
    }

    pub fn product(&self, id: RecordId) -> Result<&Product, StoreError> {
        self.products.get(id)
    }

    pub fn customer(&self, id: RecordId) -> Result<&Customer, StoreError> {
        self.customers.get(id)
    }

    pub fn update_invoice(&mut self, id: RecordId, invoice: Invoice) -> Result<(), StoreError> {
        self.invoices.update(id, invoice)
    }

    pub fn update_product(&mut self, id: RecordId, product: Product) -> Result<(), StoreError> {
        self.products.update(id, product)
    }

    pub fn update_customer(&mut self, id: RecordId, customer: Customer) -> Result<(), StoreError> {
        self.customers.update(id, customer)
    }

    pub fn attach_invoice_errors(
        &mut self,
        id: RecordId,
        errors: Vec<FieldError>,
    ) -> Result<(), StoreError> {
        self.invoices.attach_errors(id, errors)
    }

    pub fn attach_product_errors(
        &mut self,
        id: RecordId,
        errors: Vec<FieldError>,
    ) -> Result<(), StoreError> {
        self.products.attach_errors(id, errors)
    }

    pub fn attach_customer_errors(
        &mut self,
        id: RecordId,
        errors: Vec<FieldError>,
    ) -> Result<(), StoreError> {
        self.customers.attach_errors(id, errors)
    }

    /// Find the catalog entry with the given product name, if any.
    pub fn product_id_by_name(&self, name: &str) -> Option<RecordId> {
        self.products
            .iter()
            .find(|(_, product)| product.name == name)
            .map(|(id, _)| id)
    }

    /// Ids of all invoices whose product name equals `name`.
    pub fn invoice_ids_with_product(&self, name: &str) -> Vec<RecordId> {
        self.invoices
            .iter()
            .filter(|(_, invoice)| invoice.product_name == name)
            .map(|(id, _)| id)
            .collect()
    }

    /// Ids of all invoices whose customer name equals `name`.
    pub fn invoice_ids_with_customer(&self, name: &str) -> Vec<RecordId> {
        self.invoices
            .iter()
            .filter(|(_, invoice)| invoice.customer_name == name)
            .map(|(id, _)| id)
            .collect()
    }
}

impl Default for DataStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn invoice(serial: &str, product: &str) -> Invoice {
        Invoice {
            serial_number: serial.to_string(),
            product_name: product.to_string(),
            ..Invoice::default()
        }
    }

    #[test]
    fn ids_are_stable_across_unrelated_updates() {
        let mut store = DataStore::new();
        store.load_extraction(ExtractionPayload {
            invoices: vec![invoice("INV-1", "Gems"), invoice("INV-2", "Widget")],
            ..ExtractionPayload::default()
        });

        let ids: Vec<RecordId> = store.invoices().iter().map(|(id, _)| id).collect();
        store
            .update_invoice(ids[0], invoice("INV-1b", "Gems"))
            .unwrap();

        // The second record is still reachable under its original id.
        assert_eq!(store.invoice(ids[1]).unwrap().serial_number, "INV-2");
        assert_eq!(store.invoice(ids[0]).unwrap().serial_number, "INV-1b");
    }

    #[test]
    fn unknown_ids_are_reported_with_collection_name() {
        let mut store = DataStore::new();
        let id = {
            store.load_extraction(ExtractionPayload {
                invoices: vec![invoice("INV-1", "Gems")],
                ..ExtractionPayload::default()
            });
            store.invoices().iter().next().unwrap().0
        };
        store.clear_all();

        let err = store.update_invoice(id, invoice("INV-1", "Gems")).unwrap_err();
        assert_eq!(err.to_string(), format!("no invoice record with id {id}"));
    }

    #[test]
    fn bulk_load_replaces_wholesale() {
        let mut store = DataStore::new();
        store.load_extraction(ExtractionPayload {
            invoices: vec![invoice("INV-1", "Gems")],
            ..ExtractionPayload::default()
        });
        store.load_extraction(ExtractionPayload {
            invoices: vec![invoice("INV-9", "Widget"), invoice("INV-10", "Widget")],
            ..ExtractionPayload::default()
        });

        assert_eq!(store.invoices().len(), 2);
        let serials: Vec<&str> = store
            .invoices()
            .iter()
            .map(|(_, inv)| inv.serial_number.as_str())
            .collect();
        assert_eq!(serials, vec!["INV-9", "INV-10"]);
    }

    #[test]
    fn attach_errors_updates_the_record_in_place() {
        let mut store = DataStore::new();
        store.load_extraction(ExtractionPayload {
            products: vec![Product {
                name: "Gems".to_string(),
                ..Product::default()
            }],
            ..ExtractionPayload::default()
        });
        let id = store.products().iter().next().unwrap().0;

        store
            .attach_product_errors(
                id,
                vec![FieldError {
                    field: "quantity".to_string(),
                    message: "Quantity must be a positive number".to_string(),
                }],
            )
            .unwrap();

        assert_eq!(store.product(id).unwrap().validation_errors.len(), 1);
    }

    #[test]
    fn cross_set_lookups_match_by_name() {
        let mut store = DataStore::new();
        store.load_extraction(ExtractionPayload {
            invoices: vec![
                invoice("INV-1", "Widget"),
                invoice("INV-2", "Gadget"),
                invoice("INV-3", "Widget"),
            ],
            products: vec![Product {
                name: "Widget".to_string(),
                ..Product::default()
            }],
            ..ExtractionPayload::default()
        });

        assert!(store.product_id_by_name("Widget").is_some());
        assert!(store.product_id_by_name("Gizmo").is_none());
        assert_eq!(store.invoice_ids_with_product("Widget").len(), 2);
        assert_eq!(store.invoice_ids_with_customer("nobody").len(), 0);
    }

    #[test]
    fn snapshot_flattens_records_with_ids() {
        let mut store = DataStore::new();
        store.load_extraction(ExtractionPayload {
            invoices: vec![invoice("INV-1", "Gems")],
            ..ExtractionPayload::default()
        });

        let value = serde_json::to_value(store.snapshot()).unwrap();
        assert_eq!(value["invoices"][0]["serialNumber"], "INV-1");
        assert!(value["invoices"][0]["id"].is_number());
    }
}
