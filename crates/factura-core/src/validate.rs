//! Pure per-entity validation rules.
//!
//! Validation is advisory: errors are attached to records for display but
//! never block a write to the store. Rules are re-evaluated on every edit.

use crate::models::{
    Customer, CustomerField, FieldError, Invoice, InvoiceField, Product, ProductField,
};

/// Validate an invoice record, returning field-scoped errors in rule order.
pub fn validate_invoice(invoice: &Invoice) -> Vec<FieldError> {
    let mut errors = Vec::new();

    require(
        &mut errors,
        InvoiceField::SerialNumber.as_str(),
        &invoice.serial_number,
        "Serial number is required",
    );
    require(
        &mut errors,
        InvoiceField::InvoiceDate.as_str(),
        &invoice.invoice_date,
        "Invoice date is required",
    );
    require(
        &mut errors,
        InvoiceField::CustomerName.as_str(),
        &invoice.customer_name,
        "Customer name is required",
    );
    require(
        &mut errors,
        InvoiceField::ProductName.as_str(),
        &invoice.product_name,
        "Product name is required",
    );
    positive_number(
        &mut errors,
        InvoiceField::Quantity.as_str(),
        &invoice.quantity,
        "Quantity must be a positive number",
    );
    non_negative_number(
        &mut errors,
        InvoiceField::TaxPercent.as_str(),
        &invoice.tax_percent,
        "Tax percent must be non-negative",
    );

    errors
}

/// Validate a product record.
pub fn validate_product(product: &Product) -> Vec<FieldError> {
    let mut errors = Vec::new();

    require(
        &mut errors,
        ProductField::Name.as_str(),
        &product.name,
        "Product name is required",
    );
    positive_number(
        &mut errors,
        ProductField::Quantity.as_str(),
        &product.quantity,
        "Quantity must be a positive number",
    );
    non_negative_number(
        &mut errors,
        ProductField::UnitPrice.as_str(),
        &product.unit_price,
        "Unit price must be non-negative",
    );

    errors
}

/// Validate a customer record.
pub fn validate_customer(customer: &Customer) -> Vec<FieldError> {
    let mut errors = Vec::new();

    require(
        &mut errors,
        CustomerField::CustomerName.as_str(),
        &customer.customer_name,
        "Customer name is required",
    );
    require(
        &mut errors,
        CustomerField::PhoneNumber.as_str(),
        &customer.phone_number,
        "Phone number is required",
    );

    errors
}

fn require(errors: &mut Vec<FieldError>, field: &str, value: &str, message: &str) {
    if value.trim().is_empty() {
        errors.push(FieldError {
            field: field.to_string(),
            message: message.to_string(),
        });
    }
}

fn positive_number(errors: &mut Vec<FieldError>, field: &str, value: &str, message: &str) {
    match value.trim().parse::<f64>() {
        Ok(parsed) if parsed > 0.0 => {}
        _ => errors.push(FieldError {
            field: field.to_string(),
            message: message.to_string(),
        }),
    }
}

fn non_negative_number(errors: &mut Vec<FieldError>, field: &str, value: &str, message: &str) {
    match value.trim().parse::<f64>() {
        Ok(parsed) if parsed >= 0.0 => {}
        _ => errors.push(FieldError {
            field: field.to_string(),
            message: message.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn valid_invoice() -> Invoice {
        Invoice {
            serial_number: "INV-001".to_string(),
            invoice_date: "2024-11-12".to_string(),
            customer_name: "Shounak".to_string(),
            product_name: "Gems".to_string(),
            quantity: "5".to_string(),
            tax_percent: "18".to_string(),
            ..Invoice::default()
        }
    }

    #[test]
    fn valid_invoice_has_no_errors() {
        assert_eq!(validate_invoice(&valid_invoice()), Vec::new());
    }

    #[test]
    fn negative_quantity_yields_exactly_one_error_on_quantity() {
        let invoice = Invoice {
            quantity: "-1".to_string(),
            ..valid_invoice()
        };

        let errors = validate_invoice(&invoice);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "quantity");
    }

    #[test]
    fn non_numeric_values_error_instead_of_panicking() {
        let invoice = Invoice {
            quantity: "a few".to_string(),
            tax_percent: "lots".to_string(),
            ..valid_invoice()
        };

        let errors = validate_invoice(&invoice);
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["quantity", "taxPercent"]);
    }

    #[test]
    fn blank_required_fields_are_reported_after_trim() {
        let invoice = Invoice {
            serial_number: "   ".to_string(),
            ..valid_invoice()
        };

        let errors = validate_invoice(&invoice);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "serialNumber");
        assert_eq!(errors[0].message, "Serial number is required");
    }

    #[test]
    fn zero_tax_is_valid_but_zero_quantity_is_not() {
        let invoice = Invoice {
            quantity: "0".to_string(),
            tax_percent: "0".to_string(),
            ..valid_invoice()
        };

        let errors = validate_invoice(&invoice);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "quantity");
    }

    #[test]
    fn product_rules_cover_name_quantity_and_price() {
        let product = Product {
            name: String::new(),
            quantity: "0".to_string(),
            unit_price: "-2".to_string(),
            ..Product::default()
        };

        let fields: Vec<String> = validate_product(&product)
            .into_iter()
            .map(|e| e.field)
            .collect();
        assert_eq!(fields, vec!["name", "quantity", "unitPrice"]);
    }

    #[test]
    fn customer_requires_name_and_phone() {
        let customer = Customer::default();
        let fields: Vec<String> = validate_customer(&customer)
            .into_iter()
            .map(|e| e.field)
            .collect();
        assert_eq!(fields, vec!["customerName", "phoneNumber"]);
    }
}
