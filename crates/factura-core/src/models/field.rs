//! Closed field identifiers with total get/set mappings.
//!
//! Edits address fields through these enums rather than caller-supplied
//! strings, so an unknown field name is unrepresentable past the API
//! boundary.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::record::{Customer, Invoice, Product};

/// Editable fields of an [`Invoice`] record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InvoiceField {
    SerialNumber,
    InvoiceDate,
    CustomerName,
    ProductName,
    Quantity,
    TaxPercent,
    PriceWithTax,
    TotalAmount,
    CompanyName,
    PhoneNumber,
}

impl InvoiceField {
    /// Wire-form name of the field.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SerialNumber => "serialNumber",
            Self::InvoiceDate => "invoiceDate",
            Self::CustomerName => "customerName",
            Self::ProductName => "productName",
            Self::Quantity => "quantity",
            Self::TaxPercent => "taxPercent",
            Self::PriceWithTax => "priceWithTax",
            Self::TotalAmount => "totalAmount",
            Self::CompanyName => "companyName",
            Self::PhoneNumber => "phoneNumber",
        }
    }
}

impl fmt::Display for InvoiceField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Editable fields of a [`Product`] record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProductField {
    Name,
    Quantity,
    UnitPrice,
    TaxPercent,
    PriceWithTax,
    Discount,
}

impl ProductField {
    /// Wire-form name of the field.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Quantity => "quantity",
            Self::UnitPrice => "unitPrice",
            Self::TaxPercent => "taxPercent",
            Self::PriceWithTax => "priceWithTax",
            Self::Discount => "discount",
        }
    }
}

impl fmt::Display for ProductField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Editable fields of a [`Customer`] record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CustomerField {
    CustomerName,
    PhoneNumber,
    CompanyName,
    TotalPurchaseAmount,
}

impl CustomerField {
    /// Wire-form name of the field.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CustomerName => "customerName",
            Self::PhoneNumber => "phoneNumber",
            Self::CompanyName => "companyName",
            Self::TotalPurchaseAmount => "totalPurchaseAmount",
        }
    }
}

impl fmt::Display for CustomerField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Invoice {
    /// Read a field value.
    pub fn get(&self, field: InvoiceField) -> &str {
        match field {
            InvoiceField::SerialNumber => &self.serial_number,
            InvoiceField::InvoiceDate => &self.invoice_date,
            InvoiceField::CustomerName => &self.customer_name,
            InvoiceField::ProductName => &self.product_name,
            InvoiceField::Quantity => &self.quantity,
            InvoiceField::TaxPercent => &self.tax_percent,
            InvoiceField::PriceWithTax => &self.price_with_tax,
            InvoiceField::TotalAmount => &self.total_amount,
            InvoiceField::CompanyName => &self.company_name,
            InvoiceField::PhoneNumber => &self.phone_number,
        }
    }

    /// Overwrite a field value.
    pub fn set(&mut self, field: InvoiceField, value: String) {
        match field {
            InvoiceField::SerialNumber => self.serial_number = value,
            InvoiceField::InvoiceDate => self.invoice_date = value,
            InvoiceField::CustomerName => self.customer_name = value,
            InvoiceField::ProductName => self.product_name = value,
            InvoiceField::Quantity => self.quantity = value,
            InvoiceField::TaxPercent => self.tax_percent = value,
            InvoiceField::PriceWithTax => self.price_with_tax = value,
            InvoiceField::TotalAmount => self.total_amount = value,
            InvoiceField::CompanyName => self.company_name = value,
            InvoiceField::PhoneNumber => self.phone_number = value,
        }
    }
}

impl Product {
    /// Read a field value; optional fields read as empty when unset.
    pub fn get(&self, field: ProductField) -> &str {
        match field {
            ProductField::Name => &self.name,
            ProductField::Quantity => &self.quantity,
            ProductField::UnitPrice => &self.unit_price,
            ProductField::TaxPercent => &self.tax_percent,
            ProductField::PriceWithTax => &self.price_with_tax,
            ProductField::Discount => self.discount.as_deref().unwrap_or(""),
        }
    }

    /// Overwrite a field value; a blank discount clears it.
    pub fn set(&mut self, field: ProductField, value: String) {
        match field {
            ProductField::Name => self.name = value,
            ProductField::Quantity => self.quantity = value,
            ProductField::UnitPrice => self.unit_price = value,
            ProductField::TaxPercent => self.tax_percent = value,
            ProductField::PriceWithTax => self.price_with_tax = value,
            ProductField::Discount => {
                self.discount = if value.trim().is_empty() {
                    None
                } else {
                    Some(value)
                }
            }
        }
    }
}

impl Customer {
    /// Read a field value; optional fields read as empty when unset.
    pub fn get(&self, field: CustomerField) -> &str {
        match field {
            CustomerField::CustomerName => &self.customer_name,
            CustomerField::PhoneNumber => &self.phone_number,
            CustomerField::CompanyName => self.company_name.as_deref().unwrap_or(""),
            CustomerField::TotalPurchaseAmount => &self.total_purchase_amount,
        }
    }

    /// Overwrite a field value; a blank company name clears it.
    pub fn set(&mut self, field: CustomerField, value: String) {
        match field {
            CustomerField::CustomerName => self.customer_name = value,
            CustomerField::PhoneNumber => self.phone_number = value,
            CustomerField::CompanyName => {
                self.company_name = if value.trim().is_empty() {
                    None
                } else {
                    Some(value)
                }
            }
            CustomerField::TotalPurchaseAmount => self.total_purchase_amount = value,
        }
    }
}
