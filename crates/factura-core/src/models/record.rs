//! Record types produced by extraction and edited by the user.
//!
//! All business values are kept as display strings so the original document
//! formatting survives the round trip through editing. Numeric rules are
//! applied at validation time, not at decode time.

use serde::{Deserialize, Serialize};

/// A single field-scoped validation error attached to a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Field identifier in wire form (camelCase).
    pub field: String,
    pub message: String,
}

/// One product line of one source invoice.
///
/// A multi-line invoice decomposes into N records sharing the serial number,
/// customer name, and grand total.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Invoice {
    #[serde(deserialize_with = "de::display_string")]
    pub serial_number: String,
    #[serde(deserialize_with = "de::display_string")]
    pub invoice_date: String,
    #[serde(deserialize_with = "de::display_string")]
    pub customer_name: String,
    #[serde(deserialize_with = "de::display_string")]
    pub product_name: String,
    #[serde(deserialize_with = "de::display_string")]
    pub quantity: String,
    #[serde(deserialize_with = "de::display_string")]
    pub tax_percent: String,
    #[serde(deserialize_with = "de::display_string")]
    pub price_with_tax: String,
    #[serde(deserialize_with = "de::display_string")]
    pub total_amount: String,
    #[serde(deserialize_with = "de::display_string")]
    pub company_name: String,
    #[serde(deserialize_with = "de::display_string")]
    pub phone_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub validation_errors: Vec<FieldError>,
}

/// A deduplicated catalog entry.
///
/// Deduplication (quantity summing, max unit price) is enforced upstream by
/// the extraction instructions, not by pipeline code.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Product {
    #[serde(deserialize_with = "de::display_string")]
    pub name: String,
    #[serde(deserialize_with = "de::display_string")]
    pub quantity: String,
    #[serde(deserialize_with = "de::display_string")]
    pub unit_price: String,
    #[serde(deserialize_with = "de::display_string")]
    pub tax_percent: String,
    #[serde(deserialize_with = "de::display_string")]
    pub price_with_tax: String,
    #[serde(deserialize_with = "de::opt_display_string")]
    pub discount: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub validation_errors: Vec<FieldError>,
}

/// One deduplicated entry per distinct customer name, with purchase amounts
/// summed across that customer's invoices.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Customer {
    #[serde(deserialize_with = "de::display_string")]
    pub customer_name: String,
    #[serde(deserialize_with = "de::display_string")]
    pub phone_number: String,
    #[serde(deserialize_with = "de::opt_display_string")]
    pub company_name: Option<String>,
    #[serde(deserialize_with = "de::display_string")]
    pub total_purchase_amount: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub validation_errors: Vec<FieldError>,
}

/// The structured result of a successful extraction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionPayload {
    pub invoices: Vec<Invoice>,
    pub products: Vec<Product>,
    pub customers: Vec<Customer>,
    pub missing_fields: Vec<String>,
}

/// Fallback payload when model output cannot be decoded; carries the cleaned
/// raw text so the user can still recover data manually.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DegradedOutput {
    pub error: String,
    pub raw: String,
}

/// Result of one extraction request, serialized as either the structured or
/// the degraded shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ExtractionOutcome {
    Parsed(ExtractionPayload),
    Degraded(DegradedOutput),
}

/// Lenient deserializers for model-produced values: the model is instructed
/// to emit strings but may emit null or bare numbers for missing or numeric
/// fields.
mod de {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    pub fn display_string<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(opt_display_string(deserializer)?.unwrap_or_default())
    }

    pub fn opt_display_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(match value {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s),
            Some(other) => Some(other.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn invoice_roundtrips_camel_case_keys() {
        let json = r#"{
            "serialNumber": "INV-001",
            "invoiceDate": "2024-11-12",
            "customerName": "Shounak",
            "productName": "Gems",
            "quantity": "100",
            "taxPercent": "18",
            "priceWithTax": "1180.00",
            "totalAmount": "3540.00",
            "companyName": "ACME",
            "phoneNumber": "9999999999"
        }"#;

        let invoice: Invoice = serde_json::from_str(json).unwrap();
        assert_eq!(invoice.serial_number, "INV-001");
        assert_eq!(invoice.tax_percent, "18");
        assert!(invoice.validation_errors.is_empty());

        let value = serde_json::to_value(&invoice).unwrap();
        assert_eq!(value["priceWithTax"], "1180.00");
        // Empty error lists stay off the wire.
        assert!(value.get("validationErrors").is_none());
    }

    #[test]
    fn null_and_numeric_values_decode_as_display_strings() {
        let product: Product = serde_json::from_str(
            r#"{"name": "Gems", "quantity": 100, "unitPrice": 11.8, "discount": null}"#,
        )
        .unwrap();
        assert_eq!(product.quantity, "100");
        assert_eq!(product.unit_price, "11.8");
        assert_eq!(product.discount, None);

        let customer: Customer =
            serde_json::from_str(r#"{"customerName": "Shounak", "companyName": null}"#).unwrap();
        assert_eq!(customer.company_name, None);
        assert_eq!(customer.phone_number, "");
    }

    #[test]
    fn outcome_serializes_both_shapes() {
        let parsed = ExtractionOutcome::Parsed(ExtractionPayload::default());
        let value = serde_json::to_value(&parsed).unwrap();
        assert_eq!(value["invoices"], serde_json::json!([]));
        assert_eq!(value["missing_fields"], serde_json::json!([]));

        let degraded = ExtractionOutcome::Degraded(DegradedOutput {
            error: "Failed to parse JSON".to_string(),
            raw: "not json".to_string(),
        });
        let value = serde_json::to_value(&degraded).unwrap();
        assert_eq!(value["error"], "Failed to parse JSON");
        assert_eq!(value["raw"], "not json");
    }
}
