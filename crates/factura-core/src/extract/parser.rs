//! Parsing of raw model output into the structured record sets.

use tracing::warn;

use crate::models::{DegradedOutput, ExtractionOutcome, ExtractionPayload};

/// Remove Markdown code-fence tokens wherever they appear and trim the rest.
///
/// Idempotent: cleaning an already-clean string is a no-op.
pub fn strip_fences(raw: &str) -> String {
    raw.replace("```json", "").replace("```", "").trim().to_string()
}

/// Decode model output into an [`ExtractionPayload`].
///
/// Decode failure never escapes to the caller: malformed output degrades
/// into a payload carrying the cleaned text so the user can recover the data
/// manually.
pub fn parse_response(raw: &str) -> ExtractionOutcome {
    let cleaned = strip_fences(raw);
    match serde_json::from_str::<ExtractionPayload>(&cleaned) {
        Ok(payload) => ExtractionOutcome::Parsed(payload),
        Err(err) => {
            warn!(%err, "model output was not valid JSON, returning degraded result");
            ExtractionOutcome::Degraded(DegradedOutput {
                error: "Failed to parse JSON".to_string(),
                raw: cleaned,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const PAYLOAD: &str = r#"{
        "invoices": [{"serialNumber": "INV-1", "customerName": "Shounak"}],
        "products": [{"name": "Gems", "quantity": "100"}],
        "customers": [{"customerName": "Shounak", "phoneNumber": "9999999999"}],
        "missing_fields": ["taxPercent"]
    }"#;

    #[test]
    fn strips_zero_one_or_many_fences() {
        let clean = "{\"invoices\": []}";
        assert_eq!(strip_fences(clean), clean);
        assert_eq!(strip_fences("```json\n{\"invoices\": []}\n```"), clean);
        assert_eq!(
            strip_fences("```json\n```json\n{\"invoices\": []}\n```\n```"),
            clean
        );
        // Fences in the middle of the string are removed too.
        assert_eq!(strip_fences("{\"invoices\"```: []}"), clean);
    }

    #[test]
    fn cleaning_is_idempotent() {
        let once = strip_fences("```json\n{\"a\": 1}\n```");
        assert_eq!(strip_fences(&once), once);
    }

    #[test]
    fn parses_fenced_payload() {
        let fenced = format!("```json\n{PAYLOAD}\n```");
        match parse_response(&fenced) {
            ExtractionOutcome::Parsed(payload) => {
                assert_eq!(payload.invoices.len(), 1);
                assert_eq!(payload.invoices[0].serial_number, "INV-1");
                assert_eq!(payload.products[0].name, "Gems");
                assert_eq!(payload.missing_fields, vec!["taxPercent"]);
            }
            other => panic!("expected parsed outcome, got {other:?}"),
        }
    }

    #[test]
    fn degrades_instead_of_failing_on_invalid_json() {
        let outcome = parse_response("```json\nSorry, I could not read the file.\n```");
        match outcome {
            ExtractionOutcome::Degraded(degraded) => {
                assert_eq!(degraded.error, "Failed to parse JSON");
                assert_eq!(degraded.raw, "Sorry, I could not read the file.");
            }
            other => panic!("expected degraded outcome, got {other:?}"),
        }
    }
}
