//! HTTP client for the Gemini file and generation APIs.
//!
//! Binary documents are uploaded through the file API, polled until the
//! service marks them active, and then referenced by URI in a single
//! `generateContent` call alongside any inline text segments.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::InferenceError;
use crate::model::{AssetRef, ContentPart, RemoteModel};
use crate::Result;

/// Default API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Default model identifier used for extraction.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);
const DEFAULT_MAX_POLL_ATTEMPTS: u32 = 300;

/// Processing state of a remote file asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssetState {
    StateUnspecified,
    /// The service is still ingesting the asset; it cannot be referenced yet.
    Processing,
    /// Terminal ready state.
    Active,
    /// Terminal failure state.
    Failed,
    #[serde(other)]
    Unknown,
}

/// Descriptor of an uploaded file as reported by the service.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteFile {
    /// Server-assigned resource name (`files/...`), used for status lookups.
    pub name: String,
    #[serde(default)]
    pub display_name: Option<String>,
    /// Locator referenced in generation calls.
    pub uri: String,
    pub mime_type: String,
    pub state: AssetState,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    file: RemoteFile,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<WireContent<'a>>,
}

#[derive(Serialize)]
struct WireContent<'a> {
    parts: Vec<WirePart<'a>>,
}

#[derive(Serialize)]
struct WirePart<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<&'a str>,
    #[serde(rename = "fileData", skip_serializing_if = "Option::is_none")]
    file_data: Option<WireFileData<'a>>,
}

#[derive(Serialize)]
struct WireFileData<'a> {
    #[serde(rename = "fileUri")]
    file_uri: &'a str,
    #[serde(rename = "mimeType")]
    mime_type: &'a str,
}

impl<'a> From<&'a ContentPart> for WirePart<'a> {
    fn from(part: &'a ContentPart) -> Self {
        match part {
            ContentPart::Text(text) => WirePart {
                text: Some(text),
                file_data: None,
            },
            ContentPart::FileRef { uri, mime_type } => WirePart {
                text: None,
                file_data: Some(WireFileData {
                    file_uri: uri,
                    mime_type,
                }),
            },
        }
    }
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

/// Client for a Gemini-compatible inference endpoint.
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
    poll_interval: Duration,
    max_poll_attempts: u32,
}

impl GeminiClient {
    /// Create a client with default endpoint, model, and polling settings.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            poll_interval: DEFAULT_POLL_INTERVAL,
            max_poll_attempts: DEFAULT_MAX_POLL_ATTEMPTS,
        }
    }

    /// Set the model identifier.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the API base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the interval between asset status checks.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Set the maximum number of status checks before giving up on an asset.
    pub fn with_max_poll_attempts(mut self, attempts: u32) -> Self {
        self.max_poll_attempts = attempts;
        self
    }

    /// Upload binary content to the file API.
    ///
    /// The returned descriptor may still be in the `Processing` state; pass
    /// it to [`wait_until_active`](Self::wait_until_active) before
    /// referencing it in a generation call.
    pub async fn upload_file(
        &self,
        bytes: Vec<u8>,
        mime_type: &str,
        display_name: &str,
    ) -> Result<RemoteFile> {
        let metadata = serde_json::json!({ "file": { "display_name": display_name } });
        let form = Form::new()
            .part(
                "metadata",
                Part::text(metadata.to_string()).mime_str("application/json")?,
            )
            .part(
                "file",
                Part::bytes(bytes)
                    .file_name(display_name.to_string())
                    .mime_str(mime_type)?,
            );

        let response = self
            .http
            .post(format!("{}/upload/v1beta/files", self.base_url))
            .query(&[("key", self.api_key.as_str())])
            .header("X-Goog-Upload-Protocol", "multipart")
            .multipart(form)
            .send()
            .await?;
        let body: UploadResponse = check_status(response).await?.json().await?;

        debug!(name = %body.file.name, state = ?body.file.state, "uploaded asset");
        Ok(body.file)
    }

    /// Fetch the current descriptor of an uploaded file by resource name.
    pub async fn fetch_file(&self, name: &str) -> Result<RemoteFile> {
        let response = self
            .http
            .get(format!("{}/v1beta/{}", self.base_url, name))
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await?;
        Ok(check_status(response).await?.json().await?)
    }

    /// Poll the file API until the asset leaves the `Processing` state.
    ///
    /// Checks are spaced by the configured poll interval and capped at the
    /// configured attempt count; an asset still processing at the cap yields
    /// [`InferenceError::AssetTimeout`].
    pub async fn wait_until_active(&self, file: RemoteFile) -> Result<RemoteFile> {
        poll_until_ready(
            file,
            self.poll_interval,
            self.max_poll_attempts,
            |name| async move { self.fetch_file(&name).await },
        )
        .await
    }

    /// Run one generation call over the content sequence and return the
    /// concatenated text of the first candidate.
    pub async fn generate_content(&self, parts: &[ContentPart]) -> Result<String> {
        let request = GenerateRequest {
            contents: vec![WireContent {
                parts: parts.iter().map(WirePart::from).collect(),
            }],
        };

        let response = self
            .http
            .post(format!(
                "{}/v1beta/models/{}:generateContent",
                self.base_url, self.model
            ))
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await?;
        let body: GenerateResponse = check_status(response).await?.json().await?;

        let text: String = body
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|part| part.text)
                    .collect()
            })
            .unwrap_or_default();

        if text.is_empty() {
            return Err(InferenceError::EmptyResponse);
        }
        Ok(text)
    }
}

#[async_trait]
impl RemoteModel for GeminiClient {
    async fn upload_asset(
        &self,
        bytes: Vec<u8>,
        mime_type: &str,
        display_name: &str,
    ) -> Result<AssetRef> {
        let uploaded = self.upload_file(bytes, mime_type, display_name).await?;
        let ready = self.wait_until_active(uploaded).await?;
        Ok(AssetRef {
            uri: ready.uri,
            mime_type: ready.mime_type,
        })
    }

    async fn generate(&self, parts: &[ContentPart]) -> Result<String> {
        self.generate_content(parts).await
    }
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response.text().await.unwrap_or_else(|_| String::new());
    Err(InferenceError::Api {
        status: status.as_u16(),
        message,
    })
}

/// Re-fetch an asset descriptor at a fixed cadence while it is processing.
async fn poll_until_ready<F, Fut>(
    mut file: RemoteFile,
    interval: Duration,
    max_attempts: u32,
    mut fetch: F,
) -> Result<RemoteFile>
where
    F: FnMut(String) -> Fut,
    Fut: Future<Output = Result<RemoteFile>>,
{
    let mut attempts = 0;
    while file.state == AssetState::Processing {
        if attempts >= max_attempts {
            return Err(InferenceError::AssetTimeout {
                name: file.name,
                attempts,
            });
        }
        tokio::time::sleep(interval).await;
        file = fetch(file.name.clone()).await?;
        attempts += 1;
    }

    match file.state {
        AssetState::Failed => Err(InferenceError::AssetFailed { name: file.name }),
        _ => Ok(file),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::cell::Cell;

    fn remote_file(state: AssetState) -> RemoteFile {
        RemoteFile {
            name: "files/abc123".to_string(),
            display_name: Some("invoice.pdf".to_string()),
            uri: "https://example.com/files/abc123".to_string(),
            mime_type: "application/pdf".to_string(),
            state,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn poll_returns_immediately_when_active() {
        let calls = Cell::new(0u32);
        let result = poll_until_ready(
            remote_file(AssetState::Active),
            Duration::from_secs(1),
            10,
            |_| {
                calls.set(calls.get() + 1);
                async { Ok(remote_file(AssetState::Active)) }
            },
        )
        .await
        .unwrap();

        assert_eq!(result.state, AssetState::Active);
        assert_eq!(calls.get(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn poll_refetches_until_processing_ends() {
        let calls = Cell::new(0u32);
        let result = poll_until_ready(
            remote_file(AssetState::Processing),
            Duration::from_secs(1),
            10,
            |_| {
                calls.set(calls.get() + 1);
                let state = if calls.get() < 3 {
                    AssetState::Processing
                } else {
                    AssetState::Active
                };
                async move { Ok(remote_file(state)) }
            },
        )
        .await
        .unwrap();

        assert_eq!(result.state, AssetState::Active);
        assert_eq!(calls.get(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn poll_times_out_after_attempt_cap() {
        let err = poll_until_ready(
            remote_file(AssetState::Processing),
            Duration::from_secs(1),
            3,
            |_| async { Ok(remote_file(AssetState::Processing)) },
        )
        .await
        .unwrap_err();

        match err {
            InferenceError::AssetTimeout { name, attempts } => {
                assert_eq!(name, "files/abc123");
                assert_eq!(attempts, 3);
            }
            other => panic!("expected AssetTimeout, got {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn poll_reports_failed_assets() {
        let err = poll_until_ready(
            remote_file(AssetState::Processing),
            Duration::from_secs(1),
            10,
            |_| async { Ok(remote_file(AssetState::Failed)) },
        )
        .await
        .unwrap_err();

        assert!(matches!(err, InferenceError::AssetFailed { .. }));
    }

    #[test]
    fn remote_file_deserializes_service_shape() {
        let json = r#"{
            "name": "files/abc123",
            "displayName": "invoice.pdf",
            "uri": "https://example.com/files/abc123",
            "mimeType": "application/pdf",
            "state": "PROCESSING"
        }"#;

        let file: RemoteFile = serde_json::from_str(json).unwrap();
        assert_eq!(file.name, "files/abc123");
        assert_eq!(file.state, AssetState::Processing);
    }

    #[test]
    fn unknown_states_do_not_fail_deserialization() {
        let file: RemoteFile = serde_json::from_str(
            r#"{"name": "files/x", "uri": "u", "mimeType": "image/png", "state": "ARCHIVED"}"#,
        )
        .unwrap();
        assert_eq!(file.state, AssetState::Unknown);
    }

    #[test]
    fn wire_parts_serialize_text_and_file_refs() {
        let parts = [
            ContentPart::Text("extract everything".to_string()),
            ContentPart::FileRef {
                uri: "https://example.com/files/abc".to_string(),
                mime_type: "image/png".to_string(),
            },
        ];
        let request = GenerateRequest {
            contents: vec![WireContent {
                parts: parts.iter().map(WirePart::from).collect(),
            }],
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value["contents"][0]["parts"][0],
            serde_json::json!({ "text": "extract everything" })
        );
        assert_eq!(
            value["contents"][0]["parts"][1],
            serde_json::json!({
                "fileData": {
                    "fileUri": "https://example.com/files/abc",
                    "mimeType": "image/png"
                }
            })
        );
    }
}
