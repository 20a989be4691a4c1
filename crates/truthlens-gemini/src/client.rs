//! Gemini HTTP client.
//!
//! One `generateContent` call per invocation, credential in the
//! `x-goog-api-key` header. No retries; the only timeout is the HTTP
//! client's.

use std::time::Duration;

use async_trait::async_trait;
use base64::Engine;
use tracing::{debug, warn};

use truthlens_core::{
    ImagePayload, ModelGateway, ModelResponse, RemoteError, TruthLensConfig, TruthLensError,
    TruthLensResult,
};

use crate::wire::{Content, ErrorEnvelope, GenerateContentRequest, GenerateContentResponse, InlineData, Part};

/// Provider name reported to the orchestrator.
pub const PROVIDER: &str = "gemini";

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Gemini `generateContent` client.
#[derive(Clone)]
pub struct GeminiClient {
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl GeminiClient {
    /// Create a client for the given endpoint and credential.
    pub fn new(base_url: &str, api_key: &str, timeout: Duration) -> TruthLensResult<Self> {
        if api_key.trim().is_empty() {
            return Err(TruthLensError::config("Gemini API key is empty"));
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TruthLensError::config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            client,
        })
    }

    /// Create a client from loaded configuration.
    pub fn from_config(config: &TruthLensConfig) -> TruthLensResult<Self> {
        let api_key = config.require_api_key()?;
        Self::new(
            &config.base_url,
            api_key,
            Duration::from_secs(config.timeout_secs),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn generate_url(&self, model: &str) -> String {
        let model = model.trim().trim_start_matches("models/");
        format!("{}/v1beta/models/{}:generateContent", self.base_url, model)
    }

    /// Generate text for a prompt, optionally with an inline image.
    pub async fn generate(
        &self,
        model: &str,
        prompt: &str,
        image: Option<&ImagePayload>,
    ) -> Result<String, RemoteError> {
        let mut parts = vec![Part::Text { text: prompt }];
        if let Some(image) = image {
            parts.push(Part::InlineData {
                inline_data: InlineData {
                    mime_type: image.mime_type(),
                    data: base64::engine::general_purpose::STANDARD.encode(image.bytes()),
                },
            });
        }
        let request = GenerateContentRequest {
            contents: vec![Content { role: "user", parts }],
        };

        debug!(model = model, multimodal = image.is_some(), "Calling Gemini generateContent");
        let response = self
            .client
            .post(self.generate_url(model))
            .header(API_KEY_HEADER, &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| RemoteError::new(format!("Failed to reach Gemini: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| RemoteError::with_status(status.as_u16(), format!("Failed to read Gemini response: {}", e)))?;

        if !status.is_success() {
            return Err(provider_error(status, &body));
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&body).map_err(|e| {
            RemoteError::with_status(
                status.as_u16(),
                format!("Failed to parse Gemini response: {}", e),
            )
        })?;

        match parsed.first_text() {
            Some(text) => {
                debug!(len = text.len(), "Gemini returned text");
                Ok(text)
            }
            None => Err(RemoteError::with_status(status.as_u16(), parsed.empty_reason())),
        }
    }

    /// Check whether the endpoint answers the model listing with this credential.
    pub async fn health_check(&self) -> bool {
        let response = self
            .client
            .get(format!("{}/v1beta/models", self.base_url))
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await;

        matches!(response, Ok(resp) if resp.status().is_success())
    }
}

/// Turn a non-2xx answer into the provider's own message when it sent one.
fn provider_error(status: reqwest::StatusCode, body: &str) -> RemoteError {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => {
            warn!(
                status = status.as_u16(),
                provider_status = envelope.error.status.as_deref().unwrap_or(""),
                "Gemini API error"
            );
            RemoteError::with_status(status.as_u16(), envelope.error.message)
        }
        Err(_) => {
            warn!(status = status.as_u16(), "Gemini API error with unstructured body");
            RemoteError::with_status(
                status.as_u16(),
                format!("Gemini API error ({}): {}", status, body.trim()),
            )
        }
    }
}

#[async_trait]
impl ModelGateway for GeminiClient {
    fn provider(&self) -> &str {
        PROVIDER
    }

    async fn invoke(
        &self,
        model: &str,
        prompt: &str,
        image: Option<&ImagePayload>,
    ) -> Result<ModelResponse, RemoteError> {
        self.generate(model, prompt, image).await.map(ModelResponse::new)
    }
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_url_strips_models_prefix() {
        let client =
            GeminiClient::new("https://example.test/", "key", Duration::from_secs(5)).unwrap();
        assert_eq!(
            client.generate_url("models/gemini-1.5-flash"),
            "https://example.test/v1beta/models/gemini-1.5-flash:generateContent"
        );
        assert_eq!(
            client.generate_url("gemini-1.5-pro"),
            "https://example.test/v1beta/models/gemini-1.5-pro:generateContent"
        );
    }

    #[test]
    fn test_empty_key_is_rejected() {
        assert!(matches!(
            GeminiClient::new("https://example.test", "  ", Duration::from_secs(5)),
            Err(TruthLensError::Config(_))
        ));
    }

    #[test]
    fn test_from_config_requires_key() {
        let config = TruthLensConfig::default();
        assert!(GeminiClient::from_config(&config).is_err());

        let config = TruthLensConfig {
            api_key: Some("k".into()),
            ..Default::default()
        };
        let client = GeminiClient::from_config(&config).unwrap();
        assert_eq!(client.base_url(), "https://generativelanguage.googleapis.com");
    }

    #[test]
    fn test_debug_hides_key() {
        let client =
            GeminiClient::new("https://example.test", "secret-key", Duration::from_secs(5)).unwrap();
        assert!(!format!("{:?}", client).contains("secret-key"));
    }
}
