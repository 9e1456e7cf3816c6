//! GeminiProvider -- concrete [`ChatProvider`] implementation for the
//! Google Gemini `generateContent` API.
//!
//! The API key is wrapped in [`secrecy::SecretString`] and is never
//! logged or included in `Debug` output.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};

use parley_core::llm::provider::ChatProvider;
use parley_types::error::ProviderError;
use parley_types::session::{HistoryEntry, OutboundMessage, SessionSettings};

use super::types::{GenerateContentRequest, GenerateContentResponse};

/// Google Gemini provider.
///
/// # API Key Security
///
/// The API key is stored as a [`SecretString`] and is only exposed when
/// constructing the request header. It never appears in Debug output,
/// Display output, or tracing logs.
pub struct GeminiProvider {
    client: reqwest::Client,
    api_key: SecretString,
    base_url: String,
}

impl GeminiProvider {
    const DEFAULT_BASE_URL: &'static str = "https://generativelanguage.googleapis.com";

    /// Create a new Gemini provider.
    pub fn new(api_key: SecretString) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .expect("failed to create reqwest client");

        Self {
            client,
            api_key,
            base_url: Self::DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Override the base URL (useful for testing or proxies).
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    /// Build the full endpoint URL for a model.
    fn url(&self, model: &str) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.base_url, model)
    }
}

// GeminiProvider intentionally does NOT derive Debug so the key cannot
// leak through format strings even before SecretString redaction.

impl ChatProvider for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn generate(
        &self,
        settings: &SessionSettings,
        history: &[HistoryEntry],
        message: &OutboundMessage,
    ) -> Result<String, ProviderError> {
        let body = GenerateContentRequest::build(settings, history, message);
        let url = self.url(&settings.model);
        tracing::debug!(
            model = %settings.model,
            history_len = history.len(),
            has_attachment = message.attachment.is_some(),
            "sending generateContent request"
        );

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", self.api_key.expose_secret())
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::Transport(format!("HTTP request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(match status.as_u16() {
                400 if error_body.contains("API key not valid") => {
                    ProviderError::AuthenticationFailed
                }
                400 => ProviderError::InvalidRequest(error_body),
                401 | 403 => ProviderError::AuthenticationFailed,
                429 => ProviderError::RateLimited,
                _ => ProviderError::Api {
                    status: status.as_u16(),
                    message: error_body,
                },
            });
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Deserialization(format!("failed to parse response: {e}")))?;

        Ok(parsed.text())
    }
}
