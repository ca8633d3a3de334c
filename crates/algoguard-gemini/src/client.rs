//! HTTP client for the Gemini `generateContent` endpoint.
//!
//! Wraps `reqwest` with API key handling, JSON-schema constrained requests and
//! typed envelope parsing. Every call is a single attempt.

use std::time::Duration;

use reqwest::{Client, Url};

use crate::error::GeminiError;
use crate::types::{ErrorEnvelope, GenerateContentRequest, GenerateContentResponse};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/";
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Client for the Gemini REST API.
///
/// Use [`GeminiClient::new`] for production or [`GeminiClient::with_base_url`]
/// to point at a mock server in tests.
pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: Url,
}

impl GeminiClient {
    /// Creates a new client pointed at the production Gemini API.
    ///
    /// # Errors
    ///
    /// Returns [`GeminiError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, model: &str, timeout_secs: u64) -> Result<Self, GeminiError> {
        Self::with_base_url(api_key, model, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`GeminiError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`GeminiError::InvalidBaseUrl`] if
    /// `base_url` is not a valid URL.
    pub fn with_base_url(
        api_key: &str,
        model: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, GeminiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("algoguard/0.1")
            .build()?;

        // Exactly one trailing slash, so joining the endpoint path appends to
        // the base instead of replacing its last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| GeminiError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            model: model.to_owned(),
            base_url,
        })
    }

    /// Sends `prompt` with a declared response schema and returns the raw
    /// completion text, which the service promises is JSON.
    ///
    /// # Errors
    ///
    /// - [`GeminiError::Http`] on network failure.
    /// - [`GeminiError::ApiError`] on a non-2xx status.
    /// - [`GeminiError::Deserialize`] if the envelope cannot be parsed.
    /// - [`GeminiError::EmptyResponse`] if no candidate carries text.
    pub async fn generate_json(
        &self,
        prompt: &str,
        schema: &serde_json::Value,
    ) -> Result<String, GeminiError> {
        let url = self.endpoint_url()?;
        let request = GenerateContentRequest::json_prompt(prompt, schema);

        tracing::debug!(model = %self.model, prompt_len = prompt.len(), "sending generateContent request");

        let response = self
            .client
            .post(url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = Self::error_message(&body);
            tracing::warn!(status = status.as_u16(), %message, "Gemini request rejected");
            return Err(GeminiError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        let envelope: GenerateContentResponse =
            serde_json::from_str(&body).map_err(|e| GeminiError::Deserialize {
                context: format!("generateContent(model={})", self.model),
                source: e,
            })?;

        envelope
            .first_text()
            .ok_or_else(|| GeminiError::EmptyResponse(envelope.missing_text_reason()))
    }

    /// `{base}/v1beta/models/{model}:generateContent`
    fn endpoint_url(&self) -> Result<Url, GeminiError> {
        let path = format!("v1beta/models/{}:generateContent", self.model);
        self.base_url
            .join(&path)
            .map_err(|e| GeminiError::InvalidBaseUrl {
                url: format!("{}{path}", self.base_url),
                reason: e.to_string(),
            })
    }

    /// Pulls `error.message` out of an error body, falling back to the raw
    /// body when it is not the usual envelope.
    fn error_message(body: &str) -> String {
        match serde_json::from_str::<ErrorEnvelope>(body) {
            Ok(envelope) => envelope
                .error
                .message
                .or(envelope.error.status)
                .unwrap_or_else(|| "unknown error".to_string()),
            Err(_) if body.trim().is_empty() => "empty error body".to_string(),
            Err(_) => body.chars().take(200).collect(),
        }
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
