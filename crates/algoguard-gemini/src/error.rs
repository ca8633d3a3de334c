use algoguard_core::ValidationError;
use thiserror::Error;

/// Errors returned by the Gemini completion client.
///
/// None of these are retried; callers surface a generic failure and let the
/// user try again.
#[derive(Debug, Error)]
pub enum GeminiError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-2xx status.
    #[error("Gemini API error ({status}): {message}")]
    ApiError { status: u16, message: String },

    /// The service answered 2xx but produced no candidate text.
    #[error("Gemini returned no content: {0}")]
    EmptyResponse(String),

    /// A body could not be parsed as JSON of the expected envelope shape.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The completion text was valid JSON but violated the declared schema.
    #[error("malformed response for {context}: {source}")]
    MalformedResponse {
        context: String,
        #[source]
        source: ValidationError,
    },

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}
