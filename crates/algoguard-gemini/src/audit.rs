//! Profile audit and remediation endpoints built on [`GeminiClient::generate_json`].

use algoguard_core::{parse_profile, parse_strategy, Profile, Strategy};
use chrono::Utc;

use crate::client::GeminiClient;
use crate::error::GeminiError;
use crate::prompt::{audit_prompt, strategy_prompt};
use crate::schema::{profile_schema, strategy_schema};

impl GeminiClient {
    /// Requests a fabricated audit for `handle` and stamps it with the
    /// current time.
    ///
    /// `handle` is expected to be normalized already. One attempt, no retry.
    ///
    /// # Errors
    ///
    /// - [`GeminiError::Http`], [`GeminiError::ApiError`] or
    ///   [`GeminiError::EmptyResponse`] from the transport.
    /// - [`GeminiError::Deserialize`] if the completion text is not JSON.
    /// - [`GeminiError::MalformedResponse`] if the JSON violates the schema.
    pub async fn analyze_profile(&self, handle: &str) -> Result<Profile, GeminiError> {
        let context = format!("audit(@{handle})");
        let text = self
            .generate_json(&audit_prompt(handle), &profile_schema())
            .await?;
        let value = parse_completion(&text, &context)?;
        let profile = parse_profile(&value, Utc::now().timestamp_millis())
            .map_err(|source| GeminiError::MalformedResponse { context, source })?;

        tracing::info!(
            handle = %profile.handle,
            status = %profile.status,
            risk = %profile.risk_level,
            "profile audit received"
        );
        Ok(profile)
    }

    /// Requests a remediation plan for `profile`. One attempt, no retry.
    ///
    /// # Errors
    ///
    /// Same as [`GeminiClient::analyze_profile`].
    pub async fn remediation_strategy(&self, profile: &Profile) -> Result<Strategy, GeminiError> {
        let context = format!("strategy(@{})", profile.handle);
        let text = self
            .generate_json(&strategy_prompt(profile), &strategy_schema())
            .await?;
        let value = parse_completion(&text, &context)?;
        let strategy = parse_strategy(&value)
            .map_err(|source| GeminiError::MalformedResponse { context, source })?;

        tracing::info!(
            handle = %profile.handle,
            steps = strategy.steps.len(),
            "remediation strategy received"
        );
        Ok(strategy)
    }
}

fn parse_completion(text: &str, context: &str) -> Result<serde_json::Value, GeminiError> {
    serde_json::from_str(text).map_err(|source| GeminiError::Deserialize {
        context: context.to_string(),
        source,
    })
}
