use serde::{Deserialize, Serialize};

/// Remediation plan generated for a profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Strategy {
    pub title: String,
    /// Ordered; rendered as numbered steps.
    pub steps: Vec<String>,
    pub hashtags: Vec<String>,
    pub best_posting_times: Vec<String>,
    pub content_pillars: Vec<String>,
}
