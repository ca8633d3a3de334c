//! The fabricated audit result for a single handle.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Account standing reported by the audit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccountStatus {
    Healthy,
    Frozen,
    Warned,
    Shadowbanned,
}

impl AccountStatus {
    pub const ALL: [AccountStatus; 4] = [
        AccountStatus::Healthy,
        AccountStatus::Frozen,
        AccountStatus::Warned,
        AccountStatus::Shadowbanned,
    ];

    /// Wire name, as used in the response schema and in persisted history.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            AccountStatus::Healthy => "Healthy",
            AccountStatus::Frozen => "Frozen",
            AccountStatus::Warned => "Warned",
            AccountStatus::Shadowbanned => "Shadowbanned",
        }
    }

    /// Parses a wire name. Matching is exact.
    #[must_use]
    pub fn from_wire(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.as_str() == s)
    }

    /// `Frozen` and `Shadowbanned` accounts get the alarm treatment.
    #[must_use]
    pub fn is_restricted(self) -> bool {
        matches!(self, AccountStatus::Frozen | AccountStatus::Shadowbanned)
    }
}

impl fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    pub const ALL: [RiskLevel; 4] = [
        RiskLevel::Low,
        RiskLevel::Medium,
        RiskLevel::High,
        RiskLevel::Critical,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
            RiskLevel::Critical => "Critical",
        }
    }

    #[must_use]
    pub fn from_wire(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|level| level.as_str() == s)
    }

    /// 1 for `Low` through 4 for `Critical`.
    #[must_use]
    pub fn severity(self) -> u8 {
        match self {
            RiskLevel::Low => 1,
            RiskLevel::Medium => 2,
            RiskLevel::High => 3,
            RiskLevel::Critical => 4,
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Audit result for one handle.
///
/// Serialized with the camelCase field names of the completion schema, so
/// persisted history and service responses share one shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(rename = "username")]
    pub handle: String,
    pub status: AccountStatus,
    /// Percentage, 0–100.
    pub engagement_rate: f64,
    #[serde(default)]
    pub follower_growth: f64,
    #[serde(default)]
    pub average_views: u64,
    pub followers: u64,
    pub likes: u64,
    pub risk_level: RiskLevel,
    pub analysis_summary: String,
    /// Milliseconds since the Unix epoch, stamped client-side.
    pub timestamp: i64,
}
