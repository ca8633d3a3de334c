//! Declared response schemas, in Gemini's OpenAPI-subset dialect.

use algoguard_core::{AccountStatus, RiskLevel};
use serde_json::{json, Value};

/// Schema for the audit payload. Field names match [`algoguard_core::Profile`]'s
/// wire names; `timestamp` is stamped client-side and not requested.
#[must_use]
pub fn profile_schema() -> Value {
    let statuses: Vec<&str> = AccountStatus::ALL.iter().map(|s| s.as_str()).collect();
    let risks: Vec<&str> = RiskLevel::ALL.iter().map(|r| r.as_str()).collect();

    json!({
        "type": "OBJECT",
        "properties": {
            "username": { "type": "STRING" },
            "status": { "type": "STRING", "enum": statuses },
            "engagementRate": { "type": "NUMBER" },
            "followerGrowth": { "type": "NUMBER" },
            "averageViews": { "type": "NUMBER" },
            "followers": { "type": "NUMBER" },
            "likes": { "type": "NUMBER" },
            "riskLevel": { "type": "STRING", "enum": risks },
            "analysisSummary": { "type": "STRING" }
        },
        "required": [
            "username",
            "status",
            "engagementRate",
            "riskLevel",
            "analysisSummary",
            "followers",
            "likes"
        ]
    })
}

#[must_use]
pub fn strategy_schema() -> Value {
    let string_list = json!({ "type": "ARRAY", "items": { "type": "STRING" } });

    json!({
        "type": "OBJECT",
        "properties": {
            "title": { "type": "STRING" },
            "steps": string_list,
            "hashtags": string_list,
            "bestPostingTimes": string_list,
            "contentPillars": string_list
        },
        "required": ["title", "steps", "hashtags", "bestPostingTimes", "contentPillars"]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_schema_enumerates_every_status_and_risk() {
        let schema = profile_schema();
        assert_eq!(
            schema["properties"]["status"]["enum"],
            json!(["Healthy", "Frozen", "Warned", "Shadowbanned"])
        );
        assert_eq!(
            schema["properties"]["riskLevel"]["enum"],
            json!(["Low", "Medium", "High", "Critical"])
        );
    }

    #[test]
    fn profile_schema_leaves_growth_and_views_optional() {
        let schema = profile_schema();
        let required: Vec<&str> = schema["required"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(Value::as_str)
            .collect();
        assert_eq!(required.len(), 7);
        assert!(!required.contains(&"followerGrowth"));
        assert!(!required.contains(&"averageViews"));
        assert!(!required.contains(&"timestamp"));
    }

    #[test]
    fn strategy_schema_requires_all_fields() {
        let schema = strategy_schema();
        assert_eq!(schema["required"].as_array().unwrap().len(), 5);
        assert_eq!(schema["properties"]["steps"]["items"]["type"], "STRING");
    }
}
