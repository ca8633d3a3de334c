//! Post-parse validation of completion payloads.
//!
//! The completion service is asked to honour a declared schema but nothing
//! guarantees it does. These functions take an already-parsed JSON value and
//! either produce a fully typed record or a [`ValidationError`] naming the
//! offending field.

use serde_json::{Map, Value};
use thiserror::Error;

use crate::handle::normalize_handle;
use crate::profile::{AccountStatus, Profile, RiskLevel};
use crate::strategy::Strategy;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ValidationError {
    #[error("expected a JSON object, got {0}")]
    NotAnObject(&'static str),

    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    #[error("field `{field}` should be {expected}")]
    WrongType {
        field: &'static str,
        expected: &'static str,
    },

    #[error("field `{field}` has unknown value \"{value}\"")]
    UnknownVariant { field: &'static str, value: String },

    #[error("field `{field}` is out of range ({value}): {reason}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        reason: &'static str,
    },

    #[error("field `{0}` must not be blank")]
    Blank(&'static str),
}

/// Validates an audit payload and stamps it with `timestamp_ms`.
///
/// The returned handle is normalized, so `"@foo"` from the service is stored
/// as `"foo"`.
///
/// # Errors
///
/// Returns [`ValidationError`] if a required field is missing, has the wrong
/// type, carries an unknown enumeration value, or is out of range.
pub fn parse_profile(value: &Value, timestamp_ms: i64) -> Result<Profile, ValidationError> {
    let obj = as_object(value)?;

    let handle = normalize_handle(&required_string(obj, "username")?);
    if handle.is_empty() {
        return Err(ValidationError::Blank("username"));
    }

    let status_raw = required_string(obj, "status")?;
    let status =
        AccountStatus::from_wire(&status_raw).ok_or(ValidationError::UnknownVariant {
            field: "status",
            value: status_raw,
        })?;

    let risk_raw = required_string(obj, "riskLevel")?;
    let risk_level = RiskLevel::from_wire(&risk_raw).ok_or(ValidationError::UnknownVariant {
        field: "riskLevel",
        value: risk_raw,
    })?;

    let engagement_rate = required_number(obj, "engagementRate")?;
    if !(0.0..=100.0).contains(&engagement_rate) {
        return Err(ValidationError::OutOfRange {
            field: "engagementRate",
            value: engagement_rate,
            reason: "percentage must be between 0 and 100",
        });
    }

    let follower_growth = optional_number(obj, "followerGrowth")?.unwrap_or(0.0);
    let average_views = optional_number(obj, "averageViews")?
        .map(|v| to_count("averageViews", v))
        .transpose()?
        .unwrap_or(0);
    let followers = to_count("followers", required_number(obj, "followers")?)?;
    let likes = to_count("likes", required_number(obj, "likes")?)?;

    let analysis_summary = required_string(obj, "analysisSummary")?.trim().to_string();
    if analysis_summary.is_empty() {
        return Err(ValidationError::Blank("analysisSummary"));
    }

    Ok(Profile {
        handle,
        status,
        engagement_rate,
        follower_growth,
        average_views,
        followers,
        likes,
        risk_level,
        analysis_summary,
        timestamp: timestamp_ms,
    })
}

/// Validates a remediation payload.
///
/// # Errors
///
/// Returns [`ValidationError`] if any of the five strategy fields is missing
/// or has the wrong shape, or if the title is blank.
pub fn parse_strategy(value: &Value) -> Result<Strategy, ValidationError> {
    let obj = as_object(value)?;

    let title = required_string(obj, "title")?.trim().to_string();
    if title.is_empty() {
        return Err(ValidationError::Blank("title"));
    }

    Ok(Strategy {
        title,
        steps: required_string_list(obj, "steps")?,
        hashtags: required_string_list(obj, "hashtags")?,
        best_posting_times: required_string_list(obj, "bestPostingTimes")?,
        content_pillars: required_string_list(obj, "contentPillars")?,
    })
}

fn as_object(value: &Value) -> Result<&Map<String, Value>, ValidationError> {
    value
        .as_object()
        .ok_or_else(|| ValidationError::NotAnObject(json_kind(value)))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn required<'a>(
    obj: &'a Map<String, Value>,
    field: &'static str,
) -> Result<&'a Value, ValidationError> {
    match obj.get(field) {
        None | Some(Value::Null) => Err(ValidationError::MissingField(field)),
        Some(v) => Ok(v),
    }
}

fn required_string(
    obj: &Map<String, Value>,
    field: &'static str,
) -> Result<String, ValidationError> {
    required(obj, field)?
        .as_str()
        .map(str::to_string)
        .ok_or(ValidationError::WrongType {
            field,
            expected: "a string",
        })
}

fn required_number(obj: &Map<String, Value>, field: &'static str) -> Result<f64, ValidationError> {
    required(obj, field)?
        .as_f64()
        .ok_or(ValidationError::WrongType {
            field,
            expected: "a number",
        })
}

fn optional_number(
    obj: &Map<String, Value>,
    field: &'static str,
) -> Result<Option<f64>, ValidationError> {
    match obj.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(v) => v.as_f64().map(Some).ok_or(ValidationError::WrongType {
            field,
            expected: "a number",
        }),
    }
}

fn required_string_list(
    obj: &Map<String, Value>,
    field: &'static str,
) -> Result<Vec<String>, ValidationError> {
    let wrong_type = ValidationError::WrongType {
        field,
        expected: "an array of strings",
    };
    let items = required(obj, field)?.as_array().ok_or(wrong_type.clone())?;
    items
        .iter()
        .map(|item| item.as_str().map(str::to_string).ok_or(wrong_type.clone()))
        .collect()
}

/// Rounds a JSON number to a non-negative count.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn to_count(field: &'static str, value: f64) -> Result<u64, ValidationError> {
    if value < 0.0 {
        return Err(ValidationError::OutOfRange {
            field,
            value,
            reason: "count must not be negative",
        });
    }
    if value > u64::MAX as f64 {
        return Err(ValidationError::OutOfRange {
            field,
            value,
            reason: "count is too large",
        });
    }
    Ok(value.round() as u64)
}

#[cfg(test)]
#[path = "validate_test.rs"]
mod tests;
