//! Plain-text rendering of the dashboard, strategy and history views.

use algoguard_core::{Profile, Strategy};
use algoguard_session::dashboard::{self, Tone};
use algoguard_session::AnalysisState;
use chrono::DateTime;
use serde::Serialize;

const BAR_WIDTH: usize = 20;
const TREND_WIDTH: usize = 30;

/// JSON shape printed by `scan --json`.
#[derive(Debug, Serialize)]
pub(crate) struct ScanReport<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<&'a Profile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strategy: Option<&'a Strategy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<&'a str>,
}

impl<'a> ScanReport<'a> {
    pub(crate) fn from_state(state: &'a AnalysisState) -> Self {
        Self {
            profile: state.profile.as_ref(),
            strategy: state.strategy.as_ref(),
            error: state.error.as_deref(),
        }
    }
}

fn tone_marker(tone: Tone) -> &'static str {
    match tone {
        Tone::Good => "[ok]",
        Tone::Caution => "[!]",
        Tone::Alarm => "[!!]",
    }
}

/// `[#####---------------]` scaled to `fraction` in `0.0..=1.0`.
fn bar(fraction: f64, width: usize) -> String {
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    let filled = ((fraction.clamp(0.0, 1.0) * width as f64).round() as usize).min(width);
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}

fn risk_meter(profile: &Profile) -> String {
    dashboard::risk_meter(profile.risk_level)
        .iter()
        .map(|&lit| if lit { '\u{25A0}' } else { '\u{25A1}' })
        .collect()
}

pub(crate) fn narration_line(line: &str) -> String {
    format!("  > {line}")
}

pub(crate) fn error_line(message: &str) -> String {
    format!("{} {message}", tone_marker(Tone::Alarm))
}

/// The audit dashboard: status, headline figures, risk meter and the
/// seven-day trend.
pub(crate) fn render_profile(profile: &Profile) -> String {
    let mut lines = vec![
        format!(
            "@{}  {} {}",
            profile.handle,
            tone_marker(dashboard::status_tone(profile.status)),
            profile.status
        ),
        format!("  {}", profile.analysis_summary),
        String::new(),
        format!(
            "  Engagement   {} {:.1}%",
            bar(dashboard::engagement_fill(profile) / 100.0, BAR_WIDTH),
            profile.engagement_rate
        ),
        format!(
            "  Risk         {} {} {}",
            risk_meter(profile),
            tone_marker(dashboard::risk_tone(profile.risk_level)),
            profile.risk_level
        ),
        format!(
            "  Followers    {:<10}Likes {:<10}Avg views {:<10}Growth {:+.1}%",
            dashboard::format_compact(profile.followers),
            dashboard::format_compact(profile.likes),
            dashboard::format_compact(profile.average_views),
            profile.follower_growth
        ),
        String::new(),
        "  7-day views".to_string(),
    ];

    let trend = dashboard::engagement_trend(Some(profile));
    let peak = trend.iter().map(|p| p.views).fold(0.0_f64, f64::max);
    for point in &trend {
        let fraction = if peak > 0.0 { point.views / peak } else { 0.0 };
        lines.push(format!(
            "  {:<7}{} {:.0}",
            point.label,
            bar(fraction, TREND_WIDTH),
            point.views
        ));
    }

    lines.join("\n")
}

pub(crate) fn render_strategy(strategy: &Strategy) -> String {
    let mut lines = vec![format!("== {} ==", strategy.title)];

    for (i, step) in strategy.steps.iter().enumerate() {
        lines.push(format!("  {}. {step}", i + 1));
    }

    let hashtags: Vec<String> = strategy
        .hashtags
        .iter()
        .map(|tag| {
            if tag.starts_with('#') {
                tag.clone()
            } else {
                format!("#{tag}")
            }
        })
        .collect();
    lines.push(format!("  Hashtags: {}", hashtags.join(" ")));
    lines.push(format!(
        "  Best posting times: {}",
        strategy.best_posting_times.join(", ")
    ));
    lines.push(format!(
        "  Content pillars: {}",
        strategy.content_pillars.join(", ")
    ));

    lines.join("\n")
}

/// Everything the current state has to show, in display order.
pub(crate) fn render_state(state: &AnalysisState) -> String {
    let mut sections = Vec::new();
    if let Some(error) = &state.error {
        sections.push(error_line(error));
    }
    if let Some(profile) = &state.profile {
        sections.push(render_profile(profile));
    }
    if let Some(strategy) = &state.strategy {
        sections.push(render_strategy(strategy));
    }
    sections.join("\n\n")
}

fn fmt_scanned_at(timestamp_ms: i64) -> String {
    DateTime::from_timestamp_millis(timestamp_ms)
        .map_or_else(|| "\u{2014}".to_string(), |dt| dt.format("%Y-%m-%d %H:%M").to_string())
}

pub(crate) fn render_history(history: &[Profile]) -> String {
    if history.is_empty() {
        return "no scans yet; run `algoguard scan <handle>` first".to_string();
    }

    let mut lines = vec![format!(
        "{:<24}{:<14}{:<10}{:<12}{:<11}SCANNED",
        "HANDLE", "STATUS", "RISK", "ENGAGEMENT", "FOLLOWERS"
    )];
    for profile in history {
        lines.push(format!(
            "{:<24}{:<14}{:<10}{:<12}{:<11}{}",
            format!("@{}", profile.handle),
            profile.status.to_string(),
            profile.risk_level.to_string(),
            format!("{:.1}%", profile.engagement_rate),
            dashboard::format_compact(profile.followers),
            fmt_scanned_at(profile.timestamp)
        ));
    }
    lines.join("\n")
}
