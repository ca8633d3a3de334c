//! Figures derived from a profile for the dashboard view.

use algoguard_core::{AccountStatus, Profile, RiskLevel};

/// Segments in the risk meter.
pub const RISK_SEGMENTS: usize = 4;

const FALLBACK_VIEWS: f64 = 2000.0;
const FALLBACK_LATEST_VIEWS: f64 = 2400.0;

#[derive(Debug, Clone, PartialEq)]
pub struct TrendPoint {
    pub label: String,
    pub views: f64,
}

/// How alarming a value should look.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Good,
    Caution,
    Alarm,
}

/// Seven-day view trend. The first three days are a fixed warm-up shape; the
/// rest scale off the profile's average views (fallbacks when absent or zero).
#[must_use]
pub fn engagement_trend(profile: Option<&Profile>) -> Vec<TrendPoint> {
    #[allow(clippy::cast_precision_loss)]
    let average = profile
        .map(|p| p.average_views)
        .filter(|&views| views > 0)
        .map(|views| views as f64);

    let base = average.unwrap_or(FALLBACK_VIEWS);
    let latest = average.unwrap_or(FALLBACK_LATEST_VIEWS);
    let views = [400.0, 1200.0, 900.0, base, base * 0.8, base * 1.2, latest];

    views
        .iter()
        .enumerate()
        .map(|(i, &views)| TrendPoint {
            label: format!("Day {}", i + 1),
            views,
        })
        .collect()
}

/// Lit state of each risk-meter segment, lowest first.
#[must_use]
pub fn risk_meter(risk: RiskLevel) -> [bool; RISK_SEGMENTS] {
    let lit = usize::from(risk.severity());
    std::array::from_fn(|i| i < lit)
}

#[must_use]
pub fn status_tone(status: AccountStatus) -> Tone {
    match status {
        AccountStatus::Healthy => Tone::Good,
        AccountStatus::Warned => Tone::Caution,
        AccountStatus::Frozen | AccountStatus::Shadowbanned => Tone::Alarm,
    }
}

#[must_use]
pub fn risk_tone(risk: RiskLevel) -> Tone {
    match risk {
        RiskLevel::Low => Tone::Good,
        RiskLevel::Medium => Tone::Caution,
        RiskLevel::High | RiskLevel::Critical => Tone::Alarm,
    }
}

/// Engagement rate clamped for a 0–100 progress bar.
#[must_use]
pub fn engagement_fill(profile: &Profile) -> f64 {
    profile.engagement_rate.clamp(0.0, 100.0)
}

/// `950`, `12.5K`, `1.2M`, `3.4B`. A value that rounds up to a full
/// thousand of its unit moves to the next unit (`999_950` is `1M`).
#[must_use]
pub fn format_compact(n: u64) -> String {
    const UNITS: [(u64, &str); 3] = [
        (1_000, "K"),
        (1_000_000, "M"),
        (1_000_000_000, "B"),
    ];
    for (i, &(scale, suffix)) in UNITS.iter().enumerate().rev() {
        if n < scale {
            continue;
        }
        let scale = u128::from(scale);
        let tenths = (u128::from(n) * 10 + scale / 2) / scale;
        if tenths >= 10_000 {
            if let Some(&(_, next)) = UNITS.get(i + 1) {
                return format!("1{next}");
            }
        }
        return match tenths % 10 {
            0 => format!("{}{suffix}", tenths / 10),
            frac => format!("{}.{frac}{suffix}", tenths / 10),
        };
    }
    n.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile_with_views(average_views: u64) -> Profile {
        Profile {
            handle: "foo".to_string(),
            status: AccountStatus::Healthy,
            engagement_rate: 140.0,
            follower_growth: 0.0,
            average_views,
            followers: 1,
            likes: 1,
            risk_level: RiskLevel::Low,
            analysis_summary: "ok".to_string(),
            timestamp: 0,
        }
    }

    fn views(points: &[TrendPoint]) -> Vec<f64> {
        points.iter().map(|p| p.views).collect()
    }

    fn assert_views(points: &[TrendPoint], expected: &[f64]) {
        assert_eq!(points.len(), expected.len());
        for (point, want) in points.iter().zip(expected) {
            assert!(
                (point.views - want).abs() < 1e-6,
                "{}: got {}, want {want}",
                point.label,
                point.views
            );
        }
    }

    #[test]
    fn trend_without_profile_uses_fallbacks() {
        let trend = engagement_trend(None);
        assert_eq!(trend.len(), 7);
        assert_eq!(trend[0].label, "Day 1");
        assert_eq!(trend[6].label, "Day 7");
        assert_views(
            &trend,
            &[400.0, 1200.0, 900.0, 2000.0, 1600.0, 2400.0, 2400.0],
        );
    }

    #[test]
    fn trend_scales_from_average_views() {
        let profile = profile_with_views(5000);
        assert_views(
            &engagement_trend(Some(&profile)),
            &[400.0, 1200.0, 900.0, 5000.0, 4000.0, 6000.0, 5000.0],
        );
    }

    #[test]
    fn trend_treats_zero_views_as_absent() {
        let profile = profile_with_views(0);
        assert_views(
            &engagement_trend(Some(&profile)),
            &views(&engagement_trend(None)),
        );
    }

    #[test]
    fn risk_meter_lights_severity_segments() {
        assert_eq!(risk_meter(RiskLevel::Low), [true, false, false, false]);
        assert_eq!(risk_meter(RiskLevel::Medium), [true, true, false, false]);
        assert_eq!(risk_meter(RiskLevel::High), [true, true, true, false]);
        assert_eq!(risk_meter(RiskLevel::Critical), [true; 4]);
    }

    #[test]
    fn tones() {
        assert_eq!(status_tone(AccountStatus::Healthy), Tone::Good);
        assert_eq!(status_tone(AccountStatus::Warned), Tone::Caution);
        assert_eq!(status_tone(AccountStatus::Frozen), Tone::Alarm);
        assert_eq!(risk_tone(RiskLevel::Medium), Tone::Caution);
        assert_eq!(risk_tone(RiskLevel::Critical), Tone::Alarm);
    }

    #[test]
    fn engagement_fill_is_clamped() {
        let profile = profile_with_views(1);
        assert!((engagement_fill(&profile) - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn compact_formatting() {
        assert_eq!(format_compact(950), "950");
        assert_eq!(format_compact(1000), "1K");
        assert_eq!(format_compact(12_500), "12.5K");
        assert_eq!(format_compact(1_240_000), "1.2M");
        assert_eq!(format_compact(3_400_000_000), "3.4B");
    }

    #[test]
    fn compact_formatting_rolls_over_to_next_unit() {
        assert_eq!(format_compact(999_949), "999.9K");
        assert_eq!(format_compact(999_950), "1M");
        assert_eq!(format_compact(999_999), "1M");
        assert_eq!(format_compact(999_950_000), "1B");
        assert_eq!(format_compact(1_999_999_999_999), "2000B");
    }
}
