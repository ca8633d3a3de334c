//! Instruction text for the two completion calls.

use algoguard_core::Profile;

/// Asks for an invented audit of `handle`.
#[must_use]
pub fn audit_prompt(handle: &str) -> String {
    format!(
        "Analyze this TikTok username/profile ID: \"{handle}\".\n\
         Simulate a deep algorithmic health audit.\n\
         Requirements:\n\
         - Username: echo back \"{handle}\".\n\
         - Status: Choose from [Healthy, Frozen, Warned, Shadowbanned].\n\
         - EngagementRate: Real-world percentage (0-100).\n\
         - RiskLevel: [Low, Medium, High, Critical].\n\
         - Stats: Generate realistic follower counts (10k-2M) and likes (100k-10M).\n\
         - Summary: A 10-15 word professional-sounding diagnosis.\n\
         Format: Strict JSON."
    )
}

/// Asks for a remediation plan referencing the profile's handle and status.
#[must_use]
pub fn strategy_prompt(profile: &Profile) -> String {
    format!(
        "CRITICAL: TikTok ID @{handle} is flagged as \"{status}\".\n\
         Generate a professional \"Algorithmic Unfreeze Blueprint\".\n\
         Include 3 technical steps for metadata correction, 5 high-impact hashtags \
         for the current algorithm, 3 specific content pillars to reset engagement, \
         and best posting times.\n\
         Focus on high-growth strategy. Format: Strict JSON.",
        handle = profile.handle,
        status = profile.status,
    )
}
