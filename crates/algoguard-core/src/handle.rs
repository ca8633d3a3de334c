//! Canonical handle extraction from raw user input.
//!
//! Users paste either a bare handle (`foo`, `@foo`) or a full profile link
//! (`https://www.tiktok.com/@foo/video/123?lang=en`). Both reduce to `foo`.

use std::sync::LazyLock;

use regex::Regex;

/// Captures the path segment after the `/@` profile marker, stopping at the
/// next path separator, query, fragment, or whitespace.
static PROFILE_PATH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/@([^/?#\s]*)").expect("valid regex"));

/// Extracts the canonical handle from a handle or profile URL.
///
/// Pure and idempotent: normalizing an already-normalized handle returns it
/// unchanged. Blank input yields an empty string.
#[must_use]
pub fn normalize_handle(raw: &str) -> String {
    let trimmed = raw.trim();
    let candidate = PROFILE_PATH_RE
        .captures(trimmed)
        .and_then(|caps| caps.get(1))
        .map_or(trimmed, |segment| segment.as_str());

    candidate
        .trim_start_matches(|c: char| c == '@' || c.is_whitespace())
        .trim_end()
        .to_string()
}
