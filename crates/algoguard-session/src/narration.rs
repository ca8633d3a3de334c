//! Scripted "deep analysis" log shown while a scan is pending.
//!
//! Purely cosmetic pacing; nothing here affects the audit result.

use std::time::Duration;

/// Played in order, one line per tick.
pub const SCAN_LOG: &[&str] = &[
    "Establishing secure handshake with content delivery nodes...",
    "Resolving account fingerprint...",
    "Pulling public engagement graph...",
    "Cross-referencing community guideline flags...",
    "Measuring For You feed distribution weight...",
    "Scoring shadow-restriction indicators...",
    "Compiling algorithmic health report...",
];

/// Plays [`SCAN_LOG`] with a random delay after each line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Narrator {
    min_delay: Duration,
    max_delay: Duration,
}

impl Default for Narrator {
    fn default() -> Self {
        Self::from_millis(400, 800)
    }
}

impl Narrator {
    /// Bounds are swapped if given in the wrong order.
    #[must_use]
    pub fn new(min_delay: Duration, max_delay: Duration) -> Self {
        if min_delay <= max_delay {
            Self {
                min_delay,
                max_delay,
            }
        } else {
            Self {
                min_delay: max_delay,
                max_delay: min_delay,
            }
        }
    }

    #[must_use]
    pub fn from_millis(min_ms: u64, max_ms: u64) -> Self {
        Self::new(Duration::from_millis(min_ms), Duration::from_millis(max_ms))
    }

    /// Zero delay; for tests and `--fast` runs.
    #[must_use]
    pub fn instant() -> Self {
        Self::new(Duration::ZERO, Duration::ZERO)
    }

    /// Uniformly drawn from `[min_delay, max_delay]`.
    #[must_use]
    pub fn next_delay(&self) -> Duration {
        if self.min_delay == self.max_delay {
            return self.min_delay;
        }
        rand::random_range(self.min_delay..=self.max_delay)
    }

    /// Emits each line to `on_line`, then waits before the next one.
    pub async fn play<F>(&self, mut on_line: F)
    where
        F: FnMut(&'static str),
    {
        for line in SCAN_LOG {
            on_line(line);
            let delay = self.next_delay();
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
        }
    }
}
