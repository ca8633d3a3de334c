//! View state and its reducer.
//!
//! Every transition consumes the current [`AnalysisState`] and returns a new
//! one; nothing mutates fields in place from outside this module. Completion
//! actions carry the [`RequestId`] they were issued under and are dropped
//! unless that id is still the latest one, so a slow response can never
//! overwrite the result of a newer request.

use std::fmt;

use algoguard_core::{Profile, Strategy};

use crate::history;

pub const SCAN_FAILED_MESSAGE: &str =
    "Failed to access TikTok servers. Please check the ID and try again.";
pub const STRATEGY_FAILED_MESSAGE: &str = "Could not generate boost strategy.";

/// Monotonically increasing tag for outbound requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(pub u64);

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone)]
pub enum Action {
    StartScan { request: RequestId },
    ScanStep { request: RequestId, line: String },
    ScanSucceeded { request: RequestId, profile: Profile },
    ScanFailed { request: RequestId },
    RequestStrategy { request: RequestId },
    StrategyReady { request: RequestId, strategy: Strategy },
    StrategyFailed { request: RequestId },
    Reset,
    ClearHistory,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalysisState {
    pub loading: bool,
    /// Narration line currently shown while a scan is loading.
    pub scan_step: Option<String>,
    pub profile: Option<Profile>,
    pub strategy: Option<Strategy>,
    pub error: Option<String>,
    /// Newest first, at most [`history::HISTORY_LIMIT`], unique by handle.
    pub history: Vec<Profile>,
    /// Tag of the most recently issued request; completions with any other
    /// tag are stale.
    pub latest_request: Option<RequestId>,
}

impl AnalysisState {
    /// Initial state with previously persisted history.
    #[must_use]
    pub fn with_history(history: Vec<Profile>) -> Self {
        Self {
            history,
            ..Self::default()
        }
    }

    /// A strategy may only be requested for a profile, and not while another
    /// request is in flight.
    #[must_use]
    pub fn can_request_strategy(&self) -> bool {
        self.profile.is_some() && !self.loading
    }

    #[must_use]
    pub fn is_current(&self, request: RequestId) -> bool {
        self.latest_request == Some(request)
    }

    /// Applies `action`, returning the next state.
    #[must_use]
    pub fn apply(self, action: Action) -> Self {
        match action {
            Action::StartScan { request } => Self {
                loading: true,
                scan_step: None,
                profile: None,
                strategy: None,
                error: None,
                latest_request: Some(request),
                ..self
            },

            Action::ScanStep { request, line } => {
                if !self.loading || !self.is_current(request) {
                    return self;
                }
                Self {
                    scan_step: Some(line),
                    ..self
                }
            }

            Action::ScanSucceeded { request, profile } => {
                if !self.is_current(request) {
                    return self;
                }
                let mut history = self.history;
                history::record(&mut history, profile.clone());
                Self {
                    loading: false,
                    scan_step: None,
                    profile: Some(profile),
                    history,
                    ..self
                }
            }

            Action::ScanFailed { request } => {
                if !self.is_current(request) {
                    return self;
                }
                Self {
                    loading: false,
                    scan_step: None,
                    error: Some(SCAN_FAILED_MESSAGE.to_string()),
                    ..self
                }
            }

            Action::RequestStrategy { request } => {
                if !self.can_request_strategy() {
                    return self;
                }
                Self {
                    loading: true,
                    error: None,
                    latest_request: Some(request),
                    ..self
                }
            }

            Action::StrategyReady { request, strategy } => {
                if !self.is_current(request) {
                    return self;
                }
                // Reset while the request was in flight: drop the plan, a
                // strategy never outlives its profile.
                if self.profile.is_none() {
                    return Self {
                        loading: false,
                        ..self
                    };
                }
                Self {
                    loading: false,
                    strategy: Some(strategy),
                    ..self
                }
            }

            Action::StrategyFailed { request } => {
                if !self.is_current(request) {
                    return self;
                }
                if self.profile.is_none() {
                    return Self {
                        loading: false,
                        ..self
                    };
                }
                Self {
                    loading: false,
                    error: Some(STRATEGY_FAILED_MESSAGE.to_string()),
                    ..self
                }
            }

            Action::Reset => Self {
                profile: None,
                strategy: None,
                ..self
            },

            Action::ClearHistory => Self {
                history: Vec::new(),
                ..self
            },
        }
    }
}

#[cfg(test)]
#[path = "state_test.rs"]
mod tests;
