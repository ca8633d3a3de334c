//! Orchestrates scans and strategy requests against the view state.
//!
//! A [`Session`] owns the [`AnalysisState`], an injected [`AuditService`] and
//! an injected [`KeyValueStore`] for history. Requests are split into
//! `begin_*` / `finish_*` halves so callers can interleave them; the
//! convenience methods [`Session::scan`] and [`Session::request_strategy`]
//! run both halves back to back.

use std::future::Future;

use algoguard_core::{normalize_handle, Profile, Strategy};
use algoguard_gemini::{GeminiClient, GeminiError};

use crate::error::StoreError;
use crate::history;
use crate::narration::Narrator;
use crate::state::{Action, AnalysisState, RequestId};
use crate::store::KeyValueStore;

/// Seam to the completion service.
pub trait AuditService {
    fn audit_profile(
        &self,
        handle: &str,
    ) -> impl Future<Output = Result<Profile, GeminiError>> + Send;

    fn remediation_plan(
        &self,
        profile: &Profile,
    ) -> impl Future<Output = Result<Strategy, GeminiError>> + Send;
}

impl AuditService for GeminiClient {
    fn audit_profile(
        &self,
        handle: &str,
    ) -> impl Future<Output = Result<Profile, GeminiError>> + Send {
        self.analyze_profile(handle)
    }

    fn remediation_plan(
        &self,
        profile: &Profile,
    ) -> impl Future<Output = Result<Strategy, GeminiError>> + Send {
        self.remediation_strategy(profile)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanOutcome {
    /// Profile stored and recorded in history.
    Completed,
    /// The service call failed; the state carries the generic error.
    Failed,
    /// A newer request was issued before this one resolved.
    Superseded,
    /// Input normalized to an empty handle; nothing happened.
    Ignored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyOutcome {
    Ready,
    Failed,
    /// A newer request was issued, or the profile was reset, before this one
    /// resolved.
    Superseded,
    /// No profile, or another request is in flight.
    Unavailable,
}

/// An issued scan awaiting its result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanTicket {
    pub request: RequestId,
    pub handle: String,
}

/// An issued strategy request; carries the profile it was requested for.
#[derive(Debug, Clone, PartialEq)]
pub struct StrategyTicket {
    pub request: RequestId,
    pub profile: Profile,
}

pub struct Session<A, S> {
    auditor: A,
    store: S,
    narrator: Narrator,
    state: AnalysisState,
    last_issued: u64,
}

impl<A, S> Session<A, S>
where
    A: AuditService,
    S: KeyValueStore,
{
    /// Creates a session, reading persisted history from `store` once.
    pub fn new(auditor: A, store: S, narrator: Narrator) -> Self {
        let history = history::load(&store);
        tracing::debug!(entries = history.len(), "scan history loaded");
        Self {
            auditor,
            store,
            narrator,
            state: AnalysisState::with_history(history),
            last_issued: 0,
        }
    }

    #[must_use]
    pub fn state(&self) -> &AnalysisState {
        &self.state
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    fn issue(&mut self) -> RequestId {
        self.last_issued += 1;
        RequestId(self.last_issued)
    }

    fn dispatch(&mut self, action: Action) {
        let state = std::mem::take(&mut self.state);
        self.state = state.apply(action);
    }

    fn persist_history(&self) {
        if let Err(e) = history::save(&self.store, &self.state.history) {
            tracing::warn!(error = %e, "failed to persist scan history");
        }
    }

    /// Normalizes `raw_input` and, unless it is empty, issues a scan.
    pub fn begin_scan(&mut self, raw_input: &str) -> Option<ScanTicket> {
        let handle = normalize_handle(raw_input);
        if handle.is_empty() {
            tracing::debug!(raw_input, "ignoring scan of empty handle");
            return None;
        }

        let request = self.issue();
        self.dispatch(Action::StartScan { request });
        tracing::info!(%request, %handle, "scan started");
        Some(ScanTicket { request, handle })
    }

    /// Plays the narration for `ticket`, mirroring each line into the state
    /// and to `on_step`.
    pub async fn narrate<F>(&mut self, ticket: &ScanTicket, mut on_step: F)
    where
        F: FnMut(&str),
    {
        let narrator = self.narrator;
        narrator
            .play(|line| {
                if self.state.is_current(ticket.request) {
                    self.dispatch(Action::ScanStep {
                        request: ticket.request,
                        line: line.to_string(),
                    });
                    on_step(line);
                }
            })
            .await;
    }

    /// Applies the audit result for `ticket`.
    pub fn finish_scan(
        &mut self,
        ticket: &ScanTicket,
        result: Result<Profile, GeminiError>,
    ) -> ScanOutcome {
        if !self.state.is_current(ticket.request) {
            tracing::info!(request = %ticket.request, handle = %ticket.handle, "discarding stale scan result");
            return ScanOutcome::Superseded;
        }

        match result {
            Ok(profile) => {
                self.dispatch(Action::ScanSucceeded {
                    request: ticket.request,
                    profile,
                });
                self.persist_history();
                ScanOutcome::Completed
            }
            Err(e) => {
                tracing::warn!(request = %ticket.request, handle = %ticket.handle, error = %e, "scan failed");
                self.dispatch(Action::ScanFailed {
                    request: ticket.request,
                });
                ScanOutcome::Failed
            }
        }
    }

    /// Full scan: normalize, narrate, audit, apply.
    pub async fn scan<F>(&mut self, raw_input: &str, on_step: F) -> ScanOutcome
    where
        F: FnMut(&str),
    {
        let Some(ticket) = self.begin_scan(raw_input) else {
            return ScanOutcome::Ignored;
        };
        self.narrate(&ticket, on_step).await;
        let result = self.auditor.audit_profile(&ticket.handle).await;
        self.finish_scan(&ticket, result)
    }

    /// Issues a strategy request if a profile is present and nothing is
    /// loading.
    pub fn begin_strategy(&mut self) -> Option<StrategyTicket> {
        if !self.state.can_request_strategy() {
            return None;
        }
        let profile = self.state.profile.clone()?;

        let request = self.issue();
        self.dispatch(Action::RequestStrategy { request });
        tracing::info!(%request, handle = %profile.handle, "strategy requested");
        Some(StrategyTicket { request, profile })
    }

    pub fn finish_strategy(
        &mut self,
        ticket: &StrategyTicket,
        result: Result<Strategy, GeminiError>,
    ) -> StrategyOutcome {
        if !self.state.is_current(ticket.request) {
            tracing::info!(request = %ticket.request, "discarding stale strategy result");
            return StrategyOutcome::Superseded;
        }
        if self.state.profile.is_none() {
            tracing::info!(request = %ticket.request, handle = %ticket.profile.handle, "discarding strategy result after reset");
            // The reducer drops the result and only clears `loading`.
            self.dispatch(Action::StrategyFailed {
                request: ticket.request,
            });
            return StrategyOutcome::Superseded;
        }

        match result {
            Ok(strategy) => {
                self.dispatch(Action::StrategyReady {
                    request: ticket.request,
                    strategy,
                });
                StrategyOutcome::Ready
            }
            Err(e) => {
                tracing::warn!(request = %ticket.request, handle = %ticket.profile.handle, error = %e, "strategy generation failed");
                self.dispatch(Action::StrategyFailed {
                    request: ticket.request,
                });
                StrategyOutcome::Failed
            }
        }
    }

    pub async fn request_strategy(&mut self) -> StrategyOutcome {
        let Some(ticket) = self.begin_strategy() else {
            return StrategyOutcome::Unavailable;
        };
        let result = self.auditor.remediation_plan(&ticket.profile).await;
        self.finish_strategy(&ticket, result)
    }

    /// Clears the current profile and strategy. History is untouched.
    pub fn reset(&mut self) {
        self.dispatch(Action::Reset);
    }

    /// Empties history in memory and in the store.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the stored entry cannot be removed.
    pub fn clear_history(&mut self) -> Result<(), StoreError> {
        self.dispatch(Action::ClearHistory);
        self.store.remove(history::HISTORY_KEY)
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
