use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use algoguard_core::{AccountStatus, RiskLevel};

use super::*;
use crate::narration::SCAN_LOG;
use crate::state::{SCAN_FAILED_MESSAGE, STRATEGY_FAILED_MESSAGE};
use crate::store::MemoryStore;

/// Scripted stand-in for the completion service.
#[derive(Default)]
struct FakeAuditor {
    fail_audit: bool,
    fail_strategy: bool,
    audited: Mutex<Vec<String>>,
    strategy_calls: AtomicUsize,
}

impl FakeAuditor {
    fn failing() -> Self {
        Self {
            fail_audit: true,
            fail_strategy: true,
            ..Self::default()
        }
    }

    fn audited(&self) -> Vec<String> {
        self.audited.lock().unwrap().clone()
    }
}

fn overloaded() -> GeminiError {
    GeminiError::ApiError {
        status: 503,
        message: "overloaded".to_string(),
    }
}

fn profile(handle: &str) -> Profile {
    Profile {
        handle: handle.to_string(),
        status: AccountStatus::Frozen,
        engagement_rate: 2.0,
        follower_growth: -0.4,
        average_views: 3100,
        followers: 88_000,
        likes: 1_100_000,
        risk_level: RiskLevel::High,
        analysis_summary: "Throttled".to_string(),
        timestamp: 1_700_000_000_000,
    }
}

fn strategy() -> Strategy {
    Strategy {
        title: "Unfreeze".to_string(),
        steps: vec!["a".to_string(), "b".to_string(), "c".to_string()],
        hashtags: vec!["#fyp".to_string()],
        best_posting_times: vec!["6pm".to_string()],
        content_pillars: vec!["Tips".to_string()],
    }
}

impl AuditService for FakeAuditor {
    fn audit_profile(
        &self,
        handle: &str,
    ) -> impl Future<Output = Result<Profile, GeminiError>> + Send {
        self.audited.lock().unwrap().push(handle.to_string());
        let result = if self.fail_audit {
            Err(overloaded())
        } else {
            Ok(profile(handle))
        };
        std::future::ready(result)
    }

    fn remediation_plan(
        &self,
        _profile: &Profile,
    ) -> impl Future<Output = Result<Strategy, GeminiError>> + Send {
        self.strategy_calls.fetch_add(1, Ordering::SeqCst);
        let result = if self.fail_strategy {
            Err(overloaded())
        } else {
            Ok(strategy())
        };
        std::future::ready(result)
    }
}

fn session(auditor: FakeAuditor) -> Session<FakeAuditor, MemoryStore> {
    Session::new(auditor, MemoryStore::default(), Narrator::instant())
}

fn stored_handles(session: &Session<FakeAuditor, MemoryStore>) -> Vec<String> {
    history::load(session.store())
        .into_iter()
        .map(|p| p.handle)
        .collect()
}

// -----------------------------------------------------------------------
// scan
// -----------------------------------------------------------------------

#[tokio::test]
async fn scan_of_at_handle_records_history() {
    let mut session = session(FakeAuditor::default());

    let outcome = session.scan("@foo", |_| {}).await;

    assert_eq!(outcome, ScanOutcome::Completed);
    assert_eq!(session.auditor.audited(), vec!["foo"]);
    let state = session.state();
    assert!(!state.loading);
    assert!(state.error.is_none());
    assert_eq!(state.profile.as_ref().unwrap().handle, "foo");
    assert_eq!(state.history.len(), 1);
    assert_eq!(state.history[0].handle, "foo");
    assert_eq!(stored_handles(&session), vec!["foo"]);
}

#[tokio::test]
async fn scan_of_video_url_audits_extracted_handle() {
    let mut session = session(FakeAuditor::default());

    session
        .scan("https://tiktok.com/@bar/video/123", |_| {})
        .await;

    assert_eq!(session.auditor.audited(), vec!["bar"]);
    assert_eq!(session.state().profile.as_ref().unwrap().handle, "bar");
}

#[tokio::test]
async fn blank_input_is_ignored() {
    let mut session = session(FakeAuditor::default());
    let before = session.state().clone();

    let outcome = session.scan("  @ ", |_| {}).await;

    assert_eq!(outcome, ScanOutcome::Ignored);
    assert!(session.auditor.audited().is_empty());
    assert_eq!(session.state(), &before);
}

#[tokio::test]
async fn narration_is_played_before_audit() {
    let mut session = session(FakeAuditor::default());
    let mut steps = Vec::new();

    session.scan("foo", |line| steps.push(line.to_string())).await;

    assert_eq!(steps, SCAN_LOG);
}

#[tokio::test]
async fn failed_first_scan_leaves_stable_idle_state() {
    let mut session = session(FakeAuditor::failing());

    let outcome = session.scan("foo", |_| {}).await;

    assert_eq!(outcome, ScanOutcome::Failed);
    let state = session.state();
    assert!(!state.loading);
    assert!(state.profile.is_none());
    assert_eq!(state.error.as_deref(), Some(SCAN_FAILED_MESSAGE));
    assert!(state.history.is_empty());
    assert_eq!(
        session.store().get(history::HISTORY_KEY).unwrap(),
        None,
        "a failed scan must not write history"
    );
}

#[tokio::test]
async fn history_is_bounded_and_rescans_move_to_front() {
    let mut session = session(FakeAuditor::default());

    for handle in ["a", "b", "c", "d", "e", "f"] {
        session.scan(handle, |_| {}).await;
    }
    assert_eq!(stored_handles(&session), vec!["f", "e", "d", "c", "b"]);

    session.scan("@d", |_| {}).await;
    assert_eq!(stored_handles(&session), vec!["d", "f", "e", "c", "b"]);
    assert_eq!(session.state().history.len(), 5);
}

#[tokio::test]
async fn history_is_loaded_from_store_on_start() {
    let store = MemoryStore::default();
    history::save(&store, &[profile("old")]).unwrap();

    let session = Session::new(FakeAuditor::default(), store, Narrator::instant());

    assert_eq!(session.state().history.len(), 1);
    assert_eq!(session.state().history[0].handle, "old");
    assert!(session.state().profile.is_none());
}

#[test]
fn stale_scan_result_is_discarded() {
    let mut session = session(FakeAuditor::default());

    let first = session.begin_scan("slow").unwrap();
    let second = session.begin_scan("fast").unwrap();
    assert!(second.request > first.request);

    assert_eq!(
        session.finish_scan(&second, Ok(profile("fast"))),
        ScanOutcome::Completed
    );
    assert_eq!(
        session.finish_scan(&first, Ok(profile("slow"))),
        ScanOutcome::Superseded
    );

    assert_eq!(session.state().profile.as_ref().unwrap().handle, "fast");
    assert_eq!(stored_handles(&session), vec!["fast"]);
}

#[test]
fn stale_failure_does_not_clobber_newer_scan() {
    let mut session = session(FakeAuditor::default());

    let first = session.begin_scan("a").unwrap();
    let second = session.begin_scan("b").unwrap();

    assert_eq!(
        session.finish_scan(&first, Err(overloaded())),
        ScanOutcome::Superseded
    );
    assert!(session.state().loading);
    assert!(session.state().error.is_none());

    session.finish_scan(&second, Ok(profile("b")));
    assert!(!session.state().loading);
}

// -----------------------------------------------------------------------
// strategy
// -----------------------------------------------------------------------

#[tokio::test]
async fn strategy_without_profile_is_unavailable() {
    let mut session = session(FakeAuditor::default());

    let outcome = session.request_strategy().await;

    assert_eq!(outcome, StrategyOutcome::Unavailable);
    assert_eq!(session.auditor.strategy_calls.load(Ordering::SeqCst), 0);
    assert!(!session.state().loading);
}

#[tokio::test]
async fn strategy_after_scan_is_stored() {
    let mut session = session(FakeAuditor::default());
    session.scan("foo", |_| {}).await;

    let outcome = session.request_strategy().await;

    assert_eq!(outcome, StrategyOutcome::Ready);
    assert_eq!(session.state().strategy, Some(strategy()));
    assert!(!session.state().loading);
    assert_eq!(session.auditor.strategy_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn strategy_failure_sets_generic_error() {
    let mut session = session(FakeAuditor {
        fail_strategy: true,
        ..FakeAuditor::default()
    });
    session.scan("foo", |_| {}).await;

    let outcome = session.request_strategy().await;

    assert_eq!(outcome, StrategyOutcome::Failed);
    let state = session.state();
    assert!(!state.loading);
    assert!(state.profile.is_some());
    assert_eq!(state.error.as_deref(), Some(STRATEGY_FAILED_MESSAGE));
}

#[test]
fn strategy_is_unavailable_while_another_is_pending() {
    let mut session = session(FakeAuditor::default());
    let ticket = session.begin_scan("foo").unwrap();
    session.finish_scan(&ticket, Ok(profile("foo")));

    let pending = session.begin_strategy().unwrap();
    assert!(session.state().loading);
    assert!(session.begin_strategy().is_none());

    assert_eq!(
        session.finish_strategy(&pending, Ok(strategy())),
        StrategyOutcome::Ready
    );
}

#[tokio::test]
async fn new_scan_clears_previous_strategy() {
    let mut session = session(FakeAuditor::default());
    session.scan("foo", |_| {}).await;
    session.request_strategy().await;

    session.begin_scan("bar").unwrap();

    assert!(session.state().strategy.is_none());
    assert!(session.state().profile.is_none());
}

#[test]
fn strategy_landing_after_reset_is_discarded() {
    let mut session = session(FakeAuditor::default());
    let ticket = session.begin_scan("foo").unwrap();
    session.finish_scan(&ticket, Ok(profile("foo")));
    let pending = session.begin_strategy().unwrap();

    session.reset();
    let outcome = session.finish_strategy(&pending, Ok(strategy()));

    assert_eq!(outcome, StrategyOutcome::Superseded);
    let state = session.state();
    assert!(state.profile.is_none());
    assert!(state.strategy.is_none());
    assert!(state.error.is_none());
    assert!(!state.loading);
}

#[test]
fn strategy_failure_after_reset_sets_no_error() {
    let mut session = session(FakeAuditor::default());
    let ticket = session.begin_scan("foo").unwrap();
    session.finish_scan(&ticket, Ok(profile("foo")));
    let pending = session.begin_strategy().unwrap();

    session.reset();
    let outcome = session.finish_strategy(&pending, Err(overloaded()));

    assert_eq!(outcome, StrategyOutcome::Superseded);
    assert!(session.state().error.is_none());
    assert!(!session.state().loading);
}

#[tokio::test]
async fn scan_after_discarded_strategy_can_request_again() {
    let mut session = session(FakeAuditor::default());
    session.scan("foo", |_| {}).await;
    let pending = session.begin_strategy().unwrap();
    session.reset();
    session.finish_strategy(&pending, Ok(strategy()));

    session.scan("bar", |_| {}).await;

    assert_eq!(session.request_strategy().await, StrategyOutcome::Ready);
    assert_eq!(session.state().strategy, Some(strategy()));
}

// -----------------------------------------------------------------------
// reset / clear
// -----------------------------------------------------------------------

#[tokio::test]
async fn reset_keeps_history() {
    let mut session = session(FakeAuditor::default());
    session.scan("foo", |_| {}).await;
    session.request_strategy().await;

    session.reset();

    let state = session.state();
    assert!(state.profile.is_none());
    assert!(state.strategy.is_none());
    assert_eq!(state.history.len(), 1);
    assert_eq!(stored_handles(&session), vec!["foo"]);
}

#[tokio::test]
async fn clear_history_wipes_memory_and_store() {
    let mut session = session(FakeAuditor::default());
    session.scan("foo", |_| {}).await;

    session.clear_history().unwrap();

    assert!(session.state().history.is_empty());
    assert_eq!(session.store().get(history::HISTORY_KEY).unwrap(), None);
}
