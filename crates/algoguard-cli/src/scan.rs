//! `scan` command handler.

use std::process::ExitCode;

use algoguard_session::{AuditService, KeyValueStore, ScanOutcome, Session, StrategyOutcome};

use crate::render::{self, ScanReport};

/// Audit `input`, optionally follow up with a strategy, and print the result.
///
/// Service failures are reported through the fixed state error and a failing
/// exit code; they are not returned as `Err`.
///
/// # Errors
///
/// Returns an error if `input` holds no handle or the JSON report cannot be
/// serialized.
pub(crate) async fn run_scan<A, S>(
    session: &mut Session<A, S>,
    input: &str,
    with_strategy: bool,
    json: bool,
) -> anyhow::Result<ExitCode>
where
    A: AuditService,
    S: KeyValueStore,
{
    let outcome = session
        .scan(input, |line| {
            if !json {
                println!("{}", render::narration_line(line));
            }
        })
        .await;

    match outcome {
        ScanOutcome::Ignored => {
            anyhow::bail!("no handle found in '{input}'; pass @name or a profile link")
        }
        ScanOutcome::Completed if with_strategy => {
            let strategy = session.request_strategy().await;
            tracing::debug!(?strategy, "strategy request finished");
            if strategy == StrategyOutcome::Unavailable {
                tracing::warn!("strategy unavailable after a completed scan");
            }
        }
        ScanOutcome::Completed | ScanOutcome::Failed | ScanOutcome::Superseded => {}
    }

    let state = session.state();
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&ScanReport::from_state(state))?
        );
    } else {
        println!();
        println!("{}", render::render_state(state));
    }

    Ok(if state.error.is_some() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}
