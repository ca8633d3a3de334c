//! `history` command handlers. These only touch the on-disk store, so they
//! run without an API key.

use algoguard_session::{history, KeyValueStore};

use crate::render;

/// Print the stored scans, newest first.
///
/// # Errors
///
/// Returns an error if the history cannot be serialized for `--json`.
pub(crate) fn run_history_list<S: KeyValueStore>(store: &S, json: bool) -> anyhow::Result<()> {
    let entries = history::load(store);

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else {
        println!("{}", render::render_history(&entries));
    }
    Ok(())
}

/// Remove the stored history entry.
///
/// # Errors
///
/// Returns an error if the store cannot delete the entry.
pub(crate) fn run_history_clear<S: KeyValueStore>(store: &S) -> anyhow::Result<()> {
    store.remove(history::HISTORY_KEY)?;
    tracing::info!("scan history cleared");
    println!("history cleared");
    Ok(())
}
