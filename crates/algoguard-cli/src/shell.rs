//! Interactive session: one command per stdin line against a long-lived
//! [`Session`].

use std::io::Write as _;

use algoguard_session::{AuditService, KeyValueStore, ScanOutcome, Session, StrategyOutcome};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::render;

const HELP: &str = "\
commands:
  scan <handle|link>   audit a handle (`@name`, `name`, or a profile link)
  fix                  generate a boost strategy for the current profile
  reset                clear the current profile and strategy
  history              list recent scans
  clear                forget scan history
  help                 show this message
  quit                 leave the shell";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ShellCommand {
    Scan(String),
    Fix,
    Reset,
    History,
    ClearHistory,
    Help,
    Quit,
    Empty,
    Unknown(String),
}

pub(crate) fn parse_shell_line(line: &str) -> ShellCommand {
    let line = line.trim();
    let (command, rest) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(command, rest)| (command, rest.trim()));

    match command.to_ascii_lowercase().as_str() {
        "" => ShellCommand::Empty,
        "scan" | "audit" => ShellCommand::Scan(rest.to_string()),
        "fix" | "strategy" | "boost" => ShellCommand::Fix,
        "reset" | "new" => ShellCommand::Reset,
        "history" => ShellCommand::History,
        "clear" => ShellCommand::ClearHistory,
        "help" | "?" => ShellCommand::Help,
        "quit" | "exit" | "q" => ShellCommand::Quit,
        other => ShellCommand::Unknown(other.to_string()),
    }
}

fn prompt() -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    write!(stdout, "algoguard> ")?;
    stdout.flush()
}

/// Read commands from stdin until `quit` or end of input.
///
/// # Errors
///
/// Returns an error if stdin cannot be read or stdout cannot be flushed.
pub(crate) async fn run_shell<A, S>(session: &mut Session<A, S>) -> anyhow::Result<()>
where
    A: AuditService,
    S: KeyValueStore,
{
    println!("Algorithmic Guard. Type `help` for commands.");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    prompt()?;
    while let Some(line) = lines.next_line().await? {
        match parse_shell_line(&line) {
            ShellCommand::Scan(input) => {
                let outcome = session
                    .scan(&input, |step| println!("{}", render::narration_line(step)))
                    .await;
                if outcome == ScanOutcome::Ignored {
                    println!("enter a handle or profile link, e.g. `scan @name`");
                } else {
                    println!("{}", render::render_state(session.state()));
                }
            }
            ShellCommand::Fix => match session.request_strategy().await {
                StrategyOutcome::Unavailable => println!("run a scan first"),
                _ => println!("{}", render::render_state(session.state())),
            },
            ShellCommand::Reset => {
                session.reset();
                println!("cleared; ready for a new scan");
            }
            ShellCommand::History => {
                println!("{}", render::render_history(&session.state().history));
            }
            ShellCommand::ClearHistory => match session.clear_history() {
                Ok(()) => println!("history cleared"),
                Err(e) => {
                    let message = format!("could not clear history: {e}");
                    println!("{}", render::error_line(&message));
                }
            },
            ShellCommand::Help => println!("{HELP}"),
            ShellCommand::Quit => break,
            ShellCommand::Empty => {}
            ShellCommand::Unknown(command) => {
                println!("unknown command '{command}'; type `help`");
            }
        }
        prompt()?;
    }

    Ok(())
}
