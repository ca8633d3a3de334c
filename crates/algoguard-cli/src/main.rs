mod history;
mod render;
mod scan;
mod shell;

use std::process::ExitCode;

use algoguard_core::AppConfig;
use algoguard_gemini::GeminiClient;
use algoguard_session::{FileStore, Narrator, Session};
use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "algoguard")]
#[command(about = "Algorithm health audits for TikTok handles")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Audit a handle or profile link and print the dashboard
    Scan {
        /// Handle (`@name`, `name`) or profile link (`https://tiktok.com/@name/...`)
        input: String,

        /// Also generate a boost strategy for the audited profile
        #[arg(long)]
        strategy: bool,

        /// Print the result as JSON instead of the text dashboard
        #[arg(long)]
        json: bool,

        /// Skip the narration delays
        #[arg(long)]
        fast: bool,
    },
    /// Show or clear the recent scan history
    History {
        #[command(subcommand)]
        command: Option<HistoryCommands>,

        /// Print the history as JSON
        #[arg(long)]
        json: bool,
    },
    /// Interactive session (default when no command is given)
    Shell {
        /// Skip the narration delays
        #[arg(long)]
        fast: bool,
    },
}

#[derive(Debug, Subcommand)]
enum HistoryCommands {
    /// Remove every stored scan
    Clear,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Shell { fast: false }) {
        Commands::Scan {
            input,
            strategy,
            json,
            fast,
        } => {
            let config = load_config()?;
            let mut session = build_session(&config, fast)?;
            scan::run_scan(&mut session, &input, strategy, json).await
        }
        Commands::History { command, json } => {
            init_tracing(&algoguard_core::log_level_from_env())?;
            let store = FileStore::new(algoguard_core::state_dir_from_env());
            match command {
                Some(HistoryCommands::Clear) => history::run_history_clear(&store)?,
                None => history::run_history_list(&store, json)?,
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::Shell { fast } => {
            let config = load_config()?;
            let mut session = build_session(&config, fast)?;
            shell::run_shell(&mut session).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// `RUST_LOG` wins; otherwise `default_level` is used as the filter directive.
fn init_tracing(default_level: &str) -> anyhow::Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(default_level))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

/// Loads the full configuration and installs logging from its `log_level`.
fn load_config() -> anyhow::Result<AppConfig> {
    let config = algoguard_core::load_app_config().context("failed to load configuration")?;
    init_tracing(&config.log_level)?;
    tracing::debug!(?config, "configuration loaded");
    Ok(config)
}

/// Builds a session backed by the hosted completion service and the
/// on-disk history store.
fn build_session(
    config: &AppConfig,
    fast: bool,
) -> anyhow::Result<Session<GeminiClient, FileStore>> {
    let client = GeminiClient::with_base_url(
        &config.gemini_api_key,
        &config.gemini_model,
        config.request_timeout_secs,
        &config.gemini_base_url,
    )?;
    tracing::debug!(model = %config.gemini_model, state_dir = %config.state_dir.display(), "session ready");

    Ok(Session::new(
        client,
        FileStore::new(&config.state_dir),
        narrator_for(config, fast),
    ))
}

fn narrator_for(config: &AppConfig, fast: bool) -> Narrator {
    if fast {
        Narrator::instant()
    } else {
        Narrator::from_millis(config.narration_min_delay_ms, config.narration_max_delay_ms)
    }
}
