//! QuillArbiter daemon: entry point for running and inspecting a court.

mod simulate;

use anyhow::Context;
use clap::Parser;
use quill_court::{CourtConfig, CourtSnapshot};
use quill_utils::{init_logging, LogFormat};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "quill", about = "QuillArbiter dispute-resolution court")]
struct Cli {
    /// Path to a TOML configuration file. If provided, file settings are used
    /// as the base; CLI flags and env vars override them.
    #[arg(long, env = "QUILL_CONFIG")]
    config: Option<PathBuf>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "QUILL_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format: "human" or "json".
    #[arg(long, env = "QUILL_LOG_FORMAT")]
    log_format: Option<LogFormat>,

    /// Subcommand.
    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Print the effective configuration as TOML.
    Config,

    /// Run a complete dispute through a fresh court on simulated time.
    Simulate(simulate::SimulateArgs),

    /// Summarize a snapshot file written by `simulate --snapshot`.
    Inspect {
        /// Snapshot path.
        path: PathBuf,

        /// Print the full snapshot as JSON instead of a summary.
        #[arg(long)]
        json: bool,
    },
}

fn load_config(cli: &Cli) -> anyhow::Result<CourtConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let path_str = path.to_string_lossy();
            CourtConfig::from_toml_file(&path_str)
                .with_context(|| format!("loading config from {}", path.display()))?
        }
        None => CourtConfig::default(),
    };
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
    if let Some(format) = cli.log_format {
        config.log_format = format;
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;
    init_logging(config.log_format, &config.log_level);
    if let Some(path) = &cli.config {
        tracing::info!("Loaded config from {}", path.display());
    }

    match cli.command {
        Command::Config => {
            print!("{}", config.to_toml_string());
        }
        Command::Simulate(args) => {
            simulate::run(&config, args).await?;
        }
        Command::Inspect { path, json } => {
            let snapshot = CourtSnapshot::read_from(&path)
                .with_context(|| format!("reading snapshot {}", path.display()))?;
            if json {
                println!("{}", snapshot.to_json()?);
            } else {
                println!("snapshot v{} taken at {}", snapshot.version, snapshot.taken_at);
                println!("  jurors:    {} ({} active)", snapshot.stake.juror_count(), snapshot.stake.active_jurors().len());
                println!("  staked:    {}", snapshot.stake.total_staked());
                println!("  burned:    {}", snapshot.stake.total_burned());
                println!("  disputes:  {}", snapshot.disputes.total_disputes());
                println!("  sessions:  {}", snapshot.voting.session_count());
                println!("  appeals:   {}", snapshot.appeals.total_appeals());
                println!("  evidence:  {}", snapshot.evidence.total_evidence());
                println!("  events:    {}", snapshot.events.len());
            }
        }
    }

    Ok(())
}
