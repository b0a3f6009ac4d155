// waterlog - local hydration log
// Entry point and command dispatch

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use waterlog::app;
use waterlog::commands::{drinks, settings, stats};
use waterlog::error::AppError;

#[derive(Debug, Parser)]
#[command(name = "waterlog")]
#[command(about = "Track what you drink and how close you are to your daily goal", long_about = None)]
struct Cli {
    /// Directory holding the database (defaults to the platform data dir)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Record a drink
    Add(drinks::AddArgs),
    /// Show today's progress towards the goal
    Today,
    /// List drinks for a day, most recent first
    Log(drinks::LogArgs),
    /// Show the last seven days
    Week,
    /// Show all-time hydration per drink type
    Breakdown,
    /// Remove the most recently recorded drink
    Undo,
    /// Delete a drink by ID
    Delete(drinks::DeleteArgs),
    /// View or change settings
    Settings(settings::SettingsArgs),
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let data_dir = match cli.data_dir {
        Some(dir) => dir,
        None => app::default_data_dir()?,
    };

    let state = app::setup(&data_dir)
        .with_context(|| format!("Failed to prepare data directory {}", data_dir.display()))?;

    let json = cli.json;
    match cli.command {
        Commands::Add(args) => drinks::add(&state, args, json).await?,
        Commands::Today => stats::today(&state, json).await?,
        Commands::Log(args) => drinks::log(&state, args, json).await?,
        Commands::Week => stats::week(&state, json).await?,
        Commands::Breakdown => stats::breakdown(&state, json).await?,
        Commands::Undo => drinks::undo(&state, json).await?,
        Commands::Delete(args) => drinks::delete(&state, args, json).await?,
        Commands::Settings(args) => settings::execute(&state, args, json).await?,
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    // Logs go to stderr so stdout stays clean for --json
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "waterlog=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let json = cli.json;

    tracing::debug!("Starting waterlog");

    if let Err(e) = run(cli).await {
        if json {
            let body = match e.downcast_ref::<AppError>() {
                Some(app_error) => serde_json::json!({ "error": app_error }),
                None => serde_json::json!({ "error": format!("{:#}", e) }),
            };
            println!("{}", body);
        } else {
            eprintln!("Error: {:#}", e);
        }
        std::process::exit(1);
    }
}
