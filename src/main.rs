//! Strictly Guess - Unified CLI
//!
//! Number guessing game playable in the terminal or over HTTP.

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use strictly_guess::{
    AppConfig, DifficultyTable, GameService, LeaderboardRepository, render_leaderboard,
};
use tracing::{info, instrument};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    initialize_tracing();

    let mut config = AppConfig::load(cli.config.as_deref())?;
    if let Some(path) = cli.leaderboard {
        config = config.with_leaderboard_path(path);
    }

    match cli.command {
        Command::Play { difficulty } => run_play(&config, difficulty),
        Command::Http { port, host } => run_http(config.with_bind(host, port)).await,
        Command::Leaderboard => run_leaderboard(&config),
    }
}

#[instrument(skip(config))]
fn build_service(config: &AppConfig) -> GameService {
    let repository =
        LeaderboardRepository::new(config.leaderboard_path()).strict(*config.strict_store());
    GameService::new(DifficultyTable::standard(), repository)
}

/// Play in the terminal
fn run_play(config: &AppConfig, difficulty: Option<String>) -> Result<()> {
    let service = build_service(config);
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    strictly_guess::play(&service, difficulty.as_deref(), stdin.lock(), &mut stdout)?;
    info!("Goodbye");
    Ok(())
}

/// Run the HTTP game server
async fn run_http(config: AppConfig) -> Result<()> {
    info!(host = %config.host(), port = config.port(), "Starting Strictly Guess HTTP server");
    let service = build_service(&config);
    strictly_guess::serve(service, config.host(), *config.port()).await?;
    Ok(())
}

/// Print the leaderboard
fn run_leaderboard(config: &AppConfig) -> Result<()> {
    let service = build_service(config);
    let entries = service.leaderboard()?;
    render_leaderboard(&mut std::io::stdout(), &entries)?;
    Ok(())
}

fn initialize_tracing() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,strictly_guess=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
