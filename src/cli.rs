//! Command-line interface for strictly_guess.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Strictly Guess - number guessing game with a persisted leaderboard
#[derive(Parser, Debug)]
#[command(name = "strictly_guess")]
#[command(
    about = "Number guessing game with difficulty tiers and a top-10 leaderboard",
    long_about = None
)]
#[command(version)]
pub struct Cli {
    /// TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Leaderboard JSON file (overrides the config file)
    #[arg(long, global = true)]
    pub leaderboard: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play in the terminal
    Play {
        /// Difficulty: easy, medium, or hard
        #[arg(short, long)]
        difficulty: Option<String>,
    },

    /// Run the HTTP game server
    Http {
        /// Port to bind to
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to
        #[arg(long)]
        host: Option<String>,
    },

    /// Print the leaderboard
    Leaderboard,
}
