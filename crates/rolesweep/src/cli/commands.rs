//! CLI command definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Rolesweep - assign a role to everyone who posted a valid submission
#[derive(Parser, Debug)]
#[command(name = "rolesweep")]
#[command(about = "Discord bot that assigns a role to valid submitters in a channel or thread", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Read configuration from this file instead of the default locations
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Connect to Discord and serve the scan commands
    Run,

    /// Print the effective configuration as TOML
    Config,
}
