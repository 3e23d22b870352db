//! Rolesweep CLI binary.

use clap::Parser;

mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{Cli, Commands, run_bot, show_config};

    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run => run_bot(cli.config.as_deref(), cli.verbose).await?,
        Commands::Config => show_config(cli.config.as_deref())?,
    }

    Ok(())
}
