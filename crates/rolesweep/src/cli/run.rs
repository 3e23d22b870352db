//! Command handlers.

use rolesweep::{RolesweepBot, RolesweepConfig, RolesweepResult, init_logging};
use std::path::Path;
use tracing::info;

fn load_config(path: Option<&Path>) -> RolesweepResult<RolesweepConfig> {
    match path {
        Some(path) => RolesweepConfig::from_file(path),
        None => RolesweepConfig::load(),
    }
}

/// Start the bot and serve commands until the gateway closes.
pub async fn run_bot(config_path: Option<&Path>, verbose: bool) -> RolesweepResult<()> {
    let config = load_config(config_path)?;
    init_logging(config.logging(), verbose)?;

    let token = config.token()?;
    info!(
        grant_delay_ms = config.scan().grant_delay_ms(),
        progress_every = config.scan().progress_every(),
        "Configuration loaded"
    );

    let mut bot = RolesweepBot::new(token, config.bot_context()).await?;
    bot.start().await?;
    Ok(())
}

/// Print the effective configuration.
pub fn show_config(config_path: Option<&Path>) -> RolesweepResult<()> {
    let config = load_config(config_path)?;
    println!("{}", config.to_toml()?);
    Ok(())
}
