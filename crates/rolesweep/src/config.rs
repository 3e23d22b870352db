//! Layered configuration for the rolesweep binary.
//!
//! Sources, later overriding earlier:
//! 1. Bundled defaults (`rolesweep.toml` shipped with the crate)
//! 2. `~/.config/rolesweep/rolesweep.toml`
//! 3. `./rolesweep.toml`
//!
//! The bot token never lives in a file; it is read from the environment
//! variable named by `discord.token_env`, which `.env` may populate.

use crate::LoggingSettings;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, File, FileFormat};
use rolesweep_discord::{BotContext, DiscordSettings};
use rolesweep_error::{ConfigError, RolesweepError, RolesweepResult};
use rolesweep_scan::ScanSettings;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, instrument};

/// Bundled default configuration.
const DEFAULT_CONFIG: &str = include_str!("../../../rolesweep.toml");

/// Complete rolesweep configuration.
///
/// # Example
///
/// ```no_run
/// use rolesweep::RolesweepConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = RolesweepConfig::load()?;
/// let token = config.token()?;
/// # Ok(())
/// # }
/// ```
#[derive(
    Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters,
)]
pub struct RolesweepConfig {
    /// Executor pacing and report settings
    #[serde(default)]
    scan: ScanSettings,

    /// Discord connection settings
    #[serde(default)]
    discord: DiscordSettings,

    /// Log output settings
    #[serde(default)]
    logging: LoggingSettings,
}

fn build(builder: ConfigBuilder<DefaultState>) -> RolesweepResult<RolesweepConfig> {
    builder
        .build()
        .map_err(|e| {
            RolesweepError::from(ConfigError::new(format!(
                "Failed to build configuration: {}",
                e
            )))
        })?
        .try_deserialize()
        .map_err(|e| {
            RolesweepError::from(ConfigError::new(format!(
                "Failed to parse configuration: {}",
                e
            )))
        })
}

impl RolesweepConfig {
    /// Load configuration with precedence: current dir > home dir > bundled defaults.
    ///
    /// User config files are optional and silently skipped when absent.
    #[instrument]
    pub fn load() -> RolesweepResult<Self> {
        debug!("Loading configuration with precedence: current dir > home dir > bundled defaults");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/rolesweep/rolesweep.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder.add_source(File::with_name("rolesweep").required(false));

        build(builder)
    }

    /// Load bundled defaults overridden by a single file.
    ///
    /// Unlike [`load`](Self::load), the file must exist.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> RolesweepResult<Self> {
        debug!("Loading configuration from file");

        let builder = Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
            .add_source(File::from(path.as_ref()).required(true));

        build(builder)
    }

    /// Parse configuration from a TOML string layered over bundled defaults.
    pub fn from_toml(contents: &str) -> RolesweepResult<Self> {
        let builder = Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
            .add_source(File::from_str(contents, FileFormat::Toml));

        build(builder)
    }

    /// Render the effective configuration as TOML.
    pub fn to_toml(&self) -> RolesweepResult<String> {
        toml::to_string_pretty(self).map_err(|e| {
            RolesweepError::from(ConfigError::new(format!(
                "Failed to serialize configuration: {}",
                e
            )))
        })
    }

    /// Read the bot token from the environment.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when the variable is unset or blank.
    pub fn token(&self) -> RolesweepResult<String> {
        self.token_from(|name| std::env::var(name).ok())
    }

    /// Resolve the bot token through `lookup`.
    pub fn token_from(&self, lookup: impl Fn(&str) -> Option<String>) -> RolesweepResult<String> {
        let name = self.discord.token_env();
        match lookup(name) {
            Some(token) if !token.trim().is_empty() => Ok(token),
            _ => Err(ConfigError::new(format!("No {} environment variable set.", name)).into()),
        }
    }

    /// Settings shared with the Discord event handler.
    pub fn bot_context(&self) -> BotContext {
        BotContext::new(self.scan.clone(), self.discord.clone())
    }
}
