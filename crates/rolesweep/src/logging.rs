//! Tracing subscriber setup.

use rolesweep_error::{ConfigError, RolesweepResult};
use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

fn default_level() -> String {
    "info".to_string()
}

/// The `[logging]` table of the configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct LoggingSettings {
    /// Filter used when `RUST_LOG` is unset
    #[serde(default = "default_level")]
    level: String,

    /// Emit JSON-formatted logs
    #[serde(default)]
    json: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_level(),
            json: false,
        }
    }
}

impl LoggingSettings {
    /// Build the filter: `RUST_LOG` wins, then `--verbose`, then the configured level.
    pub fn filter(&self, verbose: bool) -> RolesweepResult<EnvFilter> {
        if let Ok(filter) = EnvFilter::try_from_default_env() {
            return Ok(filter);
        }

        let level = if verbose { "debug" } else { self.level.as_str() };
        EnvFilter::try_new(level).map_err(|e| {
            ConfigError::new(format!("Invalid log level '{}': {}", level, e)).into()
        })
    }
}

/// Install the global tracing subscriber.
///
/// # Errors
///
/// Returns an error if the log level does not parse or a subscriber is
/// already installed.
pub fn init_logging(settings: &LoggingSettings, verbose: bool) -> RolesweepResult<()> {
    let filter = settings.filter(verbose)?;

    let installed = if settings.json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .with_target(true)
            .try_init()
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .try_init()
    };

    installed
        .map_err(|e| ConfigError::new(format!("Failed to initialize logging: {}", e)).into())
}
