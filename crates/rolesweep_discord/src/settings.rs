//! Discord connection settings.

use serde::{Deserialize, Serialize};

/// Largest page the message history endpoint will return.
pub const MAX_HISTORY_PAGE: u8 = 100;

fn default_token_env() -> String {
    "TOKEN".to_string()
}

fn default_history_page_size() -> u8 {
    MAX_HISTORY_PAGE
}

/// The `[discord]` table of the configuration file.
///
/// # Examples
///
/// ```
/// use rolesweep_discord::DiscordSettings;
///
/// let settings: DiscordSettings = toml::from_str("history_page_size = 250").unwrap();
/// assert_eq!(settings.page_size(), 100);
/// assert_eq!(settings.token_env(), "TOKEN");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct DiscordSettings {
    /// Environment variable holding the bot token
    #[serde(default = "default_token_env")]
    token_env: String,

    /// Messages requested per history page
    #[serde(default = "default_history_page_size")]
    #[getter(skip)]
    history_page_size: u8,
}

impl DiscordSettings {
    /// Create settings with an explicit token variable and page size.
    pub fn new(token_env: impl Into<String>, history_page_size: u8) -> Self {
        Self {
            token_env: token_env.into(),
            history_page_size,
        }
    }

    /// History page size clamped to what the platform accepts.
    pub fn page_size(&self) -> u8 {
        self.history_page_size.clamp(1, MAX_HISTORY_PAGE)
    }
}

impl Default for DiscordSettings {
    fn default() -> Self {
        Self::new(default_token_env(), default_history_page_size())
    }
}
