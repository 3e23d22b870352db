//! Errors raised while assembling the bot's settings.

/// A settings problem that stops the bot before it connects.
///
/// Covers an unreadable or malformed `rolesweep.toml`, an unknown log level,
/// a missing bot token variable, and a tracing subscriber that fails to install.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Configuration Error: {} at line {} in {}", message, line, file)]
pub struct ConfigError {
    /// What is wrong with the settings, naming the offending key or file.
    pub message: String,
    /// Line of the call that rejected the settings.
    pub line: u32,
    /// Source file of the call that rejected the settings.
    pub file: &'static str,
}

impl ConfigError {
    /// Reject the settings with `message`, recording the caller's location.
    ///
    /// # Examples
    ///
    /// ```
    /// use rolesweep_error::ConfigError;
    ///
    /// let err = ConfigError::new("No DISCORD_TOKEN environment variable set.");
    /// assert!(err.message.contains("DISCORD_TOKEN"));
    /// assert!(err.to_string().starts_with("Configuration Error"));
    /// ```
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}
