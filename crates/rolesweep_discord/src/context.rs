//! Shared state handed to the event handler.

use crate::DiscordSettings;
use rolesweep_scan::ScanSettings;

/// Settings every command invocation reads.
///
/// Built once at startup from configuration and shared behind an `Arc`.
#[derive(Debug, Clone, Default, PartialEq, Eq, derive_getters::Getters)]
pub struct BotContext {
    /// Executor pacing and report settings
    scan: ScanSettings,
    /// Platform settings
    discord: DiscordSettings,
}

impl BotContext {
    /// Create a context from loaded settings.
    pub fn new(scan: ScanSettings, discord: DiscordSettings) -> Self {
        Self { scan, discord }
    }
}
