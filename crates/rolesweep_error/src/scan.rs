//! Scan precondition and run-fatal error types.
//!
//! Everything here aborts a scan before or during history consumption.
//! Per-author grant failures are not errors of the run and live in
//! `rolesweep_core` as report data instead.

use derive_getters::Getters;

/// Which end of a history range a message link was supplied for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum LinkBound {
    /// The `start_message` argument.
    #[display("start")]
    Start,
    /// The `end_message` argument.
    #[display("end")]
    End,
}

/// Specific scan error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ScanErrorKind {
    /// Target role ranks at or above the bot's highest role.
    #[display("Role '{}' is not below the bot's highest role", role)]
    HierarchyViolation {
        /// Name of the target role
        role: String,
    },

    /// A message link could not be turned into a message id.
    #[display("Invalid {} message link: {}", bound, link)]
    InvalidMessageLink {
        /// Which bound the link was given for
        bound: LinkBound,
        /// The raw link text
        link: String,
    },

    /// Start bound is not strictly older than the end bound.
    #[display("Start message {} is not older than end message {}", start, end)]
    InvertedRange {
        /// Start message id
        start: u64,
        /// End message id
        end: u64,
    },

    /// Thread command invoked outside of a thread.
    #[display("Command must be used inside a thread")]
    NotAThread,

    /// Thread is archived and could not be reopened.
    #[display("Thread {} is archived and could not be unarchived", _0)]
    ThreadArchived(u64),

    /// Invoker lacks role-management authority.
    #[display("Invoker lacks the Manage Roles permission")]
    MissingAuthority,

    /// Command was used outside of a guild.
    #[display("Command must be used inside a server")]
    NotInGuild,

    /// A required command option was absent or had the wrong type.
    #[display("Missing or invalid option: {}", _0)]
    InvalidOption(String),

    /// Fetching message history failed part way through.
    #[display("History fetch failed: {}", _0)]
    History(String),
}

impl ScanErrorKind {
    /// Text shown to the invoking moderator.
    ///
    /// Precondition failures are only ever surfaced to the caller, so this is
    /// phrased for a person rather than a log line.
    pub fn user_message(&self) -> String {
        match self {
            Self::HierarchyViolation { .. } => "❌ I can't assign that role — it's higher than or \
                 equal to my highest role. Please move my bot role above the target role in \
                 Server Settings → Roles."
                .to_string(),
            Self::InvalidMessageLink { bound, .. } => format!(
                "❌ Invalid {} message link. Right-click a message → Copy Message Link.",
                bound
            ),
            Self::InvertedRange { .. } => {
                "❌ Start message must be older than the end message.".to_string()
            }
            Self::NotAThread => "❌ This command must be used inside a thread.".to_string(),
            Self::ThreadArchived(_) => {
                "❌ This thread is archived and I couldn't unarchive it.".to_string()
            }
            Self::MissingAuthority => {
                "❌ You need the **Manage Roles** permission to use this command.".to_string()
            }
            Self::NotInGuild => "❌ This command can only be used inside a server.".to_string(),
            Self::InvalidOption(name) => format!("❌ Missing or invalid option `{}`.", name),
            Self::History(reason) => {
                format!("❌ An unexpected error occurred: `{}`", reason)
            }
        }
    }
}

/// Scan error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error, Getters)]
#[display("Scan Error: {} at line {} in {}", kind, line, file)]
pub struct ScanError {
    kind: ScanErrorKind,
    line: u32,
    file: &'static str,
}

impl ScanError {
    /// Create a new scan error with caller location tracking.
    ///
    /// # Examples
    ///
    /// ```
    /// use rolesweep_error::{ScanError, ScanErrorKind};
    ///
    /// let err = ScanError::new(ScanErrorKind::InvertedRange { start: 100, end: 50 });
    /// assert!(err.kind().user_message().contains("older"));
    /// ```
    #[track_caller]
    pub fn new(kind: ScanErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

/// Result type for scan operations.
pub type ScanResult<T> = Result<T, ScanError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_location() {
        let err = ScanError::new(ScanErrorKind::NotAThread);
        let rendered = err.to_string();
        assert!(rendered.starts_with("Scan Error: Command must be used inside a thread"));
        assert!(rendered.contains("scan.rs"));
    }

    #[test]
    fn test_link_error_names_bound() {
        let kind = ScanErrorKind::InvalidMessageLink {
            bound: LinkBound::End,
            link: "nope".to_string(),
        };
        assert!(kind.user_message().contains("Invalid end message link"));
        assert_eq!(kind.to_string(), "Invalid end message link: nope");
    }

    #[test]
    fn test_hierarchy_message_mentions_settings() {
        let kind = ScanErrorKind::HierarchyViolation {
            role: "Winner".to_string(),
        };
        assert!(kind.user_message().contains("Server Settings"));
    }
}
