//! Top-level error wrapper types.

use crate::{ConfigError, DiscordError, ScanError};

/// The foundation error enum for the rolesweep workspace.
///
/// # Examples
///
/// ```
/// use rolesweep_error::{ConfigError, RolesweepError};
///
/// let err: RolesweepError = ConfigError::new("missing token").into();
/// assert!(format!("{}", err).contains("Configuration Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum RolesweepErrorKind {
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Scan precondition or history failure
    #[from(ScanError)]
    Scan(ScanError),
    /// Discord platform error
    #[from(DiscordError)]
    Discord(DiscordError),
}

/// Rolesweep error with kind discrimination.
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Rolesweep Error: {}", _0)]
pub struct RolesweepError(Box<RolesweepErrorKind>);

impl RolesweepError {
    /// Create a new error from a kind.
    pub fn new(kind: RolesweepErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &RolesweepErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to RolesweepErrorKind
impl<T> From<T> for RolesweepError
where
    T: Into<RolesweepErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for rolesweep operations.
pub type RolesweepResult<T> = std::result::Result<T, RolesweepError>;
