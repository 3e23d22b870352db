//! Invoker authorization guard.

use rolesweep_error::{ScanError, ScanErrorKind, ScanResult};
use tracing::{debug, instrument};

/// Role-management authority of the member invoking a command.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct InvokerAuthority {
    /// Invoker owns the guild
    pub is_owner: bool,
    /// Invoker holds Manage Roles
    pub manage_roles: bool,
    /// Invoker holds Administrator
    pub administrator: bool,
}

/// Check that the invoker may run a scan.
///
/// Guild owners, and members with Manage Roles or Administrator, pass.
///
/// # Examples
///
/// ```
/// use rolesweep_scan::{InvokerAuthority, authorize};
///
/// let moderator = InvokerAuthority { manage_roles: true, ..Default::default() };
/// assert!(authorize(&moderator).is_ok());
/// assert!(authorize(&InvokerAuthority::default()).is_err());
/// ```
#[instrument(level = "debug")]
pub fn authorize(authority: &InvokerAuthority) -> ScanResult<()> {
    if authority.is_owner || authority.manage_roles || authority.administrator {
        debug!("Invoker authorized");
        Ok(())
    } else {
        Err(ScanError::new(ScanErrorKind::MissingAuthority))
    }
}
