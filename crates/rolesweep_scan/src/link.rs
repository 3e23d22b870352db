//! Message-link parsing.

use rolesweep_core::MessageId;
use rolesweep_error::{LinkBound, ScanError, ScanErrorKind, ScanResult};

/// Extract the message id from a message link.
///
/// Accepts anything whose last `/`-separated segment is a non-zero integer,
/// so both full links and bare ids work.
///
/// # Examples
///
/// ```
/// use rolesweep_core::MessageId;
/// use rolesweep_error::LinkBound;
/// use rolesweep_scan::parse_message_link;
///
/// let id = parse_message_link(
///     "https://discord.com/channels/1/2/1234567890",
///     LinkBound::Start,
/// )
/// .unwrap();
/// assert_eq!(id, MessageId(1234567890));
/// ```
pub fn parse_message_link(link: &str, bound: LinkBound) -> ScanResult<MessageId> {
    let invalid = || {
        ScanError::new(ScanErrorKind::InvalidMessageLink {
            bound,
            link: link.to_string(),
        })
    };

    let segment = link.trim().rsplit('/').next().ok_or_else(invalid)?;
    match segment.parse::<u64>() {
        Ok(0) | Err(_) => Err(invalid()),
        Ok(id) => Ok(MessageId(id)),
    }
}
