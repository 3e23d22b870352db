//! Range-bounded history selection.

use crate::parse_message_link;
use rolesweep_core::MessageId;
use rolesweep_error::{LinkBound, ScanError, ScanErrorKind, ScanResult};

/// Exclusive id bounds on the history a scan reads, oldest first.
///
/// A start message with id `s` becomes `after = s - 1` and an end message
/// with id `e` becomes `before = e + 1`, so both referenced messages are
/// included. A missing bound reads to that end of the history.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, derive_getters::Getters)]
pub struct HistoryRange {
    after: Option<MessageId>,
    before: Option<MessageId>,
}

impl HistoryRange {
    /// The whole history.
    pub fn full() -> Self {
        Self::default()
    }

    /// Build a range from inclusive start/end message ids.
    ///
    /// # Errors
    ///
    /// Returns [`ScanErrorKind::InvertedRange`] when both are given and
    /// `start >= end`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rolesweep_core::MessageId;
    /// use rolesweep_scan::HistoryRange;
    ///
    /// let range = HistoryRange::between(Some(MessageId(10)), Some(MessageId(20))).unwrap();
    /// assert_eq!(*range.after(), Some(MessageId(9)));
    /// assert_eq!(*range.before(), Some(MessageId(21)));
    ///
    /// assert!(HistoryRange::between(Some(MessageId(100)), Some(MessageId(50))).is_err());
    /// ```
    pub fn between(start: Option<MessageId>, end: Option<MessageId>) -> ScanResult<Self> {
        if let (Some(start), Some(end)) = (start, end)
            && start >= end
        {
            return Err(ScanError::new(ScanErrorKind::InvertedRange {
                start: start.0,
                end: end.0,
            }));
        }

        Ok(Self {
            after: start.map(|id| MessageId(id.0.saturating_sub(1))),
            before: end.map(|id| MessageId(id.0.saturating_add(1))),
        })
    }

    /// Build a range from optional message links.
    ///
    /// Both links are parsed before ordering is checked, so a malformed link
    /// is reported ahead of an inverted range.
    pub fn from_links(start: Option<&str>, end: Option<&str>) -> ScanResult<Self> {
        let start = start
            .map(|link| parse_message_link(link, LinkBound::Start))
            .transpose()?;
        let end = end
            .map(|link| parse_message_link(link, LinkBound::End))
            .transpose()?;
        Self::between(start, end)
    }

    /// Whether `id` falls strictly inside the bounds.
    pub fn contains(&self, id: MessageId) -> bool {
        self.after.is_none_or(|after| id > after) && self.before.is_none_or(|before| id < before)
    }
}
