//! Stage 1: fold the message stream into per-author state.

use crate::Resolution;
use rolesweep_core::{AttachmentFilter, Author, AuthorId, ScannedMessage};
use std::collections::HashMap;
use tracing::trace;

/// Everything a scan learns about one author.
#[derive(Debug, Clone, PartialEq, Eq, derive_getters::Getters)]
pub struct AuthorTally {
    /// The author as first seen
    author: Author,
    /// Non-bot messages from this author
    messages: usize,
    /// Messages skipped because of a reject marker
    rejected_messages: usize,
    /// At least one unmarked message failed the filter
    filter_failed: bool,
    /// At least one message was unmarked and passed the filter
    clean: bool,
}

impl AuthorTally {
    fn new(author: Author) -> Self {
        Self {
            author,
            messages: 0,
            rejected_messages: 0,
            filter_failed: false,
            clean: false,
        }
    }
}

/// Streaming aggregation over a message history.
///
/// An author becomes eligible the moment one of their messages both lacks a
/// reject marker and passes the filter. Later disqualifying messages never
/// revoke that.
///
/// # Examples
///
/// ```
/// use rolesweep_core::{AttachmentFilter, Author, AuthorId, MessageId, ScannedMessageBuilder};
/// use rolesweep_scan::Aggregation;
///
/// let mut aggregation = Aggregation::new(AttachmentFilter::None);
/// aggregation.observe(
///     &ScannedMessageBuilder::default()
///         .id(MessageId(1))
///         .author(Author::new(AuthorId(7), "ada", false))
///         .build()
///         .unwrap(),
/// );
///
/// let resolution = aggregation.resolve();
/// assert_eq!(resolution.eligible().len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct Aggregation {
    filter: AttachmentFilter,
    order: Vec<AuthorId>,
    tallies: HashMap<AuthorId, AuthorTally>,
    messages: usize,
    bot_messages: usize,
}

impl Aggregation {
    /// Start an empty aggregation using `filter` as the eligibility predicate.
    pub fn new(filter: AttachmentFilter) -> Self {
        Self {
            filter,
            order: Vec::new(),
            tallies: HashMap::new(),
            messages: 0,
            bot_messages: 0,
        }
    }

    /// Fold one message into the aggregate.
    pub fn observe(&mut self, message: &ScannedMessage) {
        self.messages += 1;

        let author = message.author();
        if *author.bot() {
            self.bot_messages += 1;
            return;
        }

        let id = *author.id();
        let tally = self.tallies.entry(id).or_insert_with(|| {
            self.order.push(id);
            AuthorTally::new(author.clone())
        });
        tally.messages += 1;

        if message.has_reject_marker() {
            trace!(author = %author.id(), message = %message.id(), "Reject marker present");
            tally.rejected_messages += 1;
            return;
        }

        if !self.filter.passes(message) {
            trace!(author = %author.id(), message = %message.id(), filter = %self.filter, "Filter failed");
            tally.filter_failed = true;
            return;
        }

        tally.clean = true;
    }

    /// Messages observed so far, bots included.
    pub fn messages(&self) -> usize {
        self.messages
    }

    /// Messages skipped because their author is a bot.
    pub fn bot_messages(&self) -> usize {
        self.bot_messages
    }

    /// Distinct non-bot authors seen so far.
    pub fn authors(&self) -> usize {
        self.order.len()
    }

    /// Tally for one author, if seen.
    pub fn tally(&self, id: &AuthorId) -> Option<&AuthorTally> {
        self.tallies.get(id)
    }

    /// Finish the pass and derive the eligibility sets.
    pub fn resolve(self) -> Resolution {
        let Self {
            order, mut tallies, ..
        } = self;
        let tallies = order
            .into_iter()
            .filter_map(|id| tallies.remove(&id))
            .collect();
        Resolution::from_tallies(tallies)
    }
}
