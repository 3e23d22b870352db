//! Scanned message records.

use crate::{Author, Reaction};
use serde::{Deserialize, Serialize};

/// Platform identifier of a message (a snowflake, so ordered by creation time).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
pub struct MessageId(pub u64);

/// A file attached to a message.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_getters::Getters)]
pub struct Attachment {
    /// Original filename
    filename: String,
    /// MIME type reported by the platform, if any
    content_type: Option<String>,
}

impl Attachment {
    /// Create a new attachment record.
    pub fn new(filename: impl Into<String>, content_type: Option<String>) -> Self {
        Self {
            filename: filename.into(),
            content_type,
        }
    }

    /// Whether the platform reported an `image/*` content type.
    pub fn is_image(&self) -> bool {
        self.content_type
            .as_deref()
            .is_some_and(|ct| ct.starts_with("image/"))
    }
}

/// One message of a channel or thread history, as seen by a scan.
///
/// Messages are read-only; the scan never mutates them.
///
/// # Examples
///
/// ```
/// use rolesweep_core::{Author, AuthorId, MessageId, ScannedMessageBuilder};
///
/// let message = ScannedMessageBuilder::default()
///     .id(MessageId(10))
///     .author(Author::new(AuthorId(1), "ada", false))
///     .content("https://example.com/entry")
///     .build()
///     .unwrap();
///
/// assert!(message.attachments().is_empty());
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_builder::Builder,
)]
#[builder(setter(into))]
pub struct ScannedMessage {
    /// Message identifier
    id: MessageId,
    /// Message author
    author: Author,
    /// Raw message text
    #[builder(default)]
    content: String,
    /// Attached files
    #[builder(default)]
    attachments: Vec<Attachment>,
    /// Reactions with their counts
    #[builder(default)]
    reactions: Vec<Reaction>,
}

impl ScannedMessage {
    /// Create a message record from its parts.
    pub fn new(
        id: MessageId,
        author: Author,
        content: impl Into<String>,
        attachments: Vec<Attachment>,
        reactions: Vec<Reaction>,
    ) -> Self {
        Self {
            id,
            author,
            content: content.into(),
            attachments,
            reactions,
        }
    }

    /// Whether any reaction on this message is a reject marker.
    pub fn has_reject_marker(&self) -> bool {
        self.reactions.iter().any(Reaction::is_reject_marker)
    }
}
