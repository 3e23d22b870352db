//! Attachment filter modes.

use crate::ScannedMessage;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static URL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://\S+").expect("valid URL pattern"));

fn any_message(_message: &ScannedMessage) -> bool {
    true
}

fn has_image(message: &ScannedMessage) -> bool {
    message.attachments().iter().any(|a| a.is_image())
}

fn has_link(message: &ScannedMessage) -> bool {
    URL_PATTERN.is_match(message.content())
}

/// Eligibility predicate applied to each message's payload.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumIter,
    derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum AttachmentFilter {
    /// Every message passes
    #[default]
    #[display("none")]
    None,
    /// Message must carry an `image/*` attachment
    #[display("image")]
    Image,
    /// Message text must contain an http(s) URL
    #[display("link")]
    Link,
}

impl AttachmentFilter {
    /// Convert to the string used for command option values.
    pub fn as_str(&self) -> &'static str {
        match self {
            AttachmentFilter::None => "none",
            AttachmentFilter::Image => "image",
            AttachmentFilter::Link => "link",
        }
    }

    /// Label shown in the final report.
    pub fn report_label(&self) -> &'static str {
        match self {
            AttachmentFilter::None => "None (everyone)",
            AttachmentFilter::Image => "Image only",
            AttachmentFilter::Link => "URL/Link only",
        }
    }

    /// Label shown as a slash-command choice.
    pub fn choice_label(&self) -> &'static str {
        match self {
            AttachmentFilter::None => "Everyone",
            AttachmentFilter::Image => "Image senders",
            AttachmentFilter::Link => "Link senders",
        }
    }

    /// The predicate this mode selects.
    pub fn predicate(&self) -> fn(&ScannedMessage) -> bool {
        match self {
            AttachmentFilter::None => any_message,
            AttachmentFilter::Image => has_image,
            AttachmentFilter::Link => has_link,
        }
    }

    /// Whether `message` passes this filter.
    ///
    /// # Examples
    ///
    /// ```
    /// use rolesweep_core::{AttachmentFilter, Author, AuthorId, MessageId, ScannedMessageBuilder};
    ///
    /// let message = ScannedMessageBuilder::default()
    ///     .id(MessageId(1))
    ///     .author(Author::new(AuthorId(1), "ada", false))
    ///     .content("see http://example.com")
    ///     .build()
    ///     .unwrap();
    ///
    /// assert!(AttachmentFilter::Link.passes(&message));
    /// assert!(!AttachmentFilter::Image.passes(&message));
    /// ```
    pub fn passes(&self, message: &ScannedMessage) -> bool {
        (self.predicate())(message)
    }
}

impl std::str::FromStr for AttachmentFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(AttachmentFilter::None),
            "image" => Ok(AttachmentFilter::Image),
            "link" => Ok(AttachmentFilter::Link),
            _ => Err(format!("Unknown attachment filter: {}", s)),
        }
    }
}
