//! Reactions and reject-marker classification.

use serde::{Deserialize, Serialize};

/// Unicode symbols moderators use to reject a submission.
const REJECT_SYMBOLS: [&str; 4] = ["❌", "❎", "✖", "✕"];

/// Fragments of custom emoji names that mark a rejection.
const REJECT_NAME_FRAGMENTS: [&str; 5] = ["cross", "x", "reject", "wrong", "fail"];

/// Emoji variation selector that platforms append to some symbols.
const VARIATION_SELECTOR: char = '\u{FE0F}';

/// Emoji identity of a reaction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReactionEmoji {
    /// A standard unicode emoji.
    Unicode(String),
    /// A guild custom emoji.
    Custom {
        /// Emoji id
        id: u64,
        /// Emoji name, absent when the emoji was deleted
        name: Option<String>,
    },
}

impl ReactionEmoji {
    /// Whether this emoji is in the reject vocabulary.
    ///
    /// Unicode emoji match the fixed symbol set; custom emoji match when their
    /// lowercased name contains any reject fragment. Note that the `x`
    /// fragment makes this deliberately broad.
    ///
    /// # Examples
    ///
    /// ```
    /// use rolesweep_core::ReactionEmoji;
    ///
    /// assert!(ReactionEmoji::Unicode("❌".into()).is_reject_symbol());
    /// assert!(!ReactionEmoji::Unicode("✅".into()).is_reject_symbol());
    /// ```
    pub fn is_reject_symbol(&self) -> bool {
        match self {
            ReactionEmoji::Unicode(symbol) => {
                let bare: String = symbol.chars().filter(|c| *c != VARIATION_SELECTOR).collect();
                REJECT_SYMBOLS.contains(&bare.as_str())
            }
            ReactionEmoji::Custom { name, .. } => name.as_deref().is_some_and(|name| {
                let lowered = name.to_lowercase();
                REJECT_NAME_FRAGMENTS
                    .iter()
                    .any(|fragment| lowered.contains(fragment))
            }),
        }
    }
}

/// A reaction on a message together with how many users added it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_getters::Getters)]
pub struct Reaction {
    emoji: ReactionEmoji,
    count: u64,
}

impl Reaction {
    /// Create a new reaction.
    pub fn new(emoji: ReactionEmoji, count: u64) -> Self {
        Self { emoji, count }
    }

    /// Whether this reaction is a moderator reject marker.
    pub fn is_reject_marker(&self) -> bool {
        self.count >= 1 && self.emoji.is_reject_symbol()
    }
}
