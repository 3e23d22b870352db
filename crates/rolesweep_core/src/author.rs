//! Message author identity.

use serde::{Deserialize, Serialize};

/// Stable platform identifier of a message author.
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
pub struct AuthorId(pub u64);

/// The author of a scanned message.
///
/// # Examples
///
/// ```
/// use rolesweep_core::{Author, AuthorId};
///
/// let author = Author::new(AuthorId(42), "ada", false);
/// assert_eq!(author.to_string(), "ada");
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_more::Display,
)]
#[display("{}", name)]
pub struct Author {
    /// Platform identifier
    id: AuthorId,
    /// Display name used in failure reports
    name: String,
    /// Whether this is an automated/service account
    bot: bool,
}

impl Author {
    /// Create a new author record.
    pub fn new(id: impl Into<AuthorId>, name: impl Into<String>, bot: bool) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            bot,
        }
    }
}
