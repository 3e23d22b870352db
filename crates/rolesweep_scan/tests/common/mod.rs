//! In-memory collaborators for pipeline tests.

#![allow(dead_code)]

use async_trait::async_trait;
use futures::Stream;
use rolesweep_core::{
    Attachment, Author, AuthorId, MessageId, Reaction, ReactionEmoji, RoleId, RoleRank,
    ScannedMessage, ScannedMessageBuilder, TargetRole,
};
use rolesweep_error::ScanResult;
use rolesweep_scan::{
    GrantError, MemberDirectory, MemberRecord, ProgressError, ProgressReporter, ScanSettings,
};
use std::collections::HashMap;
use std::sync::Mutex;

pub const PRIZE: RoleId = RoleId(500);

pub fn prize_role() -> TargetRole {
    TargetRole::new(PRIZE, "Participant", 3)
}

pub fn bot_top() -> RoleRank {
    RoleRank::new(10, RoleId(1))
}

pub fn settings() -> ScanSettings {
    ScanSettings::builder().grant_delay_ms(0u64).build().unwrap()
}

pub fn author(id: u64) -> Author {
    Author::new(AuthorId(id), format!("user{}", id), false)
}

pub fn bot(id: u64) -> Author {
    Author::new(AuthorId(id), format!("bot{}", id), true)
}

pub fn text(id: u64, author: Author, content: &str) -> ScannedMessage {
    ScannedMessageBuilder::default()
        .id(MessageId(id))
        .author(author)
        .content(content)
        .build()
        .unwrap()
}

pub fn image(id: u64, author: Author, caption: &str) -> ScannedMessage {
    ScannedMessageBuilder::default()
        .id(MessageId(id))
        .author(author)
        .content(caption)
        .attachments(vec![Attachment::new(
            "entry.png",
            Some("image/png".to_string()),
        )])
        .build()
        .unwrap()
}

pub fn crossed(message: ScannedMessage) -> ScannedMessage {
    let mut reactions = message.reactions().clone();
    reactions.push(Reaction::new(ReactionEmoji::Unicode("❌".to_string()), 1));
    ScannedMessageBuilder::default()
        .id(*message.id())
        .author(message.author().clone())
        .content(message.content().clone())
        .attachments(message.attachments().clone())
        .reactions(reactions)
        .build()
        .unwrap()
}

pub fn history(messages: Vec<ScannedMessage>) -> impl Stream<Item = ScanResult<ScannedMessage>> {
    futures::stream::iter(messages.into_iter().map(Ok))
}

/// Directory backed by a mutable member table that records every call.
#[derive(Default)]
pub struct RecordingDirectory {
    members: Mutex<HashMap<AuthorId, Vec<RoleId>>>,
    refusals: HashMap<AuthorId, GrantError>,
    grants: Mutex<Vec<AuthorId>>,
}

impl RecordingDirectory {
    pub fn with_members(ids: impl IntoIterator<Item = u64>) -> Self {
        let members = ids.into_iter().map(|id| (AuthorId(id), Vec::new())).collect();
        Self {
            members: Mutex::new(members),
            ..Default::default()
        }
    }

    pub fn holding(self, id: u64, role: RoleId) -> Self {
        self.members
            .lock()
            .unwrap()
            .entry(AuthorId(id))
            .or_default()
            .push(role);
        self
    }

    pub fn refusing(mut self, id: u64, err: GrantError) -> Self {
        self.refusals.insert(AuthorId(id), err);
        self
    }

    pub fn grants(&self) -> Vec<AuthorId> {
        self.grants.lock().unwrap().clone()
    }

    pub fn roles_of(&self, id: u64) -> Vec<RoleId> {
        self.members
            .lock()
            .unwrap()
            .get(&AuthorId(id))
            .cloned()
            .unwrap_or_default()
    }
}

#[async_trait]
impl MemberDirectory for RecordingDirectory {
    async fn resolve(&self, author: AuthorId) -> Option<MemberRecord> {
        self.members
            .lock()
            .unwrap()
            .get(&author)
            .map(|roles| MemberRecord::new(author, roles.clone()))
    }

    async fn grant(
        &self,
        member: &MemberRecord,
        role: &TargetRole,
        _reason: &str,
    ) -> Result<(), GrantError> {
        self.grants.lock().unwrap().push(*member.author());
        if let Some(err) = self.refusals.get(member.author()) {
            return Err(*err);
        }
        self.members
            .lock()
            .unwrap()
            .entry(*member.author())
            .or_default()
            .push(*role.id());
        Ok(())
    }
}

/// Progress reporter that keeps every message it was asked to show.
#[derive(Default)]
pub struct RecordingProgress {
    pub posts: Vec<String>,
    pub edits: Vec<String>,
    pub sends: Vec<String>,
    pub fail_edits: bool,
}

impl RecordingProgress {
    pub fn failing_edits() -> Self {
        Self {
            fail_edits: true,
            ..Default::default()
        }
    }

    /// The report as the moderator would finally see it.
    pub fn final_text(&self) -> Option<&String> {
        if self.fail_edits {
            self.sends.last()
        } else {
            self.edits.last()
        }
    }
}

#[async_trait]
impl ProgressReporter for RecordingProgress {
    async fn post(&mut self, text: &str) -> Result<(), ProgressError> {
        self.posts.push(text.to_string());
        Ok(())
    }

    async fn edit(&mut self, text: &str) -> Result<(), ProgressError> {
        if self.fail_edits {
            return Err(ProgressError::new("Unknown Message"));
        }
        self.edits.push(text.to_string());
        Ok(())
    }

    async fn send(&mut self, text: &str) -> Result<(), ProgressError> {
        self.sends.push(text.to_string());
        Ok(())
    }
}
