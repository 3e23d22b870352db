//! Ephemeral follow-up messages on a deferred slash command.

use async_trait::async_trait;
use rolesweep_scan::{ProgressError, ProgressReporter};
use serenity::builder::CreateInteractionResponseFollowup;
use serenity::http::Http;
use serenity::model::application::CommandInteraction;
use serenity::model::id::MessageId;
use std::sync::Arc;

/// Progress reporter backed by interaction follow-ups.
///
/// `post` creates the follow-up that `edit` later rewrites in place.
pub struct InteractionProgress {
    http: Arc<Http>,
    interaction: CommandInteraction,
    message: Option<MessageId>,
}

impl InteractionProgress {
    /// Report progress on `interaction`, which must already be deferred.
    pub fn new(http: Arc<Http>, interaction: CommandInteraction) -> Self {
        Self {
            http,
            interaction,
            message: None,
        }
    }

    async fn followup(&self, text: &str) -> Result<MessageId, ProgressError> {
        let builder = CreateInteractionResponseFollowup::new()
            .content(text)
            .ephemeral(true);
        self.interaction
            .create_followup(self.http.as_ref(), builder)
            .await
            .map(|message| message.id)
            .map_err(|e| ProgressError::new(format!("Failed to send follow-up: {}", e)))
    }
}

#[async_trait]
impl ProgressReporter for InteractionProgress {
    async fn post(&mut self, text: &str) -> Result<(), ProgressError> {
        let id = self.followup(text).await?;
        self.message = Some(id);
        Ok(())
    }

    async fn edit(&mut self, text: &str) -> Result<(), ProgressError> {
        let id = self
            .message
            .ok_or_else(|| ProgressError::new("No progress message to edit"))?;
        let builder = CreateInteractionResponseFollowup::new().content(text);
        self.interaction
            .edit_followup(self.http.as_ref(), id, builder)
            .await
            .map(|_| ())
            .map_err(|e| ProgressError::new(format!("Failed to edit follow-up: {}", e)))
    }

    async fn send(&mut self, text: &str) -> Result<(), ProgressError> {
        self.followup(text).await.map(|_| ())
    }
}
