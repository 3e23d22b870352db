//! Discord bot client setup and lifecycle management.

use crate::{BotContext, RolesweepHandler};
use rolesweep_error::{DiscordError, DiscordErrorKind};
use serenity::Client;
use std::sync::Arc;
use tracing::{info, instrument};

/// The rolesweep Discord bot.
///
/// # Example
/// ```no_run
/// use rolesweep_discord::{BotContext, RolesweepBot};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let token = std::env::var("TOKEN")?;
///     let mut bot = RolesweepBot::new(token, BotContext::default()).await?;
///     bot.start().await?;
///     Ok(())
/// }
/// ```
pub struct RolesweepBot {
    client: Client,
}

impl RolesweepBot {
    /// Build the serenity client for `token`.
    ///
    /// # Errors
    /// Returns an error if the token is empty or the client fails to build.
    #[instrument(skip(token, context), fields(token_len = token.len()))]
    pub async fn new(token: String, context: BotContext) -> Result<Self, DiscordError> {
        if token.trim().is_empty() {
            return Err(DiscordError::new(DiscordErrorKind::InvalidToken));
        }

        info!("Initializing rolesweep Discord bot");

        let handler = RolesweepHandler::new(Arc::new(context));
        let intents = RolesweepHandler::intents();

        info!("Building Serenity client with intents: {:?}", intents);

        let client = Client::builder(&token, intents)
            .event_handler(handler)
            .await
            .map_err(|e| {
                DiscordError::new(DiscordErrorKind::ConnectionFailed(format!(
                    "Failed to build client: {}",
                    e
                )))
            })?;

        Ok(Self { client })
    }

    /// Connect to the gateway and serve commands until shutdown.
    ///
    /// # Errors
    /// Returns an error if the client fails to start or hits a fatal error.
    #[instrument(skip(self))]
    pub async fn start(&mut self) -> Result<(), DiscordError> {
        info!("Starting Discord bot");

        self.client.start().await.map_err(|e| {
            DiscordError::new(DiscordErrorKind::ConnectionFailed(format!(
                "Client error: {}",
                e
            )))
        })
    }
}
