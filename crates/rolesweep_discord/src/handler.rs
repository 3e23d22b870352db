//! Serenity event handler for the scan commands.
//!
//! Registers the slash commands once the gateway is ready and runs a scan for
//! every matching command interaction.

use crate::commands::{ScanCommand, ScanOptions, scan_commands};
use crate::convert::to_role_rank;
use crate::{BotContext, GuildDirectory, InteractionProgress, history_stream};
use rolesweep_core::{AttachmentFilter, RoleId, RoleRank, ScanReport, TargetRole};
use rolesweep_error::{
    DiscordError, RolesweepError, RolesweepErrorKind, RolesweepResult, ScanError, ScanErrorKind,
};
use rolesweep_scan::{HistoryRange, InvokerAuthority, ScanRequest, authorize, run_scan};
use serenity::all::{Command, Interaction, Ready};
use serenity::async_trait;
use serenity::builder::{
    CreateInteractionResponse, CreateInteractionResponseFollowup,
    CreateInteractionResponseMessage, EditThread,
};
use serenity::client::{Context, EventHandler};
use serenity::model::application::CommandInteraction;
use serenity::model::channel::ChannelType;
use serenity::model::gateway::GatewayIntents;
use serenity::model::guild::PartialGuild;
use serenity::model::id::{ChannelId, GuildId};
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

/// Text sent to the invoker when a scan fails for a reason they cannot fix.
pub fn unexpected_error_message(err: &RolesweepError) -> String {
    let detail = match err.kind() {
        RolesweepErrorKind::Discord(e) => e.kind().to_string(),
        RolesweepErrorKind::Scan(e) => e.kind().to_string(),
        RolesweepErrorKind::Config(e) => e.to_string(),
    };
    format!("❌ An unexpected error occurred: `{}`", detail)
}

/// Text sent to the invoker for any failed command.
pub fn failure_message(err: &RolesweepError) -> String {
    match err.kind() {
        RolesweepErrorKind::Scan(e) => e.kind().user_message(),
        _ => unexpected_error_message(err),
    }
}

/// Event handler for the rolesweep bot.
pub struct RolesweepHandler {
    context: Arc<BotContext>,
}

impl RolesweepHandler {
    /// Create a handler sharing `context` across invocations.
    pub fn new(context: Arc<BotContext>) -> Self {
        Self { context }
    }

    /// Gateway intents the scan commands depend on.
    pub fn intents() -> GatewayIntents {
        GatewayIntents::GUILDS
            | GatewayIntents::GUILD_MESSAGES
            | GatewayIntents::GUILD_MEMBERS
            | GatewayIntents::GUILD_MESSAGE_REACTIONS
            | GatewayIntents::MESSAGE_CONTENT
    }

    /// Defer, run the command, and reply with any failure.
    #[instrument(
        skip_all,
        fields(
            command = %kind,
            guild_id = ?command.guild_id,
            invoker = %command.user.name
        )
    )]
    async fn dispatch(&self, ctx: &Context, command: &CommandInteraction, kind: ScanCommand) {
        if let Err(e) = command.defer_ephemeral(ctx).await {
            error!(error = %e, "Failed to defer interaction");
            return;
        }

        match self.run_command(ctx, command, kind).await {
            Ok(report) => {
                info!(
                    scanned = report.scanned(),
                    assigned = report.assigned(),
                    failed = report.failed(),
                    "Command completed"
                );
            }
            Err(e) => {
                warn!(error = %e, "Command failed");
                reply(ctx, command, &failure_message(&e)).await;
            }
        }
    }

    async fn run_command(
        &self,
        ctx: &Context,
        command: &CommandInteraction,
        kind: ScanCommand,
    ) -> RolesweepResult<ScanReport> {
        let guild_id = command
            .guild_id
            .ok_or_else(|| ScanError::new(ScanErrorKind::NotInGuild))?;
        let guild = ctx
            .http
            .get_guild(guild_id)
            .await
            .map_err(DiscordError::from)?;

        authorize(&invoker_authority(command, &guild))?;

        let options = ScanOptions::parse(
            command
                .data
                .options()
                .into_iter()
                .map(|option| (option.name, option.value)),
        )?;

        let (channel_id, archived) = match kind {
            ScanCommand::Channel => {
                let channel = options.channel().ok_or_else(|| {
                    ScanError::new(ScanErrorKind::InvalidOption("channel".into()))
                })?;
                (channel, false)
            }
            ScanCommand::Thread => (
                command.channel_id,
                thread_is_archived(ctx, command.channel_id).await?,
            ),
        };

        let actor_top = bot_top_role(ctx, guild_id, &guild).await?;
        let (request, range) = prepare_scan(
            options.role(),
            *options.filter(),
            options.start_message().as_deref(),
            options.end_message().as_deref(),
            actor_top,
        )?;

        if archived {
            unarchive_thread(ctx, channel_id).await?;
        }

        info!(
            channel_id = %channel_id,
            role = %options.role().name(),
            filter = %options.filter(),
            ?range,
            "Starting scan"
        );

        let settings = self.context.scan();
        let messages = history_stream(
            ctx.http.clone(),
            channel_id,
            range,
            self.context.discord().page_size(),
        );
        let directory = GuildDirectory::new(ctx.http.clone(), guild_id);
        let mut progress = InteractionProgress::new(ctx.http.clone(), command.clone());

        let report = run_scan(settings, &request, messages, &directory, &mut progress).await?;
        Ok(report)
    }
}

fn invoker_authority(command: &CommandInteraction, guild: &PartialGuild) -> InvokerAuthority {
    let permissions = command
        .member
        .as_ref()
        .and_then(|member| member.permissions)
        .unwrap_or_default();

    InvokerAuthority {
        is_owner: guild.owner_id == command.user.id,
        manage_roles: permissions.manage_roles(),
        administrator: permissions.administrator(),
    }
}

/// Resolve the message range and check the role hierarchy.
///
/// Runs before anything on the server is touched, so a bad link or an
/// ungrantable role leaves the channel as it was.
pub fn prepare_scan(
    role: &TargetRole,
    filter: AttachmentFilter,
    start_message: Option<&str>,
    end_message: Option<&str>,
    actor_top: RoleRank,
) -> RolesweepResult<(ScanRequest, HistoryRange)> {
    let range = HistoryRange::from_links(start_message, end_message)?;
    let request = ScanRequest::new(role.clone(), actor_top, filter);
    request.check_hierarchy()?;
    Ok((request, range))
}

/// Whether `channel_id` is an archived thread.
///
/// Fails with [`ScanErrorKind::NotAThread`] for any other channel type.
async fn thread_is_archived(ctx: &Context, channel_id: ChannelId) -> RolesweepResult<bool> {
    let channel = channel_id
        .to_channel(ctx)
        .await
        .map_err(DiscordError::from)?;

    let thread = channel
        .guild()
        .filter(|c| {
            matches!(
                c.kind,
                ChannelType::PublicThread | ChannelType::PrivateThread | ChannelType::NewsThread
            )
        })
        .ok_or_else(|| ScanError::new(ScanErrorKind::NotAThread))?;

    Ok(thread.thread_metadata.is_some_and(|m| m.archived))
}

async fn unarchive_thread(ctx: &Context, channel_id: ChannelId) -> RolesweepResult<()> {
    channel_id
        .edit_thread(ctx, EditThread::new().archived(false))
        .await
        .map_err(|e| {
            warn!(thread_id = %channel_id, error = %e, "Failed to unarchive thread");
            ScanError::new(ScanErrorKind::ThreadArchived(channel_id.get()))
        })?;
    info!(thread_id = %channel_id, "Unarchived thread");
    Ok(())
}

/// The bot's highest role, or `@everyone` when it holds none.
async fn bot_top_role(
    ctx: &Context,
    guild_id: GuildId,
    guild: &PartialGuild,
) -> RolesweepResult<RoleRank> {
    let bot_id = ctx.cache.current_user().id;
    let member = ctx
        .http
        .get_member(guild_id, bot_id)
        .await
        .map_err(DiscordError::from)?;

    let top = member
        .roles
        .iter()
        .filter_map(|id| guild.roles.get(id))
        .map(to_role_rank)
        .max()
        .unwrap_or_else(|| RoleRank::new(0, RoleId(guild_id.get())));

    debug!(?top, "Resolved bot top role");
    Ok(top)
}

/// Send an ephemeral reply, falling back to an initial response.
async fn reply(ctx: &Context, command: &CommandInteraction, text: &str) {
    let followup = CreateInteractionResponseFollowup::new()
        .content(text)
        .ephemeral(true);
    let Err(e) = command.create_followup(ctx, followup).await else {
        return;
    };

    debug!(error = %e, "Follow-up failed, trying initial response");
    let response = CreateInteractionResponse::Message(
        CreateInteractionResponseMessage::new()
            .content(text)
            .ephemeral(true),
    );
    if let Err(e) = command.create_response(ctx, response).await {
        error!(error = %e, "Could not reply to interaction");
    }
}

#[async_trait]
impl EventHandler for RolesweepHandler {
    async fn ready(&self, ctx: Context, ready: Ready) {
        info!(
            bot_user = %ready.user.name,
            bot_id = %ready.user.id,
            guilds = ready.guilds.len(),
            "Bot connected to Discord"
        );

        match Command::set_global_commands(&ctx.http, scan_commands()).await {
            Ok(commands) => info!(count = commands.len(), "Registered slash commands"),
            Err(e) => error!(error = %e, "Failed to register slash commands"),
        }
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        let Interaction::Command(command) = interaction else {
            return;
        };

        match ScanCommand::from_name(&command.data.name) {
            Some(kind) => self.dispatch(&ctx, &command, kind).await,
            None => debug!(command = %command.data.name, "Ignoring unknown command"),
        }
    }
}
