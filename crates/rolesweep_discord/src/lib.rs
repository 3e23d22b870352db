//! Discord integration for rolesweep.
//!
//! Adapts serenity to the scan pipeline's collaborators:
//!
//! - [`history_stream`] - oldest-first paged channel history
//! - [`GuildDirectory`] - member lookup and role grants
//! - [`InteractionProgress`] - ephemeral follow-up progress messages
//!
//! [`RolesweepHandler`] registers `/giverolechannel` and `/giverolethread`
//! and runs a scan per invocation; [`RolesweepBot`] owns the gateway client.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod client;
mod commands;
mod context;
mod convert;
mod directory;
mod handler;
mod history;
mod progress;
mod settings;

pub use client::RolesweepBot;
pub use commands::{ScanCommand, ScanOptions, scan_commands};
pub use context::BotContext;
pub use convert::{
    to_author, to_reaction, to_reaction_emoji, to_role_rank, to_scanned_message, to_target_role,
};
pub use directory::{GuildDirectory, grant_error};
pub use handler::{RolesweepHandler, failure_message, prepare_scan, unexpected_error_message};
pub use history::history_stream;
pub use progress::InteractionProgress;
pub use settings::{DiscordSettings, MAX_HISTORY_PAGE};
