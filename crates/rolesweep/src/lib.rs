//! Rolesweep - scan a Discord channel or thread and assign a role to submitters.
//!
//! A moderator runs `/giverolechannel` or `/giverolethread`; the bot reads the
//! history oldest-first, skips bots and authors whose messages carry a reject
//! reaction, applies an optional image/link filter, and grants the chosen role
//! to every remaining author who does not already hold it.
//!
//! # Architecture
//!
//! - `rolesweep_error` - error types
//! - `rolesweep_core` - message, reaction, filter, role and report types
//! - `rolesweep_scan` - aggregation, resolution, paced assignment, reporting
//! - `rolesweep_discord` - serenity adapter, slash commands and bot client
//!
//! This crate adds configuration and logging, and re-exports the rest.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod logging;

pub use config::RolesweepConfig;
pub use logging::{LoggingSettings, init_logging};

pub use rolesweep_core::*;
pub use rolesweep_discord::*;
pub use rolesweep_error::*;
pub use rolesweep_scan::*;
