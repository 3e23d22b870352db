//! Command-line interface module.

mod commands;
mod run;

pub use commands::{Cli, Commands};
pub use run::{run_bot, show_config};
