//! Error types for rolesweep.
//!
//! This crate provides the foundation error types used throughout the rolesweep workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All constructors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use rolesweep_error::{RolesweepResult, ScanError, ScanErrorKind};
//!
//! fn guard() -> RolesweepResult<()> {
//!     Err(ScanError::new(ScanErrorKind::NotAThread))?
//! }
//!
//! assert!(guard().is_err());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod discord;
mod error;
mod scan;

pub use config::ConfigError;
pub use discord::{DiscordError, DiscordErrorKind};
pub use error::{RolesweepError, RolesweepErrorKind, RolesweepResult};
pub use scan::{LinkBound, ScanError, ScanErrorKind, ScanResult};
