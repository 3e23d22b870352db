//! Scan-and-assign pipeline.
//!
//! A scan folds an ordered message history into per-author state, resolves
//! which authors are eligible, grants the target role to each eligible author
//! one at a time, and reports aggregate counts with per-author failure detail.
//!
//! # Stages
//!
//! 1. [`Aggregation`] - single streaming pass over the history
//! 2. [`Resolution`] - eligible / excluded / duplicate sets
//! 3. [`AssignmentExecutor`] - paced role grants with progress updates
//! 4. [`compose_report`] - the final [`ScanReport`](rolesweep_core::ScanReport)
//!
//! [`run_scan`] wires the stages together behind the hierarchy precondition.
//!
//! # Collaborators
//!
//! The platform supplies a message stream, a [`MemberDirectory`] and a
//! [`ProgressReporter`]. Nothing in this crate talks to the network directly.
//!
//! # Preconditions
//!
//! [`authorize`], [`parse_message_link`] and [`HistoryRange`] are run by the
//! command surface before any history is fetched.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod aggregate;
mod directory;
mod execute;
mod guard;
mod link;
mod pipeline;
mod progress;
mod range;
mod resolve;
mod settings;

pub use aggregate::{Aggregation, AuthorTally};
pub use directory::{GrantError, MemberDirectory, MemberRecord};
pub use execute::{AssignmentExecutor, Assignments, progress_text};
pub use guard::{InvokerAuthority, authorize};
pub use link::parse_message_link;
pub use pipeline::{ScanRequest, compose_report, run_scan};
pub use progress::{ProgressError, ProgressReporter};
pub use range::HistoryRange;
pub use resolve::Resolution;
pub use settings::{ScanSettings, ScanSettingsBuilder};
