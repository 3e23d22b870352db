//! Core data types for rolesweep.
//!
//! This crate holds the read-only records a scan consumes (authors, messages,
//! attachments, reactions), the selectable attachment filter, role ranks used
//! for the hierarchy check, and the per-author outcomes and aggregate report a
//! scan produces.
//!
//! Nothing here performs I/O; the pipeline lives in `rolesweep_scan` and the
//! platform adapter in `rolesweep_discord`.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod author;
mod filter;
mod message;
mod outcome;
mod reaction;
mod report;
mod role;

pub use author::{Author, AuthorId};
pub use filter::AttachmentFilter;
pub use message::{Attachment, MessageId, ScannedMessage, ScannedMessageBuilder};
pub use outcome::{AssignmentOutcome, AuthorFailure, FailureReason};
pub use reaction::{Reaction, ReactionEmoji};
pub use report::{DEFAULT_FAILURE_DETAIL_LIMIT, ScanReport, ScanReportBuilder};
pub use role::{RoleId, RoleRank, TargetRole};
