//! Aggregate scan report.

use crate::{AttachmentFilter, AuthorFailure};
use serde::{Deserialize, Serialize};

/// Failure lines shown before the remainder is collapsed.
pub const DEFAULT_FAILURE_DETAIL_LIMIT: usize = 20;

/// Aggregate result of one scan-and-assign run.
///
/// Counts are over authors, not messages. For every report produced by the
/// pipeline, `scanned` equals the sum of `assigned`, `already_had`,
/// `excluded_by_reaction`, `excluded_by_filter` and `failed()`.
/// `duplicates` is informational and overlaps the other buckets.
///
/// # Examples
///
/// ```
/// use rolesweep_core::{AttachmentFilter, ScanReportBuilder};
///
/// let report = ScanReportBuilder::default()
///     .filter(AttachmentFilter::Image)
///     .scanned(3usize)
///     .assigned(1usize)
///     .excluded_by_reaction(1usize)
///     .excluded_by_filter(1usize)
///     .build()
///     .unwrap();
///
/// assert!(report.is_balanced());
/// assert!(report.render(20).contains("Image only"));
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_builder::Builder,
)]
#[builder(setter(into))]
pub struct ScanReport {
    /// Filter mode the scan ran with
    filter: AttachmentFilter,
    /// Distinct non-bot authors seen
    #[builder(default)]
    scanned: usize,
    /// Authors newly granted the role
    #[builder(default)]
    assigned: usize,
    /// Eligible authors that already held the role
    #[builder(default)]
    already_had: usize,
    /// Excluded authors not attributed to the filter
    #[builder(default)]
    excluded_by_reaction: usize,
    /// Authors that failed the filter and never qualified
    #[builder(default)]
    excluded_by_filter: usize,
    /// Authors with more than one message
    #[builder(default)]
    duplicates: usize,
    /// Failed grants in processing order
    #[builder(default)]
    failures: Vec<AuthorFailure>,
}

impl ScanReport {
    /// Create a report from final counts and the failure list.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        filter: AttachmentFilter,
        scanned: usize,
        assigned: usize,
        already_had: usize,
        excluded_by_reaction: usize,
        excluded_by_filter: usize,
        duplicates: usize,
        failures: Vec<AuthorFailure>,
    ) -> Self {
        Self {
            filter,
            scanned,
            assigned,
            already_had,
            excluded_by_reaction,
            excluded_by_filter,
            duplicates,
            failures,
        }
    }

    /// Number of failed grants.
    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    /// Whether the per-bucket counts add up to `scanned`.
    pub fn is_balanced(&self) -> bool {
        self.scanned
            == self.assigned
                + self.already_had
                + self.excluded_by_reaction
                + self.excluded_by_filter
                + self.failed()
    }

    /// Render the report as chat markdown, listing at most `detail_limit` failures.
    pub fn render(&self, detail_limit: usize) -> String {
        let mut out = format!(
            "✅ **Scan Complete**\n\n\
             🔍 **Attachment filter:** {}\n\
             👥 **Total users scanned:** {}\n\
             🏷️ **New roles assigned:** {}\n\
             🟦 **Already had role:** {}\n\
             ❌ **Disqualified (cross reaction):** {}\n\
             🖼️ **Disqualified (attachment filter):** {}\n\
             🔁 **Duplicate submitters:** {}\n\
             💥 **Failed to assign:** {}",
            self.filter.report_label(),
            self.scanned,
            self.assigned,
            self.already_had,
            self.excluded_by_reaction,
            self.excluded_by_filter,
            self.duplicates,
            self.failed(),
        );

        if !self.failures.is_empty() {
            out.push_str(&format!("\n⚠️ **Failed assignments ({}):**", self.failed()));
            for failure in self.failures.iter().take(detail_limit) {
                out.push_str(&format!("\n  • {}", failure));
            }
            let hidden = self.failed().saturating_sub(detail_limit);
            if hidden > 0 {
                out.push_str(&format!("\n  ... +{} more", hidden));
            }
        }

        out
    }
}
