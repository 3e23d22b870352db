//! End-to-end scan: guard, aggregate, resolve, execute, report.

use crate::{
    Aggregation, AssignmentExecutor, Assignments, MemberDirectory, ProgressReporter, Resolution,
    ScanSettings, progress_text,
};
use futures::{Stream, StreamExt};
use rolesweep_core::{AttachmentFilter, RoleRank, ScanReport, ScannedMessage, TargetRole};
use rolesweep_error::{ScanError, ScanErrorKind, ScanResult};
use std::pin::pin;
use tracing::{error, info, instrument, warn};

/// What to grant, under which filter, on whose authority.
#[derive(Debug, Clone, PartialEq, Eq, derive_getters::Getters)]
pub struct ScanRequest {
    role: TargetRole,
    actor_top: RoleRank,
    filter: AttachmentFilter,
}

impl ScanRequest {
    /// Create a request. `actor_top` is the highest role of the granting principal.
    pub fn new(role: TargetRole, actor_top: RoleRank, filter: AttachmentFilter) -> Self {
        Self {
            role,
            actor_top,
            filter,
        }
    }

    /// Fail unless the role sits strictly below `actor_top`.
    ///
    /// # Errors
    ///
    /// Returns [`ScanErrorKind::HierarchyViolation`] naming the role.
    pub fn check_hierarchy(&self) -> ScanResult<()> {
        if self.role.is_grantable_below(&self.actor_top) {
            return Ok(());
        }

        warn!(
            role_rank = ?self.role.rank(),
            actor_top = ?self.actor_top,
            "Target role is not below the bot's highest role"
        );
        Err(ScanError::new(ScanErrorKind::HierarchyViolation {
            role: self.role.name().clone(),
        }))
    }
}

/// Stage 4: combine resolution and assignment outcomes into a report.
pub fn compose_report(
    filter: AttachmentFilter,
    resolution: &Resolution,
    assignments: Assignments,
) -> ScanReport {
    let (assigned, already_had) = (assignments.assigned().len(), assignments.already_had().len());
    ScanReport::new(
        filter,
        resolution.seen(),
        assigned,
        already_had,
        resolution.excluded_by_reaction().len(),
        resolution.excluded_by_filter().len(),
        resolution.duplicates().len(),
        assignments.into_failures(),
    )
}

/// Run one scan-and-assign pass.
///
/// The hierarchy precondition is checked before `messages` is polled; if the
/// target role is not strictly below `request.actor_top` the stream is never
/// read and no grant is issued.
///
/// # Errors
///
/// - [`ScanErrorKind::HierarchyViolation`] when the role cannot be granted
/// - any error yielded by `messages`, which aborts aggregation
///
/// Per-author grant failures and progress failures never surface here.
#[instrument(
    skip_all,
    fields(
        role = %request.role().name(),
        filter = %request.filter(),
        messages,
        authors,
        eligible
    )
)]
pub async fn run_scan<S, D, P>(
    settings: &ScanSettings,
    request: &ScanRequest,
    messages: S,
    directory: &D,
    progress: &mut P,
) -> ScanResult<ScanReport>
where
    S: Stream<Item = ScanResult<ScannedMessage>>,
    D: MemberDirectory,
    P: ProgressReporter,
{
    request.check_hierarchy()?;

    let mut aggregation = Aggregation::new(*request.filter());
    let mut messages = pin!(messages);
    while let Some(message) = messages.next().await {
        match message {
            Ok(message) => aggregation.observe(&message),
            Err(e) => {
                error!(error = %e, seen = aggregation.messages(), "History fetch failed");
                return Err(e);
            }
        }
    }

    let span = tracing::Span::current();
    span.record("messages", aggregation.messages());
    span.record("authors", aggregation.authors());

    let resolution = aggregation.resolve();
    span.record("eligible", resolution.eligible().len());
    info!(
        excluded_by_filter = resolution.excluded_by_filter().len(),
        excluded_by_reaction = resolution.excluded_by_reaction().len(),
        duplicates = resolution.duplicates().len(),
        "History aggregated"
    );

    let total = resolution.eligible().len();
    if let Err(e) = progress.post(&progress_text(0, total)).await {
        warn!(error = %e, "Could not post progress message");
    }

    let assignments = AssignmentExecutor::new(directory, progress, settings)
        .execute(request.role(), resolution.eligible())
        .await;

    let report = compose_report(*request.filter(), &resolution, assignments);
    let rendered = report.render(*settings.failure_detail_limit());

    if let Err(e) = progress.edit(&rendered).await {
        warn!(error = %e, "Editing progress into report failed, sending fresh message");
        if let Err(e) = progress.send(&rendered).await {
            warn!(error = %e, "Could not deliver report");
        }
    }

    info!(
        scanned = report.scanned(),
        assigned = report.assigned(),
        failed = report.failed(),
        "Scan complete"
    );

    Ok(report)
}
