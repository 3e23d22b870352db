//! Stage 3: paced, sequential role grants.

use crate::{MemberDirectory, ProgressReporter, ScanSettings};
use rolesweep_core::{AssignmentOutcome, Author, AuthorFailure, FailureReason, TargetRole};
use tracing::{debug, info, instrument, warn};

/// Progress line shown while grants are in flight.
pub fn progress_text(processed: usize, total: usize) -> String {
    format!("⏳ Assigning roles... `{}/{}` done.", processed, total)
}

/// Outcomes of the execution stage, each list in processing order.
#[derive(Debug, Clone, Default, PartialEq, Eq, derive_getters::Getters)]
pub struct Assignments {
    /// Authors newly granted the role
    assigned: Vec<Author>,
    /// Authors that already held the role
    already_had: Vec<Author>,
    /// Authors whose grant did not happen
    failures: Vec<AuthorFailure>,
    /// Grant calls issued against the directory
    grant_calls: usize,
}

impl Assignments {
    fn record(&mut self, author: &Author, outcome: AssignmentOutcome) {
        match outcome {
            AssignmentOutcome::Assigned => self.assigned.push(author.clone()),
            AssignmentOutcome::AlreadyHadRole => self.already_had.push(author.clone()),
            AssignmentOutcome::Failed(reason) => self
                .failures
                .push(AuthorFailure::new(author.clone(), reason)),
        }
    }

    /// Consume the outcomes, keeping only the failures.
    pub fn into_failures(self) -> Vec<AuthorFailure> {
        self.failures
    }

    /// Authors processed so far.
    pub fn processed(&self) -> usize {
        self.assigned.len() + self.already_had.len() + self.failures.len()
    }
}

/// Grants a role to eligible authors one at a time.
///
/// No call is ever retried and no per-author failure stops the loop. Progress
/// failures are logged and dropped.
pub struct AssignmentExecutor<'a, D: MemberDirectory, P: ProgressReporter> {
    directory: &'a D,
    progress: &'a mut P,
    settings: &'a ScanSettings,
}

impl<'a, D: MemberDirectory, P: ProgressReporter> AssignmentExecutor<'a, D, P> {
    /// Create an executor over the given collaborators.
    pub fn new(directory: &'a D, progress: &'a mut P, settings: &'a ScanSettings) -> Self {
        Self {
            directory,
            progress,
            settings,
        }
    }

    /// Process one author, returning the outcome and whether a grant call was made.
    #[instrument(skip(self, author, role), fields(author = %author.id()))]
    async fn assign_one(&self, author: &Author, role: &TargetRole) -> (AssignmentOutcome, bool) {
        let Some(member) = self.directory.resolve(*author.id()).await else {
            debug!("Author is no longer a member");
            return (AssignmentOutcome::Failed(FailureReason::MemberNotFound), false);
        };

        if member.has_role(*role.id()) {
            debug!("Member already holds role");
            return (AssignmentOutcome::AlreadyHadRole, false);
        }

        match self
            .directory
            .grant(&member, role, self.settings.audit_reason())
            .await
        {
            Ok(()) => {
                debug!("Role granted");
                (AssignmentOutcome::Assigned, true)
            }
            Err(e) => {
                warn!(error = %e, "Role grant failed");
                (AssignmentOutcome::Failed(e.into()), true)
            }
        }
    }

    /// Grant `role` to every author in `eligible`, in order.
    #[instrument(
        skip(self, role, eligible),
        fields(role = %role.name(), total = eligible.len(), assigned, failed)
    )]
    pub async fn execute(&mut self, role: &TargetRole, eligible: &[Author]) -> Assignments {
        let total = eligible.len();
        let every = self.settings.progress_interval();
        let delay = self.settings.grant_delay();
        let mut assignments = Assignments::default();

        info!("Assigning roles");

        for author in eligible {
            let (outcome, called) = self.assign_one(author, role).await;
            assignments.record(author, outcome);
            if called {
                assignments.grant_calls += 1;
            }

            let processed = assignments.processed();
            if processed % every == 0
                && let Err(e) = self.progress.edit(&progress_text(processed, total)).await
            {
                warn!(error = %e, processed, "Progress update failed");
            }

            if called && !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
        }

        tracing::Span::current().record("assigned", assignments.assigned.len());
        tracing::Span::current().record("failed", assignments.failures.len());
        info!(
            already_had = assignments.already_had.len(),
            grant_calls = assignments.grant_calls,
            "Role assignment finished"
        );

        assignments
    }
}
