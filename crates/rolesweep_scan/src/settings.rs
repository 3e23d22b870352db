//! Tunables for a scan run.

use rolesweep_core::DEFAULT_FAILURE_DETAIL_LIMIT;
use serde::{Deserialize, Serialize};
use std::time::Duration;

fn default_grant_delay_ms() -> u64 {
    300
}

fn default_progress_every() -> usize {
    10
}

fn default_failure_detail_limit() -> usize {
    DEFAULT_FAILURE_DETAIL_LIMIT
}

fn default_audit_reason() -> String {
    "Event submission scan".to_string()
}

/// Pacing and reporting settings for the executor and report composer.
///
/// Deserializes from the `[scan]` table of the configuration file.
///
/// # Examples
///
/// ```
/// use rolesweep_scan::ScanSettings;
/// use std::time::Duration;
///
/// let settings = ScanSettings::builder().grant_delay_ms(0u64).build().unwrap();
/// assert_eq!(settings.grant_delay(), Duration::ZERO);
/// assert_eq!(*settings.progress_every(), 10);
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
pub struct ScanSettings {
    /// Pause after every grant attempt, in milliseconds
    #[serde(default = "default_grant_delay_ms")]
    #[builder(default = "default_grant_delay_ms()")]
    grant_delay_ms: u64,

    /// Update progress every this many processed authors
    #[serde(default = "default_progress_every")]
    #[builder(default = "default_progress_every()")]
    progress_every: usize,

    /// Failure lines listed in the report before collapsing
    #[serde(default = "default_failure_detail_limit")]
    #[builder(default = "default_failure_detail_limit()")]
    failure_detail_limit: usize,

    /// Audit-log reason attached to each grant
    #[serde(default = "default_audit_reason")]
    #[builder(default = "default_audit_reason()")]
    audit_reason: String,
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self {
            grant_delay_ms: default_grant_delay_ms(),
            progress_every: default_progress_every(),
            failure_detail_limit: default_failure_detail_limit(),
            audit_reason: default_audit_reason(),
        }
    }
}

impl ScanSettings {
    /// Creates a new settings builder.
    pub fn builder() -> ScanSettingsBuilder {
        ScanSettingsBuilder::default()
    }

    /// Pause applied after each grant attempt.
    pub fn grant_delay(&self) -> Duration {
        Duration::from_millis(self.grant_delay_ms)
    }

    /// Progress interval, never zero.
    pub fn progress_interval(&self) -> usize {
        self.progress_every.max(1)
    }
}
