//! Best-effort progress reporting collaborator.

use async_trait::async_trait;

/// Failure to post or edit a progress message.
///
/// This is the only error class the executor swallows.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Progress Error: {} at line {} in {}", message, line, file)]
pub struct ProgressError {
    /// The underlying error message
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl ProgressError {
    /// Create a new ProgressError with the given message at the current location.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}

/// An ephemeral channel back to the invoking moderator.
#[async_trait]
pub trait ProgressReporter: Send + Sync {
    /// Post the progress message that later calls to `edit` will replace.
    async fn post(&mut self, text: &str) -> Result<(), ProgressError>;

    /// Replace the text of the posted progress message.
    async fn edit(&mut self, text: &str) -> Result<(), ProgressError>;

    /// Send a new message, used when editing the final report fails.
    async fn send(&mut self, text: &str) -> Result<(), ProgressError>;
}
