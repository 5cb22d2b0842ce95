use quizzer_client::QuizzerClientError;

use crate::state::WizardStep;
use crate::store::StoreError;

/// Surfaced on the processing screen when the job finished without saving
/// any questions. Recoverable; the professor retries or escalates.
pub const GENERATION_EMPTY_MESSAGE: &str =
    "AI finished but no questions were saved. Retry generation or check backend worker logs.";

/// Fallback when the backend rejects a publish without a usable detail.
pub const PUBLISH_FAILED_MESSAGE: &str = "Publish validation failed";

/// Errors of the creation wizard. Nothing here is fatal to the session;
/// every variant is recoverable through user-initiated retry or navigation,
/// and no operation retries automatically.
#[derive(Debug, thiserror::Error)]
pub enum WizardError {
    /// Pre-submit gating failed; no network call was made.
    #[error("{0}")]
    Validation(String),

    /// The step state machine rejected a transition.
    #[error("invalid wizard transition from {from} to {to}")]
    InvalidTransition { from: WizardStep, to: WizardStep },

    /// The generation orchestration failed part-way. Entities created by
    /// completed sub-steps are not rolled back.
    #[error("failed to start AI generation: {0}")]
    Submission(#[source] QuizzerClientError),

    /// The job finished but produced no questions.
    #[error("AI finished but no questions were saved. Retry generation or check backend worker logs.")]
    GenerationEmpty,

    /// A single review edit failed; reported individually, never retried.
    #[error("question {action} failed: {source}")]
    Mutation {
        action: &'static str,
        #[source]
        source: QuizzerClientError,
    },

    /// The backend rejected the publish; carries the server's detail
    /// message when one was provided.
    #[error("{0}")]
    Publish(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}
