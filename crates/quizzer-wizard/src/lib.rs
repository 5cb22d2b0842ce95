//! Core of the professor-facing quiz creation wizard: draft capture,
//! blueprint editing, AI generation orchestration and polling, review-stage
//! question editing, and the publish gate. All backend traffic goes through
//! the [`backend::QuizzerBackend`] port; draft persistence goes through the
//! [`store::DraftStore`] port.

pub mod backend;
pub mod blueprint;
pub mod commands;
pub mod config;
pub mod draft;
pub mod error;
pub mod poller;
pub mod publish;
pub mod review;
pub mod state;
pub mod store;
pub mod wizard;

pub use backend::QuizzerBackend;
pub use commands::{CommandBus, WizardCommand};
pub use config::{WizardConfig, DRAFT_STORAGE_KEY};
pub use draft::Draft;
pub use error::{WizardError, GENERATION_EMPTY_MESSAGE, PUBLISH_FAILED_MESSAGE};
pub use poller::{JobPoller, PollOutcome, PollerHandle};
pub use publish::can_finalize;
pub use review::ReviewEditor;
pub use state::WizardStep;
pub use store::{DraftStore, FileDraftStore, MemoryDraftStore, StoreError};
pub use wizard::CreationWizard;
