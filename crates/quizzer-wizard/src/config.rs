use std::path::PathBuf;
use std::time::Duration;

/// Storage key of the persisted draft (as a file name).
pub const DRAFT_STORAGE_KEY: &str = "quizzer_ai_creation_wizard.json";

/// Configuration for the creation wizard
#[derive(Debug, Clone)]
pub struct WizardConfig {
    /// Cadence of quiz status polls while a generation job is running
    pub poll_interval: Duration,
    /// Location of the persisted draft for the file-backed store
    pub draft_path: PathBuf,
    /// Note forwarded to the generation job alongside the blueprint
    pub professor_note: String,
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(3),
            draft_path: PathBuf::from(DRAFT_STORAGE_KEY),
            professor_note: "AI-first generation flow".to_string(),
        }
    }
}

impl WizardConfig {
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn with_draft_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.draft_path = path.into();
        self
    }
}
