//! The AI quiz creation wizard
//!
//! Owns the draft, the step state machine, the created quiz identity, the
//! review editor, and the poller handle. Every draft mutation is persisted
//! wholesale through the draft store; the poller's lifetime is tied to this
//! instance.

use std::sync::Arc;

use futures::future::try_join_all;
use quizzer_client::{
    Blueprint, CreateQuizRequest, CreateSectionRequest, GenerateRequest, Question,
    QuizzerClientError, SectionBlueprint, UpdateQuestionRequest,
};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::backend::QuizzerBackend;
use crate::blueprint;
use crate::commands::WizardCommand;
use crate::config::WizardConfig;
use crate::draft::Draft;
use crate::error::{WizardError, GENERATION_EMPTY_MESSAGE, PUBLISH_FAILED_MESSAGE};
use crate::poller::{JobPoller, PollOutcome, PollerHandle};
use crate::publish;
use crate::review::ReviewEditor;
use crate::state::WizardStep;
use crate::store::{DraftStore, FileDraftStore};

pub struct CreationWizard {
    backend: Arc<dyn QuizzerBackend>,
    store: Box<dyn DraftStore>,
    config: WizardConfig,
    draft: Draft,
    step: WizardStep,
    quiz_id: Option<Uuid>,
    section_ids: Vec<Uuid>,
    review: ReviewEditor,
    poller: Option<PollerHandle>,
    processing_error: Option<String>,
    published_url: Option<String>,
    publish_requested: bool,
    on_done: Option<Box<dyn Fn() + Send + Sync>>,
}

impl CreationWizard {
    /// Open the wizard, rehydrating any persisted draft.
    pub fn new(
        backend: Arc<dyn QuizzerBackend>,
        store: Box<dyn DraftStore>,
        config: WizardConfig,
    ) -> Self {
        let draft = store.load();
        Self {
            review: ReviewEditor::new(backend.clone()),
            backend,
            store,
            config,
            draft,
            step: WizardStep::Source,
            quiz_id: None,
            section_ids: Vec::new(),
            poller: None,
            processing_error: None,
            published_url: None,
            publish_requested: false,
            on_done: None,
        }
    }

    /// Open the wizard over the file-backed store at `config.draft_path`.
    pub fn with_file_store(backend: Arc<dyn QuizzerBackend>, config: WizardConfig) -> Self {
        let store = Box::new(FileDraftStore::new(config.draft_path.clone()));
        Self::new(backend, store, config)
    }

    /// Register a completion callback, invoked after a successful publish.
    pub fn with_on_done(mut self, on_done: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_done = Some(Box::new(on_done));
        self
    }

    // ─── Accessors ────────────────────────────────────────────────────────

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn quiz_id(&self) -> Option<Uuid> {
        self.quiz_id
    }

    pub fn section_ids(&self) -> &[Uuid] {
        &self.section_ids
    }

    pub fn questions(&self) -> &[Question] {
        self.review.questions()
    }

    pub fn processing_error(&self) -> Option<&str> {
        self.processing_error.as_deref()
    }

    pub fn published_url(&self) -> Option<&str> {
        self.published_url.as_deref()
    }

    // ─── Draft editing (each mutation persists wholesale) ─────────────────

    pub fn set_title(&mut self, title: impl Into<String>) -> Result<(), WizardError> {
        self.draft.title = title.into();
        self.persist()
    }

    pub fn set_description(&mut self, description: impl Into<String>) -> Result<(), WizardError> {
        self.draft.description = description.into();
        self.persist()
    }

    pub fn set_source_text(&mut self, source_text: impl Into<String>) -> Result<(), WizardError> {
        self.draft.source_text = source_text.into();
        self.persist()
    }

    pub fn add_section(&mut self) -> Result<(), WizardError> {
        blueprint::add_section(&mut self.draft.sections);
        self.persist()
    }

    pub fn update_section(&mut self, section: SectionBlueprint) -> Result<(), WizardError> {
        blueprint::update_section(&mut self.draft.sections, section);
        self.persist()
    }

    pub fn remove_section(&mut self, id: Uuid) -> Result<(), WizardError> {
        blueprint::remove_section(&mut self.draft.sections, id);
        self.persist()
    }

    pub fn move_section(&mut self, from: usize, to: usize) -> Result<(), WizardError> {
        blueprint::move_section(&mut self.draft.sections, from, to);
        self.persist()
    }

    pub fn total_blueprint_questions(&self) -> u32 {
        blueprint::total_questions(&self.draft.sections)
    }

    pub fn total_marks(&self) -> u32 {
        blueprint::total_marks(&self.draft.sections)
    }

    pub fn can_start(&self) -> bool {
        self.draft.can_start()
    }

    // ─── Step navigation ──────────────────────────────────────────────────

    /// Source -> Structure. Gated by `canStart`; no network call.
    pub fn goto_structure(&mut self) -> Result<(), WizardError> {
        if !self.can_start() {
            return Err(WizardError::Validation(
                "a title longer than 2 characters, source text, and at least one section are required"
                    .to_string(),
            ));
        }
        self.step = self.step.transition(WizardStep::Structure)?;
        Ok(())
    }

    /// Structure -> Source (the Back button).
    pub fn back_to_source(&mut self) -> Result<(), WizardError> {
        self.step = self.step.transition(WizardStep::Source)?;
        Ok(())
    }

    /// Explicit restart: back to the source step, poller torn down, draft
    /// and quiz identity kept.
    pub fn restart(&mut self) {
        self.poller = None;
        self.processing_error = None;
        self.publish_requested = false;
        self.step = WizardStep::Source;
    }

    /// Discard the persisted draft and reset the working state.
    pub fn discard_draft(&mut self) -> Result<(), WizardError> {
        self.store.clear()?;
        self.draft = Draft::default();
        self.restart();
        Ok(())
    }

    // ─── Generation orchestration ─────────────────────────────────────────

    /// Structure -> Processing: create the quiz, fan out all section
    /// creations (all-or-nothing), submit the generation job, start the
    /// poller. On any sub-step failure the step stays `Structure` and
    /// already-created entities are left in place; there is no rollback.
    pub async fn start_processing(&mut self) -> Result<Uuid, WizardError> {
        self.step.transition(WizardStep::Processing)?;
        if !self.can_start() {
            return Err(WizardError::Validation(
                "draft is not ready for generation".to_string(),
            ));
        }
        if self.quiz_id.is_some() {
            // A quiz is created exactly once per wizard lifetime.
            return Err(WizardError::Validation(
                "AI generation already started for this quiz".to_string(),
            ));
        }

        let description = if self.draft.description.trim().is_empty() {
            "AI-generated quiz".to_string()
        } else {
            self.draft.description.clone()
        };
        let quiz = self
            .backend
            .create_quiz(CreateQuizRequest {
                title: self.draft.title.clone(),
                description,
            })
            .await
            .map_err(WizardError::Submission)?;
        info!("[WIZARD] created quiz {}", quiz.id);

        let section_futures: Vec<_> = self
            .draft
            .sections
            .iter()
            .map(|section| {
                let backend = Arc::clone(&self.backend);
                let quiz_id = quiz.id;
                let req = CreateSectionRequest {
                    title: section.title.clone(),
                    total_marks: (section.number_of_questions * section.marks_per_question)
                        as i64,
                };
                async move { backend.create_section(quiz_id, req).await }
            })
            .collect();
        let sections = match try_join_all(section_futures).await {
            Ok(sections) => sections,
            Err(e) => {
                warn!(
                    "[WIZARD] section creation failed for quiz {}; created entities remain: {}",
                    quiz.id, e
                );
                return Err(WizardError::Submission(e));
            }
        };

        let generate = GenerateRequest {
            extracted_text: self.draft.source_text.clone(),
            blueprint: Blueprint {
                sections: self.draft.sections.clone(),
            },
            professor_note: Some(self.config.professor_note.clone()),
        };
        if let Err(e) = self.backend.submit_generation(quiz.id, generate).await {
            warn!(
                "[WIZARD] generation submit failed for quiz {}; quiz and {} sections remain: {}",
                quiz.id,
                sections.len(),
                e
            );
            return Err(WizardError::Submission(e));
        }

        self.quiz_id = Some(quiz.id);
        self.section_ids = sections.iter().map(|s| s.id).collect();
        self.processing_error = None;
        self.step = WizardStep::Processing;
        self.poller = Some(JobPoller::spawn(
            Arc::clone(&self.backend),
            quiz.id,
            self.config.poll_interval,
        ));
        info!("[WIZARD] AI generation started for quiz {}", quiz.id);
        Ok(quiz.id)
    }

    /// Wait for the poller's terminal outcome and apply it: questions move
    /// the wizard into review; an empty result keeps it on the processing
    /// step with a recoverable message. No automatic retry either way.
    pub async fn wait_for_generation(&mut self) -> Result<(), WizardError> {
        let outcome = match self.poller.as_mut() {
            Some(poller) => poller.recv().await,
            None => {
                return Err(WizardError::Validation(
                    "no generation in progress".to_string(),
                ))
            }
        };
        self.poller = None;
        match outcome {
            Some(outcome) => self.apply_outcome(outcome),
            None => Err(WizardError::Validation(
                "generation polling was cancelled".to_string(),
            )),
        }
    }

    /// Apply a poll outcome directly (used when the caller drives the
    /// poller handle itself).
    pub fn apply_outcome(&mut self, outcome: PollOutcome) -> Result<(), WizardError> {
        match outcome {
            PollOutcome::QuestionsReady(questions) => {
                self.processing_error = None;
                self.review.set_questions(questions);
                self.step = WizardStep::Review;
                Ok(())
            }
            PollOutcome::NoQuestions => {
                self.processing_error = Some(GENERATION_EMPTY_MESSAGE.to_string());
                Err(WizardError::GenerationEmpty)
            }
        }
    }

    /// Resubmit the generation job for the already-created quiz after a
    /// generation-empty outcome. User-driven; never automatic.
    pub async fn retry_generation(&mut self) -> Result<(), WizardError> {
        if self.step != WizardStep::Processing {
            return Err(WizardError::InvalidTransition {
                from: self.step,
                to: WizardStep::Processing,
            });
        }
        let quiz_id = self.require_quiz_id()?;
        let generate = GenerateRequest {
            extracted_text: self.draft.source_text.clone(),
            blueprint: Blueprint {
                sections: self.draft.sections.clone(),
            },
            professor_note: Some(self.config.professor_note.clone()),
        };
        self.backend
            .submit_generation(quiz_id, generate)
            .await
            .map_err(WizardError::Submission)?;
        self.processing_error = None;
        self.poller = Some(JobPoller::spawn(
            Arc::clone(&self.backend),
            quiz_id,
            self.config.poll_interval,
        ));
        Ok(())
    }

    /// Manual override: Processing -> Review without waiting for the poll
    /// outcome. Requires a quiz id; tears down the poller.
    pub async fn skip_to_review(&mut self) -> Result<(), WizardError> {
        let quiz_id = self.require_quiz_id()?;
        self.step = self.step.transition(WizardStep::Review)?;
        self.poller = None;
        if let Err(e) = self.review.refresh(quiz_id).await {
            warn!("[WIZARD] review refresh after skip failed: {}", e);
        }
        Ok(())
    }

    // ─── Review operations ────────────────────────────────────────────────

    pub async fn update_question(
        &mut self,
        question_id: Uuid,
        patch: UpdateQuestionRequest,
    ) -> Result<(), WizardError> {
        self.review.update_field(question_id, patch).await
    }

    pub async fn regenerate_question(&mut self, question_id: Uuid) -> Result<(), WizardError> {
        let quiz_id = self.require_quiz_id()?;
        self.review.regenerate(quiz_id, question_id).await
    }

    pub async fn delete_question(&mut self, question_id: Uuid) -> Result<(), WizardError> {
        let quiz_id = self.require_quiz_id()?;
        self.review.delete(quiz_id, question_id).await
    }

    pub async fn approve_question(&mut self, question_id: Uuid) -> Result<(), WizardError> {
        self.review.approve(question_id).await
    }

    /// Insert the stock manual question into the first created section.
    /// Disallowed until at least one section exists.
    pub async fn create_manual_question(&mut self) -> Result<(), WizardError> {
        let quiz_id = self.require_quiz_id()?;
        let section_id = *self.section_ids.first().ok_or_else(|| {
            WizardError::Validation(
                "at least one section is required before adding a manual question".to_string(),
            )
        })?;
        self.review.create_manual(quiz_id, section_id).await
    }

    pub async fn refresh_questions(&mut self) -> Result<(), WizardError> {
        let quiz_id = self.require_quiz_id()?;
        self.review.refresh(quiz_id).await
    }

    // ─── Publish gate ─────────────────────────────────────────────────────

    pub fn can_finalize(&self) -> bool {
        publish::can_finalize(
            self.quiz_id,
            self.review.questions(),
            self.total_blueprint_questions(),
        )
    }

    /// First phase: validate readiness and arm the confirmation step.
    pub fn request_publish(&mut self) -> Result<(), WizardError> {
        if !self.can_finalize() {
            return Err(WizardError::Validation(
                "quiz is not ready to publish: generated count, marks, and question approvals must be complete"
                    .to_string(),
            ));
        }
        self.publish_requested = true;
        Ok(())
    }

    pub fn cancel_publish(&mut self) {
        self.publish_requested = false;
    }

    /// Second phase: commit publication. Requires a prior `request_publish`.
    /// On success the persisted draft is cleared, the public URL retained,
    /// and the completion callback invoked. On failure the draft is left
    /// untouched and the server's validation message is surfaced.
    pub async fn confirm_publish(&mut self) -> Result<Option<String>, WizardError> {
        if !self.publish_requested {
            return Err(WizardError::Validation(
                "publish has not been requested".to_string(),
            ));
        }
        self.publish_requested = false;
        let quiz_id = self.require_quiz_id()?;

        match self.backend.publish_quiz(quiz_id).await {
            Ok(resp) => {
                self.store.clear()?;
                self.published_url = resp.public_url.clone();
                info!("[WIZARD] quiz {} published", quiz_id);
                if let Some(on_done) = &self.on_done {
                    on_done();
                }
                Ok(resp.public_url)
            }
            Err(QuizzerClientError::Api(detail)) => Err(WizardError::Publish(detail)),
            Err(e) => {
                debug!("[WIZARD] publish failed without detail: {}", e);
                Err(WizardError::Publish(PUBLISH_FAILED_MESSAGE.to_string()))
            }
        }
    }

    // ─── Command channel ──────────────────────────────────────────────────

    /// Handle one console command. The set is closed; anything UI-owned is
    /// acknowledged and left to the console.
    pub async fn handle_command(&mut self, command: WizardCommand) -> Result<(), WizardError> {
        match command {
            WizardCommand::FocusSearch => {
                debug!("[WIZARD] focus-search is console-owned; ignoring");
                Ok(())
            }
            WizardCommand::BulkRegenerate => {
                let quiz_id = self.require_quiz_id()?;
                self.review.regenerate_all(quiz_id).await
            }
            WizardCommand::BulkPublish => {
                self.request_publish()?;
                self.confirm_publish().await.map(|_| ())
            }
        }
    }

    // ─── Internals ────────────────────────────────────────────────────────

    fn require_quiz_id(&self) -> Result<Uuid, WizardError> {
        self.quiz_id
            .ok_or_else(|| WizardError::Validation("no quiz has been created yet".to_string()))
    }

    fn persist(&mut self) -> Result<(), WizardError> {
        self.store.save(&self.draft)?;
        Ok(())
    }
}
