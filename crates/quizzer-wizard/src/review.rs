//! Review editing
//!
//! Per-question operations against the generated set. Edits are reflected
//! locally before the request is issued (optimistic); a failed request is
//! reported but the local copy is not reverted. Between overlapping edits
//! to the same field the last response received wins, which may not be the
//! last edit issued. Regenerate/delete/create invalidate coarsely with a
//! full refetch rather than a point update.

use std::sync::Arc;

use quizzer_client::{
    CreateQuestionRequest, Question, QuestionStatus, QuestionType, UpdateQuestionRequest,
};
use serde_json::json;
use tracing::{info, warn};
use uuid::Uuid;

use crate::backend::QuizzerBackend;
use crate::error::WizardError;

/// Stock content for a manually inserted question.
pub const MANUAL_QUESTION_TEXT: &str = "New manual question";

pub struct ReviewEditor {
    backend: Arc<dyn QuizzerBackend>,
    questions: Vec<Question>,
}

impl ReviewEditor {
    pub fn new(backend: Arc<dyn QuizzerBackend>) -> Self {
        Self {
            backend,
            questions: Vec::new(),
        }
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn set_questions(&mut self, questions: Vec<Question>) {
        self.questions = questions;
    }

    /// Refetch the full question list for the quiz.
    pub async fn refresh(&mut self, quiz_id: Uuid) -> Result<(), WizardError> {
        self.questions = self
            .backend
            .get_questions(quiz_id)
            .await
            .map_err(|source| WizardError::Mutation { action: "refresh", source })?;
        Ok(())
    }

    /// Apply a partial edit. The local copy changes first; the request is
    /// then issued and its failure reported without reverting.
    pub async fn update_field(
        &mut self,
        question_id: Uuid,
        patch: UpdateQuestionRequest,
    ) -> Result<(), WizardError> {
        if let Some(question) = self.questions.iter_mut().find(|q| q.id == question_id) {
            apply_patch(question, &patch);
        }
        self.backend
            .update_question(question_id, patch)
            .await
            .map_err(|source| WizardError::Mutation { action: "update", source })
    }

    /// Regenerate one question's content server-side, then refetch the
    /// whole list. Regeneration preserves question identity.
    pub async fn regenerate(&mut self, quiz_id: Uuid, question_id: Uuid) -> Result<(), WizardError> {
        self.backend
            .regenerate_question(question_id)
            .await
            .map_err(|source| WizardError::Mutation { action: "regenerate", source })?;
        self.refresh(quiz_id).await
    }

    /// Delete one question, then refetch the list.
    pub async fn delete(&mut self, quiz_id: Uuid, question_id: Uuid) -> Result<(), WizardError> {
        self.backend
            .delete_question(question_id)
            .await
            .map_err(|source| WizardError::Mutation { action: "delete", source })?;
        self.refresh(quiz_id).await
    }

    /// Insert the stock manual question into the given section, then
    /// refetch the list.
    pub async fn create_manual(&mut self, quiz_id: Uuid, section_id: Uuid) -> Result<(), WizardError> {
        let req = CreateQuestionRequest {
            section_id,
            question_text: MANUAL_QUESTION_TEXT.to_string(),
            question_type: QuestionType::Mcq,
            marks: 2,
            options: json!(["Option A", "Option B", "Option C", "Option D"]),
            correct_answer: Some("Option A".to_string()),
        };
        let created = self
            .backend
            .create_question(req)
            .await
            .map_err(|source| WizardError::Mutation { action: "create", source })?;
        info!("[REVIEW] added manual question {}", created.id);
        self.refresh(quiz_id).await
    }

    /// Approve a question for publication; optimistic local status flip.
    pub async fn approve(&mut self, question_id: Uuid) -> Result<(), WizardError> {
        if let Some(question) = self.questions.iter_mut().find(|q| q.id == question_id) {
            question.status = QuestionStatus::Approved;
        }
        self.backend
            .approve_question(question_id)
            .await
            .map_err(|source| WizardError::Mutation { action: "approve", source })
    }

    /// Regenerate every question, then refetch once. Individual failures
    /// are reported via the log and skipped; nothing is retried.
    pub async fn regenerate_all(&mut self, quiz_id: Uuid) -> Result<(), WizardError> {
        let ids: Vec<Uuid> = self.questions.iter().map(|q| q.id).collect();
        for id in ids {
            if let Err(e) = self.backend.regenerate_question(id).await {
                warn!("[REVIEW] bulk regenerate skipped question {}: {}", id, e);
            }
        }
        self.refresh(quiz_id).await
    }
}

fn apply_patch(question: &mut Question, patch: &UpdateQuestionRequest) {
    if let Some(text) = &patch.question_text {
        question.question_text = text.clone();
    }
    if let Some(marks) = patch.marks {
        question.marks = marks;
    }
    if let Some(options) = &patch.options {
        question.options = Some(options.clone());
    }
    if let Some(answer) = &patch.correct_answer {
        question.correct_answer = Some(answer.clone());
    }
    if let Some(difficulty) = patch.difficulty {
        question.difficulty = Some(difficulty);
    }
    if let Some(status) = patch.status {
        question.status = status;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use quizzer_client::{
        CreateQuizRequest, CreateSectionRequest, GenerateRequest, PublishResponse, Quiz,
        QuizzerClientError, Section,
    };
    use std::sync::Mutex;

    /// Backend where every mutation fails and fetches return a fixed list.
    struct FlakyBackend {
        served: Mutex<Vec<Question>>,
    }

    #[async_trait]
    impl QuizzerBackend for FlakyBackend {
        async fn create_quiz(&self, _req: CreateQuizRequest) -> Result<Quiz, QuizzerClientError> {
            unimplemented!()
        }

        async fn get_quiz(&self, _quiz_id: Uuid) -> Result<Quiz, QuizzerClientError> {
            unimplemented!()
        }

        async fn create_section(
            &self,
            _quiz_id: Uuid,
            _req: CreateSectionRequest,
        ) -> Result<Section, QuizzerClientError> {
            unimplemented!()
        }

        async fn submit_generation(
            &self,
            _quiz_id: Uuid,
            _req: GenerateRequest,
        ) -> Result<(), QuizzerClientError> {
            unimplemented!()
        }

        async fn get_questions(&self, _quiz_id: Uuid) -> Result<Vec<Question>, QuizzerClientError> {
            Ok(self.served.lock().unwrap().clone())
        }

        async fn update_question(
            &self,
            _question_id: Uuid,
            _patch: UpdateQuestionRequest,
        ) -> Result<(), QuizzerClientError> {
            Err(QuizzerClientError::Api("update rejected".to_string()))
        }

        async fn delete_question(&self, _question_id: Uuid) -> Result<(), QuizzerClientError> {
            Err(QuizzerClientError::Api("delete rejected".to_string()))
        }

        async fn regenerate_question(&self, _question_id: Uuid) -> Result<(), QuizzerClientError> {
            Err(QuizzerClientError::Api("regenerate rejected".to_string()))
        }

        async fn create_question(
            &self,
            _req: CreateQuestionRequest,
        ) -> Result<Question, QuizzerClientError> {
            Err(QuizzerClientError::Api("create rejected".to_string()))
        }

        async fn approve_question(&self, _question_id: Uuid) -> Result<(), QuizzerClientError> {
            Err(QuizzerClientError::Api("approve rejected".to_string()))
        }

        async fn publish_quiz(&self, _quiz_id: Uuid) -> Result<PublishResponse, QuizzerClientError> {
            unimplemented!()
        }
    }

    fn question() -> Question {
        Question {
            id: Uuid::new_v4(),
            section_id: Uuid::new_v4(),
            question_text: "original text".to_string(),
            question_type: QuestionType::Mcq,
            marks: 2,
            options: None,
            correct_answer: None,
            difficulty: None,
            status: QuestionStatus::Draft,
            created_at: None,
        }
    }

    #[tokio::test]
    async fn update_applies_optimistically_and_keeps_local_copy_on_failure() {
        let q = question();
        let id = q.id;
        let backend = Arc::new(FlakyBackend { served: Mutex::new(vec![q.clone()]) });
        let mut editor = ReviewEditor::new(backend);
        editor.set_questions(vec![q]);

        let patch = UpdateQuestionRequest {
            question_text: Some("edited text".to_string()),
            marks: Some(5),
            ..Default::default()
        };
        let err = editor.update_field(id, patch).await.unwrap_err();
        assert!(matches!(err, WizardError::Mutation { action: "update", .. }));

        // Optimistic reflection survives the failed request.
        let local = &editor.questions()[0];
        assert_eq!(local.question_text, "edited text");
        assert_eq!(local.marks, 5);
    }

    #[tokio::test]
    async fn approve_flips_local_status_before_request_resolves() {
        let q = question();
        let id = q.id;
        let backend = Arc::new(FlakyBackend { served: Mutex::new(vec![q.clone()]) });
        let mut editor = ReviewEditor::new(backend);
        editor.set_questions(vec![q]);

        let _ = editor.approve(id).await;
        assert_eq!(editor.questions()[0].status, QuestionStatus::Approved);
    }

    #[tokio::test]
    async fn failed_regenerate_reports_without_refetching() {
        let q = question();
        let id = q.id;
        let backend = Arc::new(FlakyBackend { served: Mutex::new(Vec::new()) });
        let mut editor = ReviewEditor::new(backend);
        editor.set_questions(vec![q]);

        let err = editor.regenerate(Uuid::new_v4(), id).await.unwrap_err();
        assert!(matches!(err, WizardError::Mutation { action: "regenerate", .. }));
        // The coarse refetch only happens after a successful call.
        assert_eq!(editor.questions().len(), 1);
    }
}
