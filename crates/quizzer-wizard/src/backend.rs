//! Backend port
//!
//! The collaborator operations the wizard consumes, behind an injectable
//! trait so tests can substitute scripted backends. `QuizzerClient` is the
//! production implementation.

use async_trait::async_trait;
use quizzer_client::{
    CreateQuestionRequest, CreateQuizRequest, CreateSectionRequest, GenerateRequest,
    PublishResponse, Question, Quiz, QuizzerClient, QuizzerClientError, Section,
    UpdateQuestionRequest,
};
use uuid::Uuid;

#[async_trait]
pub trait QuizzerBackend: Send + Sync {
    async fn create_quiz(&self, req: CreateQuizRequest) -> Result<Quiz, QuizzerClientError>;
    async fn get_quiz(&self, quiz_id: Uuid) -> Result<Quiz, QuizzerClientError>;
    async fn create_section(
        &self,
        quiz_id: Uuid,
        req: CreateSectionRequest,
    ) -> Result<Section, QuizzerClientError>;
    async fn submit_generation(
        &self,
        quiz_id: Uuid,
        req: GenerateRequest,
    ) -> Result<(), QuizzerClientError>;
    async fn get_questions(&self, quiz_id: Uuid) -> Result<Vec<Question>, QuizzerClientError>;
    async fn update_question(
        &self,
        question_id: Uuid,
        patch: UpdateQuestionRequest,
    ) -> Result<(), QuizzerClientError>;
    async fn delete_question(&self, question_id: Uuid) -> Result<(), QuizzerClientError>;
    async fn regenerate_question(&self, question_id: Uuid) -> Result<(), QuizzerClientError>;
    async fn create_question(
        &self,
        req: CreateQuestionRequest,
    ) -> Result<Question, QuizzerClientError>;
    async fn approve_question(&self, question_id: Uuid) -> Result<(), QuizzerClientError>;
    async fn publish_quiz(&self, quiz_id: Uuid) -> Result<PublishResponse, QuizzerClientError>;
}

#[async_trait]
impl QuizzerBackend for QuizzerClient {
    async fn create_quiz(&self, req: CreateQuizRequest) -> Result<Quiz, QuizzerClientError> {
        QuizzerClient::create_quiz(self, req).await
    }

    async fn get_quiz(&self, quiz_id: Uuid) -> Result<Quiz, QuizzerClientError> {
        QuizzerClient::get_quiz(self, quiz_id).await
    }

    async fn create_section(
        &self,
        quiz_id: Uuid,
        req: CreateSectionRequest,
    ) -> Result<Section, QuizzerClientError> {
        QuizzerClient::create_section(self, quiz_id, req).await
    }

    async fn submit_generation(
        &self,
        quiz_id: Uuid,
        req: GenerateRequest,
    ) -> Result<(), QuizzerClientError> {
        QuizzerClient::submit_generation(self, quiz_id, req).await.map(|_| ())
    }

    async fn get_questions(&self, quiz_id: Uuid) -> Result<Vec<Question>, QuizzerClientError> {
        QuizzerClient::get_questions(self, quiz_id).await
    }

    async fn update_question(
        &self,
        question_id: Uuid,
        patch: UpdateQuestionRequest,
    ) -> Result<(), QuizzerClientError> {
        QuizzerClient::update_question(self, question_id, patch).await
    }

    async fn delete_question(&self, question_id: Uuid) -> Result<(), QuizzerClientError> {
        QuizzerClient::delete_question(self, question_id).await
    }

    async fn regenerate_question(&self, question_id: Uuid) -> Result<(), QuizzerClientError> {
        QuizzerClient::regenerate_question(self, question_id).await
    }

    async fn create_question(
        &self,
        req: CreateQuestionRequest,
    ) -> Result<Question, QuizzerClientError> {
        QuizzerClient::create_question(self, req).await
    }

    async fn approve_question(&self, question_id: Uuid) -> Result<(), QuizzerClientError> {
        QuizzerClient::approve_question(self, question_id).await
    }

    async fn publish_quiz(&self, quiz_id: Uuid) -> Result<PublishResponse, QuizzerClientError> {
        QuizzerClient::publish_quiz(self, quiz_id).await
    }
}
