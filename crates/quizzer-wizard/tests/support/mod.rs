//! Scriptable in-memory backend for end-to-end wizard tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use quizzer_client::{
    CreateQuestionRequest, CreateQuizRequest, CreateSectionRequest, GenerateRequest,
    PublishResponse, Question, QuestionStatus, Quiz, QuizStatus, QuizzerClientError, Section,
    UpdateQuestionRequest,
};
use quizzer_wizard::store::{DraftStore, MemoryDraftStore, StoreError};
use quizzer_wizard::Draft;
use serde_json::json;
use uuid::Uuid;

/// Route wizard tracing through the test harness when `RUST_LOG` is set.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[derive(Default)]
pub struct MockState {
    pub quizzes: Vec<Quiz>,
    pub sections: Vec<Section>,
    pub questions: Vec<Question>,
    /// Statuses returned by successive `get_quiz` calls; the last entry
    /// repeats once the script runs out.
    pub status_script: VecDeque<QuizStatus>,
    pub current_status: Option<QuizStatus>,
    /// Section titles whose creation is rejected.
    pub failing_section_titles: Vec<String>,
    /// Rejection detail returned from `publish_quiz`, if any.
    pub publish_rejection: Option<String>,
    /// Whether a submitted generation job produces questions.
    pub produce_questions: bool,
    pub get_quiz_calls: usize,
    pub get_questions_calls: usize,
    pub submit_calls: usize,
    pub regenerated: Vec<Uuid>,
}

pub struct MockBackend {
    state: Mutex<MockState>,
}

impl MockBackend {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            state: Mutex::new(MockState {
                produce_questions: true,
                ..MockState::default()
            }),
        })
    }

    pub fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap()
    }

    pub fn script_statuses(&self, statuses: impl IntoIterator<Item = QuizStatus>) {
        self.state().status_script = statuses.into_iter().collect();
    }

    pub fn fail_section(&self, title: &str) {
        self.state().failing_section_titles.push(title.to_string());
    }

    pub fn reject_publish(&self, detail: &str) {
        self.state().publish_rejection = Some(detail.to_string());
    }

    pub fn set_produce_questions(&self, produce: bool) {
        self.state().produce_questions = produce;
    }
}

#[async_trait]
impl quizzer_wizard::QuizzerBackend for MockBackend {
    async fn create_quiz(&self, req: CreateQuizRequest) -> Result<Quiz, QuizzerClientError> {
        let mut state = self.state();
        let quiz = Quiz {
            id: Uuid::new_v4(),
            title: req.title,
            description: Some(req.description),
            ai_generation_status: QuizStatus::Draft,
            is_published: false,
            created_at: None,
        };
        state.quizzes.push(quiz.clone());
        Ok(quiz)
    }

    async fn get_quiz(&self, quiz_id: Uuid) -> Result<Quiz, QuizzerClientError> {
        let mut state = self.state();
        state.get_quiz_calls += 1;
        if let Some(next) = state.status_script.pop_front() {
            state.current_status = Some(next);
        }
        let status = state.current_status.unwrap_or(QuizStatus::Generated);
        let mut quiz = state
            .quizzes
            .iter()
            .find(|q| q.id == quiz_id)
            .cloned()
            .ok_or_else(|| QuizzerClientError::Api("Quiz not found".to_string()))?;
        quiz.ai_generation_status = status;
        Ok(quiz)
    }

    async fn create_section(
        &self,
        quiz_id: Uuid,
        req: CreateSectionRequest,
    ) -> Result<Section, QuizzerClientError> {
        let mut state = self.state();
        if state.failing_section_titles.contains(&req.title) {
            return Err(QuizzerClientError::Api(format!(
                "Section '{}' was rejected",
                req.title
            )));
        }
        let section = Section {
            id: Uuid::new_v4(),
            quiz_id,
            title: req.title,
            total_marks: req.total_marks,
        };
        state.sections.push(section.clone());
        Ok(section)
    }

    async fn submit_generation(
        &self,
        _quiz_id: Uuid,
        req: GenerateRequest,
    ) -> Result<(), QuizzerClientError> {
        let mut state = self.state();
        state.submit_calls += 1;
        if !state.produce_questions {
            return Ok(());
        }
        let mut generated = Vec::new();
        for blueprint_section in &req.blueprint.sections {
            let section_id = state
                .sections
                .iter()
                .find(|s| s.title == blueprint_section.title)
                .map(|s| s.id)
                .unwrap_or_else(Uuid::new_v4);
            for i in 0..blueprint_section.number_of_questions {
                generated.push(Question {
                    id: Uuid::new_v4(),
                    section_id,
                    question_text: format!("Question {} of {}", i + 1, blueprint_section.title),
                    question_type: blueprint_section.question_type,
                    marks: blueprint_section.marks_per_question as i64,
                    options: Some(json!(["A", "B", "C", "D"])),
                    correct_answer: Some("A".to_string()),
                    difficulty: Some(blueprint_section.difficulty),
                    status: QuestionStatus::Draft,
                    created_at: None,
                });
            }
        }
        state.questions = generated;
        Ok(())
    }

    async fn get_questions(&self, _quiz_id: Uuid) -> Result<Vec<Question>, QuizzerClientError> {
        let mut state = self.state();
        state.get_questions_calls += 1;
        Ok(state.questions.clone())
    }

    async fn update_question(
        &self,
        question_id: Uuid,
        patch: UpdateQuestionRequest,
    ) -> Result<(), QuizzerClientError> {
        let mut state = self.state();
        let question = state
            .questions
            .iter_mut()
            .find(|q| q.id == question_id)
            .ok_or_else(|| QuizzerClientError::Api("Question not found".to_string()))?;
        if let Some(text) = patch.question_text {
            question.question_text = text;
        }
        if let Some(marks) = patch.marks {
            question.marks = marks;
        }
        if let Some(status) = patch.status {
            question.status = status;
        }
        Ok(())
    }

    async fn delete_question(&self, question_id: Uuid) -> Result<(), QuizzerClientError> {
        self.state().questions.retain(|q| q.id != question_id);
        Ok(())
    }

    async fn regenerate_question(&self, question_id: Uuid) -> Result<(), QuizzerClientError> {
        let mut state = self.state();
        state.regenerated.push(question_id);
        let question = state
            .questions
            .iter_mut()
            .find(|q| q.id == question_id)
            .ok_or_else(|| QuizzerClientError::Api("Question not found".to_string()))?;
        question.question_text = format!("Regenerated {}", question_id);
        question.status = QuestionStatus::Draft;
        Ok(())
    }

    async fn create_question(
        &self,
        req: CreateQuestionRequest,
    ) -> Result<Question, QuizzerClientError> {
        let mut state = self.state();
        let question = Question {
            id: Uuid::new_v4(),
            section_id: req.section_id,
            question_text: req.question_text,
            question_type: req.question_type,
            marks: req.marks,
            options: Some(req.options),
            correct_answer: req.correct_answer,
            difficulty: None,
            status: QuestionStatus::Pending,
            created_at: None,
        };
        state.questions.push(question.clone());
        Ok(question)
    }

    async fn approve_question(&self, question_id: Uuid) -> Result<(), QuizzerClientError> {
        let mut state = self.state();
        let question = state
            .questions
            .iter_mut()
            .find(|q| q.id == question_id)
            .ok_or_else(|| QuizzerClientError::Api("Question not found".to_string()))?;
        question.status = QuestionStatus::Approved;
        Ok(())
    }

    async fn publish_quiz(&self, quiz_id: Uuid) -> Result<PublishResponse, QuizzerClientError> {
        let mut state = self.state();
        if let Some(detail) = state.publish_rejection.clone() {
            return Err(QuizzerClientError::Api(detail));
        }
        let quiz = state
            .quizzes
            .iter_mut()
            .find(|q| q.id == quiz_id)
            .ok_or_else(|| QuizzerClientError::Api("Quiz not found".to_string()))?;
        quiz.is_published = true;
        quiz.ai_generation_status = QuizStatus::Published;
        Ok(PublishResponse {
            message: Some("Quiz published".to_string()),
            public_url: Some(format!("/quiz/{quiz_id}/attempt")),
        })
    }
}

/// Draft store the test can keep a handle on while the wizard owns a boxed
/// view of it.
pub struct SharedDraftStore(pub Arc<MemoryDraftStore>);

impl DraftStore for SharedDraftStore {
    fn load(&self) -> Draft {
        self.0.load()
    }

    fn save(&self, draft: &Draft) -> Result<(), StoreError> {
        self.0.save(draft)
    }

    fn clear(&self) -> Result<(), StoreError> {
        self.0.clear()
    }
}
