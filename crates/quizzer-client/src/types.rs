//! Wire types for the Quizzer API

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use ts_rs::TS;
use uuid::Uuid;

/// AI generation lifecycle of a quiz.
///
/// The backend persists these as strings; older rows may still carry
/// `NOT_STARTED`, which maps onto `Draft`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuizStatus {
    #[serde(alias = "NOT_STARTED")]
    Draft,
    Processing,
    Generated,
    Reviewing,
    Approved,
    Published,
    Closed,
    Failed,
}

impl std::fmt::Display for QuizStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuizStatus::Draft => write!(f, "DRAFT"),
            QuizStatus::Processing => write!(f, "PROCESSING"),
            QuizStatus::Generated => write!(f, "GENERATED"),
            QuizStatus::Reviewing => write!(f, "REVIEWING"),
            QuizStatus::Approved => write!(f, "APPROVED"),
            QuizStatus::Published => write!(f, "PUBLISHED"),
            QuizStatus::Closed => write!(f, "CLOSED"),
            QuizStatus::Failed => write!(f, "FAILED"),
        }
    }
}

/// Review state of a single question. Freshly generated questions arrive
/// as `Draft`; manual insertions start as `Pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuestionStatus {
    Draft,
    Pending,
    Approved,
    Rejected,
}

impl std::fmt::Display for QuestionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuestionStatus::Draft => write!(f, "DRAFT"),
            QuestionStatus::Pending => write!(f, "PENDING"),
            QuestionStatus::Approved => write!(f, "APPROVED"),
            QuestionStatus::Rejected => write!(f, "REJECTED"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuestionType {
    Mcq,
    TrueFalse,
    ShortAnswer,
    LongAnswer,
}

/// Difficulty is capitalized on the wire (`"Easy"`, not `"EASY"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// One section specification inside a generation blueprint.
///
/// Field names are camelCase because the blueprint is shared verbatim with
/// the TypeScript console and echoed back to the generation job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct SectionBlueprint {
    pub id: Uuid,
    pub title: String,
    pub number_of_questions: u32,
    pub question_type: QuestionType,
    pub marks_per_question: u32,
    pub difficulty: Difficulty,
    #[serde(default)]
    pub bloom_level: Option<String>,
}

/// The full structural blueprint submitted with a generation job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
pub struct Blueprint {
    pub sections: Vec<SectionBlueprint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
pub struct Quiz {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub ai_generation_status: QuizStatus,
    #[serde(default)]
    pub is_published: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
pub struct Section {
    pub id: Uuid,
    pub quiz_id: Uuid,
    pub title: String,
    pub total_marks: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
pub struct Question {
    pub id: Uuid,
    pub section_id: Uuid,
    pub question_text: String,
    pub question_type: QuestionType,
    pub marks: i64,
    /// List of option strings, or a map of label -> text; the backend
    /// stores whatever the generation job produced.
    #[serde(default)]
    pub options: Option<Value>,
    #[serde(default)]
    pub correct_answer: Option<String>,
    #[serde(default)]
    pub difficulty: Option<Difficulty>,
    pub status: QuestionStatus,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
pub struct PublishResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub public_url: Option<String>,
}

/// Create quiz request
#[derive(Debug, Clone, Serialize)]
pub struct CreateQuizRequest {
    pub title: String,
    pub description: String,
}

/// Create section request
#[derive(Debug, Clone, Serialize)]
pub struct CreateSectionRequest {
    pub title: String,
    pub total_marks: i64,
}

/// Generation job submission
#[derive(Debug, Clone, Serialize)]
pub struct GenerateRequest {
    pub extracted_text: String,
    pub blueprint: Blueprint,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub professor_note: Option<String>,
}

/// Generation job acceptance ack
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateResponse {
    pub message: String,
}

/// Manual question creation
#[derive(Debug, Clone, Serialize)]
pub struct CreateQuestionRequest {
    pub section_id: Uuid,
    pub question_text: String,
    pub question_type: QuestionType,
    pub marks: i64,
    pub options: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correct_answer: Option<String>,
}

/// Partial question update; only the populated fields are sent.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateQuestionRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marks: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correct_answer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<QuestionStatus>,
}

/// Health check response
#[derive(Debug, Clone, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}
