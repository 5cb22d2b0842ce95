//! Publish gate
//!
//! The readiness predicate over quiz + questions. Committing publication is
//! the wizard's two-phase request/confirm flow; this module owns the pure
//! predicate so it can be tested in isolation.

use quizzer_client::{Question, QuestionStatus};
use uuid::Uuid;

/// `canFinalize`: a quiz entity exists, the generated count has reached the
/// blueprint total, and every question carries positive marks, non-blank
/// text, and `APPROVED` status.
pub fn can_finalize(
    quiz_id: Option<Uuid>,
    questions: &[Question],
    total_blueprint_questions: u32,
) -> bool {
    quiz_id.is_some()
        && !questions.is_empty()
        && questions.len() >= total_blueprint_questions as usize
        && questions.iter().all(|q| {
            q.marks > 0
                && !q.question_text.trim().is_empty()
                && q.status == QuestionStatus::Approved
        })
}
