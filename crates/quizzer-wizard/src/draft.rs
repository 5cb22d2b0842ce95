//! Durable working state of the wizard before a quiz entity exists.

use quizzer_client::{Difficulty, QuestionType, SectionBlueprint};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// The wizard's draft: title, description, pasted source text, and the
/// ordered section blueprint. Persisted wholesale on every mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
pub struct Draft {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub source_text: String,
    #[serde(default)]
    pub sections: Vec<SectionBlueprint>,
}

impl Default for Draft {
    fn default() -> Self {
        // A fresh wizard opens with one pre-seeded section.
        Self {
            title: String::new(),
            description: String::new(),
            source_text: String::new(),
            sections: vec![default_section(0)],
        }
    }
}

impl Draft {
    /// `canStart`: title longer than 2 chars, non-empty source text, and at
    /// least one section. Checked before the source -> structure transition
    /// and again before orchestration; no network call either way.
    pub fn can_start(&self) -> bool {
        self.title.trim().len() > 2
            && !self.source_text.trim().is_empty()
            && !self.sections.is_empty()
    }
}

/// Blueprint defaults for a section appended at `index`.
pub fn default_section(index: usize) -> SectionBlueprint {
    SectionBlueprint {
        id: Uuid::new_v4(),
        title: format!("Section {}", index + 1),
        number_of_questions: 5,
        question_type: QuestionType::Mcq,
        marks_per_question: 2,
        difficulty: Difficulty::Medium,
        bloom_level: None,
    }
}
