//! Blueprint editing
//!
//! Pure operations over the ordered section list. Totals are recomputed on
//! every read, never cached or incrementally maintained.

use quizzer_client::SectionBlueprint;
use uuid::Uuid;

use crate::draft::default_section;

/// Append a defaulted section ("Section N", 5 questions, MCQ, 2 marks,
/// Medium) and return a reference to it.
pub fn add_section(sections: &mut Vec<SectionBlueprint>) -> &SectionBlueprint {
    let section = default_section(sections.len());
    sections.push(section);
    sections.last().expect("section just pushed")
}

/// Replace the section whose id matches. Unknown ids are a no-op.
pub fn update_section(sections: &mut [SectionBlueprint], next: SectionBlueprint) {
    if let Some(slot) = sections.iter_mut().find(|s| s.id == next.id) {
        *slot = next;
    }
}

/// Remove the section with the given id, if present.
pub fn remove_section(sections: &mut Vec<SectionBlueprint>, id: Uuid) {
    sections.retain(|s| s.id != id);
}

/// Reposition a single section. No-op when `from == to` or either index is
/// outside `[0, len)`.
pub fn move_section(sections: &mut Vec<SectionBlueprint>, from: usize, to: usize) {
    if from == to || from >= sections.len() || to >= sections.len() {
        return;
    }
    let picked = sections.remove(from);
    sections.insert(to, picked);
}

/// Total questions the blueprint asks for.
pub fn total_questions(sections: &[SectionBlueprint]) -> u32 {
    sections.iter().map(|s| s.number_of_questions).sum()
}

/// Total marks across the blueprint.
pub fn total_marks(sections: &[SectionBlueprint]) -> u32 {
    sections
        .iter()
        .map(|s| s.number_of_questions * s.marks_per_question)
        .sum()
}
