//! Wizard step state machine
//!
//! An explicit finite-state machine over named steps. Transitions outside
//! the table are rejected values, never reachable states.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::WizardError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WizardStep {
    Source,
    Structure,
    Processing,
    Review,
}

impl WizardStep {
    /// The transition table. Forward one step at a time, plus the single
    /// allowed backward edge (Structure back to Source). Restart to
    /// `Source` is a separate explicit operation, not a table entry.
    pub fn can_transition(self, to: WizardStep) -> bool {
        use WizardStep::*;
        matches!(
            (self, to),
            (Source, Structure)
                | (Structure, Source)
                | (Structure, Processing)
                | (Processing, Review)
        )
    }

    /// Validate a transition, producing the error the wizard surfaces.
    pub fn transition(self, to: WizardStep) -> Result<WizardStep, WizardError> {
        if self.can_transition(to) {
            Ok(to)
        } else {
            Err(WizardError::InvalidTransition { from: self, to })
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            WizardStep::Source => "Content Source",
            WizardStep::Structure => "Structure",
            WizardStep::Processing => "Processing",
            WizardStep::Review => "Review",
        }
    }
}

impl std::fmt::Display for WizardStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WizardStep::Source => write!(f, "SOURCE"),
            WizardStep::Structure => write!(f, "STRUCTURE"),
            WizardStep::Processing => write!(f, "PROCESSING"),
            WizardStep::Review => write!(f, "REVIEW"),
        }
    }
}
