use serde::{Deserialize, Serialize};

use crate::model::ids::QuestionId;
use crate::model::quiz::ChoiceLabel;

/// One entry of the serialized answer list handed to the submission
/// collaborator, in payload question order. `selected: None` is an explicit
/// "unanswered", distinct from any valid choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmittedAnswer {
    pub question_id: QuestionId,
    pub selected: Option<ChoiceLabel>,
}

/// The learner's current selections, one per question at most.
///
/// Selecting again for the same question overwrites the previous choice.
/// Iteration order is insertion order and is diagnostic only; submission
/// order is dictated by the payload's question order via [`Self::to_submission`].
///
/// This is a pure key-value structure: it does not check that a question or
/// choice exists in the payload. The session controller is the only writer
/// and selects against the question it is currently displaying.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerSheet {
    entries: Vec<(QuestionId, ChoiceLabel)>,
}

impl AnswerSheet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `choice` for `question_id`, replacing any earlier selection.
    pub fn select(&mut self, question_id: QuestionId, choice: ChoiceLabel) {
        if let Some(entry) = self
            .entries
            .iter_mut()
            .find(|(id, _)| *id == question_id)
        {
            entry.1 = choice;
        } else {
            self.entries.push((question_id, choice));
        }
    }

    /// The stored choice, or `None` when the question is unanswered.
    #[must_use]
    pub fn selected(&self, question_id: QuestionId) -> Option<ChoiceLabel> {
        self.entries
            .iter()
            .find(|(id, _)| *id == question_id)
            .map(|(_, choice)| *choice)
    }

    #[must_use]
    pub fn is_answered(&self, question_id: QuestionId) -> bool {
        self.selected(question_id).is_some()
    }

    /// Number of distinct questions with a stored choice.
    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.entries.len()
    }

    /// Selections in insertion order, for diagnostics.
    pub fn iter(&self) -> impl Iterator<Item = (QuestionId, ChoiceLabel)> + '_ {
        self.entries.iter().copied()
    }

    /// Serialize to the ordered pairs the submission collaborator expects.
    ///
    /// `order` is the payload's question order; unanswered questions appear
    /// with `selected: None`.
    #[must_use]
    pub fn to_submission(&self, order: &[QuestionId]) -> Vec<SubmittedAnswer> {
        order
            .iter()
            .map(|&question_id| SubmittedAnswer {
                question_id,
                selected: self.selected(question_id),
            })
            .collect()
    }
}
