use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::model::ids::{QuestionId, QuizId};
use crate::model::timer::TimerConfig;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizError {
    #[error("quiz title cannot be empty")]
    EmptyTitle,

    #[error("quiz payload contains no questions")]
    NoQuestions,

    #[error("question text cannot be empty")]
    EmptyQuestionText,

    #[error("question {question} appears more than once in the payload")]
    DuplicateQuestion { question: QuestionId },

    #[error("question needs at least two choices, got {len}")]
    TooFewChoices { len: usize },

    #[error("question has {len} choices, more than the positional alphabet allows")]
    TooManyChoices { len: usize },

    #[error("choice text cannot be empty")]
    EmptyChoiceText,
}

//
// ─── CHOICE LABELS ─────────────────────────────────────────────────────────────
//

/// Positional address of a choice within a question.
///
/// The label is the contract with the submission collaborator: choices are
/// identified by their position in the question's choice list, never by an
/// arbitrary key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ChoiceLabel {
    A,
    B,
    C,
    D,
}

impl ChoiceLabel {
    /// Maximum number of choices a question may carry.
    pub const MAX: usize = 4;

    /// Label for the choice at the given position, if within the alphabet.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::A),
            1 => Some(Self::B),
            2 => Some(Self::C),
            3 => Some(Self::D),
            _ => None,
        }
    }

    /// Position of this label within a choice list.
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Self::A => 0,
            Self::B => 1,
            Self::C => 2,
            Self::D => 3,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
        }
    }
}

impl fmt::Display for ChoiceLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error type for parsing a choice label from a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseChoiceLabelError(String);

impl fmt::Display for ParseChoiceLabelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} is not a choice label", self.0)
    }
}

impl std::error::Error for ParseChoiceLabelError {}

impl FromStr for ChoiceLabel {
    type Err = ParseChoiceLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "A" => Ok(Self::A),
            "B" => Ok(Self::B),
            "C" => Ok(Self::C),
            "D" => Ok(Self::D),
            other => Err(ParseChoiceLabelError(other.to_string())),
        }
    }
}

//
// ─── QUESTIONS AND CHOICES ─────────────────────────────────────────────────────
//

/// A single answer option, addressed by position.
///
/// The payload never marks which choice is correct; correctness is resolved
/// only by the submission collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    label: ChoiceLabel,
    text: String,
}

impl Choice {
    #[must_use]
    pub fn label(&self) -> ChoiceLabel {
        self.label
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// A multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    id: QuestionId,
    text: String,
    choices: Vec<Choice>,
    difficulty: Option<String>,
}

impl Question {
    /// Build a question, labelling the given choice texts positionally.
    ///
    /// # Errors
    ///
    /// Returns `QuizError` if the text is empty or the choice count is
    /// outside `2..=ChoiceLabel::MAX`.
    pub fn new(
        id: QuestionId,
        text: impl Into<String>,
        choice_texts: Vec<String>,
        difficulty: Option<String>,
    ) -> Result<Self, QuizError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(QuizError::EmptyQuestionText);
        }
        if choice_texts.len() < 2 {
            return Err(QuizError::TooFewChoices {
                len: choice_texts.len(),
            });
        }
        if choice_texts.len() > ChoiceLabel::MAX {
            return Err(QuizError::TooManyChoices {
                len: choice_texts.len(),
            });
        }

        let mut choices = Vec::with_capacity(choice_texts.len());
        for (index, choice_text) in choice_texts.into_iter().enumerate() {
            if choice_text.trim().is_empty() {
                return Err(QuizError::EmptyChoiceText);
            }
            let label =
                ChoiceLabel::from_index(index).expect("index bounded by MAX choices above");
            choices.push(Choice {
                label,
                text: choice_text,
            });
        }

        Ok(Self {
            id,
            text,
            choices,
            difficulty,
        })
    }

    #[must_use]
    pub fn id(&self) -> QuestionId {
        self.id
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn choices(&self) -> &[Choice] {
        &self.choices
    }

    #[must_use]
    pub fn difficulty(&self) -> Option<&str> {
        self.difficulty.as_deref()
    }

    /// Choice carrying the given label, if the question has that many options.
    #[must_use]
    pub fn choice(&self, label: ChoiceLabel) -> Option<&Choice> {
        self.choices.get(label.index())
    }
}

//
// ─── QUIZ PAYLOAD ──────────────────────────────────────────────────────────────
//

/// Immutable question set delivered by the quiz-generation collaborator.
///
/// Question insertion order is the display, navigation, and submission order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizPayload {
    id: QuizId,
    title: String,
    instructions: Option<String>,
    questions: Vec<Question>,
    timer: TimerConfig,
}

impl QuizPayload {
    /// Validate structural well-formedness and build the payload.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::EmptyTitle` for a blank title,
    /// `QuizError::NoQuestions` for an empty question list, and
    /// `QuizError::DuplicateQuestion` when a question id repeats.
    pub fn new(
        id: QuizId,
        title: impl Into<String>,
        instructions: Option<String>,
        questions: Vec<Question>,
        timer: TimerConfig,
    ) -> Result<Self, QuizError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(QuizError::EmptyTitle);
        }
        if questions.is_empty() {
            return Err(QuizError::NoQuestions);
        }

        let mut seen = HashSet::with_capacity(questions.len());
        for question in &questions {
            if !seen.insert(question.id()) {
                return Err(QuizError::DuplicateQuestion {
                    question: question.id(),
                });
            }
        }

        Ok(Self {
            id,
            title,
            instructions,
            questions,
            timer,
        })
    }

    #[must_use]
    pub fn id(&self) -> QuizId {
        self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn instructions(&self) -> Option<&str> {
        self.instructions.as_deref()
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Number of questions in display order.
    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Always false: the constructor rejects empty payloads.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    #[must_use]
    pub fn timer(&self) -> TimerConfig {
        self.timer
    }

    #[must_use]
    pub fn question_at(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    /// Question ids in display order, the order the collaborator expects.
    #[must_use]
    pub fn question_order(&self) -> Vec<QuestionId> {
        self.questions.iter().map(Question::id).collect()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    fn build_question(id: u64) -> Question {
        Question::new(
            QuestionId::new(id),
            format!("Question {id}"),
            vec!["first".into(), "second".into()],
            None,
        )
        .unwrap()
    }

    #[test]
    fn labels_are_positional() {
        assert_eq!(ChoiceLabel::from_index(0), Some(ChoiceLabel::A));
        assert_eq!(ChoiceLabel::from_index(3), Some(ChoiceLabel::D));
        assert_eq!(ChoiceLabel::from_index(4), None);
        assert_eq!(ChoiceLabel::C.index(), 2);
    }

    #[test]
    fn label_parses_case_insensitively() {
        assert_eq!("b".parse::<ChoiceLabel>().unwrap(), ChoiceLabel::B);
        assert!("E".parse::<ChoiceLabel>().is_err());
    }

    #[test]
    fn question_rejects_single_choice() {
        let err = Question::new(
            QuestionId::new(1),
            "Only one way out?",
            vec!["yes".into()],
            None,
        )
        .unwrap_err();
        assert_eq!(err, QuizError::TooFewChoices { len: 1 });
    }

    #[test]
    fn question_rejects_five_choices() {
        let texts = (0..5).map(|i| format!("c{i}")).collect();
        let err = Question::new(QuestionId::new(1), "Too many?", texts, None).unwrap_err();
        assert_eq!(err, QuizError::TooManyChoices { len: 5 });
    }

    #[test]
    fn question_labels_choices_in_order() {
        let question = Question::new(
            QuestionId::new(1),
            "Pick",
            vec!["x".into(), "y".into(), "z".into()],
            None,
        )
        .unwrap();
        let labels: Vec<_> = question.choices().iter().map(Choice::label).collect();
        assert_eq!(labels, vec![ChoiceLabel::A, ChoiceLabel::B, ChoiceLabel::C]);
        assert_eq!(question.choice(ChoiceLabel::B).unwrap().text(), "y");
        assert!(question.choice(ChoiceLabel::D).is_none());
    }

    #[test]
    fn payload_rejects_empty_question_list() {
        let err = QuizPayload::new(
            QuizId::new(1),
            "Empty",
            None,
            Vec::new(),
            TimerConfig::whole(60).unwrap(),
        )
        .unwrap_err();
        assert_eq!(err, QuizError::NoQuestions);
    }

    #[test]
    fn payload_rejects_duplicate_question_ids() {
        let err = QuizPayload::new(
            QuizId::new(1),
            "Doubled",
            None,
            vec![build_question(7), build_question(7)],
            TimerConfig::whole(60).unwrap(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            QuizError::DuplicateQuestion {
                question: QuestionId::new(7)
            }
        );
    }

    #[test]
    fn payload_preserves_question_order() {
        let payload = QuizPayload::new(
            QuizId::new(1),
            "Ordered",
            Some("Read carefully.".into()),
            vec![build_question(3), build_question(1), build_question(2)],
            TimerConfig::whole(60).unwrap(),
        )
        .unwrap();

        assert_eq!(
            payload.question_order(),
            vec![QuestionId::new(3), QuestionId::new(1), QuestionId::new(2)]
        );
        assert_eq!(payload.question_at(1).unwrap().id(), QuestionId::new(1));
        assert_eq!(payload.instructions(), Some("Read carefully."));
    }
}
