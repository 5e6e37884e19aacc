use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::QuestionId;
use crate::model::quiz::ChoiceLabel;

#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum SubmissionResultError {
    #[error("score {0} is outside 0..=100")]
    ScoreOutOfRange(f64),

    #[error("correct count ({correct}) exceeds total questions ({total})")]
    CorrectExceedsTotal { correct: u32, total: u32 },

    #[error("result lists {outcomes} outcomes for {total} questions")]
    CountMismatch { outcomes: usize, total: u32 },
}

/// Per-question verdict returned by the submission collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionOutcome {
    pub question_id: QuestionId,
    /// What the learner picked, `None` when the question went unanswered.
    pub selected: Option<ChoiceLabel>,
    pub correct: ChoiceLabel,
    pub is_correct: bool,
    pub explanation: Option<String>,
}

/// Scored result for one submitted session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionResult {
    score: f64,
    correct_count: u32,
    total_questions: u32,
    time_taken_secs: u32,
    passed: Option<bool>,
    outcomes: Vec<QuestionOutcome>,
}

impl SubmissionResult {
    /// Validate and build a result as returned by the collaborator.
    ///
    /// The score is normalized to one decimal of precision.
    ///
    /// # Errors
    ///
    /// Returns `SubmissionResultError` when the score is outside `0..=100`,
    /// the correct count exceeds the total, or the per-question outcome list
    /// does not cover every question.
    pub fn from_parts(
        score: f64,
        correct_count: u32,
        total_questions: u32,
        time_taken_secs: u32,
        passed: Option<bool>,
        outcomes: Vec<QuestionOutcome>,
    ) -> Result<Self, SubmissionResultError> {
        if !(0.0..=100.0).contains(&score) {
            return Err(SubmissionResultError::ScoreOutOfRange(score));
        }
        if correct_count > total_questions {
            return Err(SubmissionResultError::CorrectExceedsTotal {
                correct: correct_count,
                total: total_questions,
            });
        }
        if outcomes.len() != total_questions as usize {
            return Err(SubmissionResultError::CountMismatch {
                outcomes: outcomes.len(),
                total: total_questions,
            });
        }

        Ok(Self {
            score: (score * 10.0).round() / 10.0,
            correct_count,
            total_questions,
            time_taken_secs,
            passed,
            outcomes,
        })
    }

    /// Overall score, 0–100 with one decimal of precision.
    #[must_use]
    pub fn score(&self) -> f64 {
        self.score
    }

    #[must_use]
    pub fn correct_count(&self) -> u32 {
        self.correct_count
    }

    #[must_use]
    pub fn total_questions(&self) -> u32 {
        self.total_questions
    }

    #[must_use]
    pub fn time_taken_secs(&self) -> u32 {
        self.time_taken_secs
    }

    /// Pass/fail flag when the collaborator computes one.
    #[must_use]
    pub fn passed(&self) -> Option<bool> {
        self.passed
    }

    /// Per-question outcomes in the order the collaborator returned them.
    #[must_use]
    pub fn outcomes(&self) -> &[QuestionOutcome] {
        &self.outcomes
    }

    /// Outcome for a specific question, matched by id.
    #[must_use]
    pub fn outcome_for(&self, question_id: QuestionId) -> Option<&QuestionOutcome> {
        self.outcomes
            .iter()
            .find(|outcome| outcome.question_id == question_id)
    }
}
