//! Pure transformation of a scored result into a per-question review.
//!
//! No mutation, no external calls; safe to call repeatedly. Outcomes are
//! paired with questions by id, never by position, so a collaborator that
//! returns results in a different order than submitted is tolerated.

use quiz_core::model::{ChoiceLabel, QuestionId, QuizPayload, SubmissionResult};

use crate::error::SessionError;

/// How one question went.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerVerdict {
    Correct,
    Incorrect,
    /// No selection was stored for this question. Distinct from incorrect:
    /// renderers show "not answered" rather than a synthetic wrong answer.
    Unanswered,
}

/// One row of the end-of-session review, display order = payload order.
///
/// Carries the choice display texts so a renderer needs no second lookup
/// into the payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewItem {
    pub question_id: QuestionId,
    /// 1-based position in the payload, for "3. Which of..." numbering.
    pub number: usize,
    pub question_text: String,
    pub selected: Option<ChoiceLabel>,
    pub selected_text: Option<String>,
    pub correct: ChoiceLabel,
    /// Text of the correct choice; `None` if the collaborator named a label
    /// the question does not carry.
    pub correct_text: Option<String>,
    pub verdict: AnswerVerdict,
    pub explanation: Option<String>,
}

impl ReviewItem {
    /// Whether the review should reveal the correct answer for this row.
    /// Correct rows don't repeat it.
    #[must_use]
    pub fn show_correct_answer(&self) -> bool {
        self.verdict != AnswerVerdict::Correct
    }
}

/// Pair each payload question with its outcome from the scored result.
///
/// # Errors
///
/// Returns `SessionError::MissingOutcome` when the result does not cover a
/// question from the payload.
pub fn build_review(
    payload: &QuizPayload,
    result: &SubmissionResult,
) -> Result<Vec<ReviewItem>, SessionError> {
    let mut items = Vec::with_capacity(payload.len());

    for (position, question) in payload.questions().iter().enumerate() {
        let outcome = result
            .outcome_for(question.id())
            .ok_or(SessionError::MissingOutcome(question.id()))?;

        let verdict = match outcome.selected {
            None => AnswerVerdict::Unanswered,
            Some(_) if outcome.is_correct => AnswerVerdict::Correct,
            Some(_) => AnswerVerdict::Incorrect,
        };

        items.push(ReviewItem {
            question_id: question.id(),
            number: position + 1,
            question_text: question.text().to_owned(),
            selected: outcome.selected,
            selected_text: outcome
                .selected
                .and_then(|label| question.choice(label))
                .map(|choice| choice.text().to_owned()),
            correct: outcome.correct,
            correct_text: question
                .choice(outcome.correct)
                .map(|choice| choice.text().to_owned()),
            verdict,
            explanation: outcome.explanation.clone(),
        });
    }

    Ok(items)
}

/// Format a countdown as `MM:SS`; an unarmed timer renders as `--:--`.
#[must_use]
pub fn format_clock(remaining_secs: Option<u32>) -> String {
    match remaining_secs {
        None => "--:--".to_string(),
        Some(secs) => format!("{:02}:{:02}", secs / 60, secs % 60),
    }
}
