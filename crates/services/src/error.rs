//! Shared error types for the services crate.
//!
//! The timer and answer collaborators never raise session-level errors
//! themselves; everything user-facing is classified here and in
//! `SessionController`, the single point deciding recoverable vs. fatal.

use thiserror::Error;

use quiz_core::model::QuestionId;

/// Errors emitted by learner-driven session operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    /// The session has left `Active` and no longer accepts learner actions.
    #[error("session is not accepting actions")]
    NotActive,

    /// A jump targeted an index outside the question list. Callers are
    /// expected to pre-validate from the known question count, so hitting
    /// this is a programming error rather than a learner-visible path.
    #[error("question index {index} outside 0..{len}")]
    OutOfRange { index: usize, len: usize },

    /// `confirm_submit` was called without a prior `request_submit`
    /// acknowledgment step.
    #[error("submit was not requested")]
    SubmitNotRequested,

    /// The scored result does not cover a question from the payload.
    #[error("result is missing an outcome for question {0}")]
    MissingOutcome(QuestionId),
}

/// Failure reported by the submission collaborator.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SubmissionError {
    /// Transport or service failure; a manual submit may be retried.
    #[error("submission service unavailable: {0}")]
    Transient(String),

    /// The collaborator rejected the submission or returned an unusable
    /// response; retrying the same request will not help.
    #[error("submission rejected: {0}")]
    Rejected(String),
}
