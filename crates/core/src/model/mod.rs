mod answer;
mod ids;
mod outcome;
mod quiz;
mod timer;

pub use answer::{AnswerSheet, SubmittedAnswer};
pub use ids::{ParseIdError, QuestionId, QuizId};
pub use outcome::{QuestionOutcome, SubmissionResult, SubmissionResultError};
pub use quiz::{Choice, ChoiceLabel, ParseChoiceLabelError, Question, QuizError, QuizPayload};
pub use timer::{TimerConfig, TimerConfigError, TimerMode};
