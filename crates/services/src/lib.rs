#![forbid(unsafe_code)]

pub mod error;
pub mod navigation;
pub mod session;
pub mod submission;
pub mod timer;

pub use quiz_core::Clock;

pub use error::{SessionError, SubmissionError};
pub use navigation::NavigationCursor;
pub use session::{
    AnswerVerdict, ReviewItem, SessionController, SessionPhase, SessionProgress, SessionTicker,
    SubmitOutcome, SubmitPrompt, TickOutcome, build_review, format_clock,
};
pub use submission::{
    HttpSubmissionClient, SubmissionClient, SubmissionConfig, SubmissionRequest,
};
pub use timer::{Tick, TimerEngine};
