pub mod controller;
pub mod progress;
pub mod review;
pub mod ticker;

pub use controller::{
    SessionController, SessionPhase, SubmitOutcome, SubmitPrompt, TickOutcome,
};
pub use progress::SessionProgress;
pub use review::{AnswerVerdict, ReviewItem, build_review, format_clock};
pub use ticker::SessionTicker;
