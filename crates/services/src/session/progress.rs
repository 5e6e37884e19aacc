use crate::session::controller::SessionPhase;

/// Aggregated view of session progress, useful for UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionProgress {
    pub phase: SessionPhase,
    pub current_index: usize,
    pub total: usize,
    pub answered: usize,
    /// Seconds left on the countdown; `None` once the timer is disarmed.
    pub remaining_secs: Option<u32>,
}

impl SessionProgress {
    /// True in the final minute of a running countdown.
    #[must_use]
    pub fn low_time(&self) -> bool {
        self.remaining_secs.is_some_and(|secs| secs < 60)
    }
}
