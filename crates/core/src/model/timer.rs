use serde::{Deserialize, Serialize};
use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TimerConfigError {
    #[error("timer seconds must be > 0")]
    NonPositiveSeconds,
}

/// Which countdown the session runs under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimerMode {
    /// One countdown shared across the whole session.
    Whole,
    /// Countdown reset to a fixed allotment on every question transition.
    PerQuestion,
}

/// Validated countdown configuration for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimerConfig {
    Whole { total_secs: u32 },
    PerQuestion { secs_per_question: u32 },
}

impl TimerConfig {
    /// Whole-session countdown of `total_secs`.
    ///
    /// # Errors
    ///
    /// Returns `TimerConfigError::NonPositiveSeconds` for a zero budget.
    pub fn whole(total_secs: u32) -> Result<Self, TimerConfigError> {
        if total_secs == 0 {
            return Err(TimerConfigError::NonPositiveSeconds);
        }
        Ok(Self::Whole { total_secs })
    }

    /// Per-question countdown of `secs_per_question`, re-armed on each transition.
    ///
    /// # Errors
    ///
    /// Returns `TimerConfigError::NonPositiveSeconds` for a zero allotment.
    pub fn per_question(secs_per_question: u32) -> Result<Self, TimerConfigError> {
        if secs_per_question == 0 {
            return Err(TimerConfigError::NonPositiveSeconds);
        }
        Ok(Self::PerQuestion { secs_per_question })
    }

    #[must_use]
    pub fn mode(&self) -> TimerMode {
        match self {
            Self::Whole { .. } => TimerMode::Whole,
            Self::PerQuestion { .. } => TimerMode::PerQuestion,
        }
    }

    /// Seconds the countdown starts from when first armed.
    #[must_use]
    pub fn initial_secs(&self) -> u32 {
        match self {
            Self::Whole { total_secs } => *total_secs,
            Self::PerQuestion { secs_per_question } => *secs_per_question,
        }
    }
}
