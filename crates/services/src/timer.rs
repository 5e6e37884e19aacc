use quiz_core::model::TimerMode;

/// Outcome of delivering one tick to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// The engine is not armed; nothing happened.
    Idle,
    /// The countdown decremented and time remains.
    Running { remaining: u32 },
    /// The countdown reached zero on this tick. Fired at most once per arm;
    /// further ticks report `Idle` until the engine is re-armed.
    Expired,
}

/// Monotonic one-second countdown.
///
/// The engine does not schedule anything itself: a driver delivers `tick`
/// once per elapsed second. Remaining time never goes negative and is
/// non-increasing between `reset` calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerEngine {
    mode: TimerMode,
    remaining: u32,
    armed: bool,
}

impl TimerEngine {
    /// Begin counting down from `secs`.
    #[must_use]
    pub fn start(mode: TimerMode, secs: u32) -> Self {
        Self {
            mode,
            remaining: secs,
            armed: secs > 0,
        }
    }

    #[must_use]
    pub fn mode(&self) -> TimerMode {
        self.mode
    }

    /// Seconds left on the current arm.
    #[must_use]
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// True while ticks are being consumed.
    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Consume one elapsed second.
    pub fn tick(&mut self) -> Tick {
        if !self.armed {
            return Tick::Idle;
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.armed = false;
            Tick::Expired
        } else {
            Tick::Running {
                remaining: self.remaining,
            }
        }
    }

    /// Re-arm the countdown from `secs`, cancelling any pending expiry from
    /// the prior arm. Used on question transitions in per-question mode.
    pub fn reset(&mut self, secs: u32) {
        self.remaining = secs;
        self.armed = secs > 0;
    }

    /// Stop consuming ticks. Remaining time is kept for `resume`.
    pub fn halt(&mut self) {
        self.armed = false;
    }

    /// Resume a halted countdown with its remaining time intact.
    ///
    /// A countdown that already expired stays expired.
    pub fn resume(&mut self) {
        if self.remaining > 0 {
            self.armed = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_down_and_expires_once() {
        let mut engine = TimerEngine::start(TimerMode::Whole, 3);

        assert_eq!(engine.tick(), Tick::Running { remaining: 2 });
        assert_eq!(engine.tick(), Tick::Running { remaining: 1 });
        assert_eq!(engine.tick(), Tick::Expired);
        // A second expiry while the first is being handled is suppressed.
        assert_eq!(engine.tick(), Tick::Idle);
        assert_eq!(engine.remaining(), 0);
    }

    #[test]
    fn reset_rearms_and_cancels_pending_expiry() {
        let mut engine = TimerEngine::start(TimerMode::PerQuestion, 2);
        assert_eq!(engine.tick(), Tick::Running { remaining: 1 });

        engine.reset(2);
        assert_eq!(engine.remaining(), 2);
        assert_eq!(engine.tick(), Tick::Running { remaining: 1 });
        assert_eq!(engine.tick(), Tick::Expired);

        engine.reset(1);
        assert_eq!(engine.tick(), Tick::Expired);
    }

    #[test]
    fn no_tick_after_halt_and_resume_keeps_remaining() {
        let mut engine = TimerEngine::start(TimerMode::Whole, 10);
        engine.tick();
        engine.halt();

        assert_eq!(engine.tick(), Tick::Idle);
        assert_eq!(engine.remaining(), 9);

        engine.resume();
        assert_eq!(engine.tick(), Tick::Running { remaining: 8 });
    }

    #[test]
    fn resume_after_expiry_stays_idle() {
        let mut engine = TimerEngine::start(TimerMode::Whole, 1);
        assert_eq!(engine.tick(), Tick::Expired);
        engine.resume();
        assert_eq!(engine.tick(), Tick::Idle);
    }
}
