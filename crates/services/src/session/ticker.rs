use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};

use crate::session::controller::SessionController;

/// Drives the one-second tick into a shared session.
///
/// The controller sits behind a `tokio::sync::Mutex`; the tick task and any
/// learner-action caller contend for the same lock, so mutations are
/// serialized and no tick is delivered while an expiry-driven submission is
/// still in flight (the lock is held across that await).
pub struct SessionTicker {
    session: Arc<Mutex<SessionController>>,
}

impl SessionTicker {
    #[must_use]
    pub fn new(controller: SessionController) -> Self {
        Self {
            session: Arc::new(Mutex::new(controller)),
        }
    }

    /// Shared handle for delivering learner actions.
    #[must_use]
    pub fn session(&self) -> Arc<Mutex<SessionController>> {
        Arc::clone(&self.session)
    }

    /// Spawn the tick task. The first tick fires one full second after the
    /// call, and the task stops itself once the session is terminal.
    #[must_use]
    pub fn spawn(&self) -> JoinHandle<()> {
        let session = Arc::clone(&self.session);
        tokio::spawn(async move {
            let period = Duration::from_secs(1);
            let mut ticks = interval_at(Instant::now() + period, period);
            // A late tick must not be followed by a burst of catch-up ticks.
            ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticks.tick().await;
                let mut controller = session.lock().await;
                if controller.phase().is_terminal() {
                    break;
                }
                let _ = controller.tick().await;
            }
        })
    }
}
