//! Countdown ticker.
//!
//! The ticker does not own the remaining time. It posts a
//! [`SessionEvent::Tick`] every period and the session decrements its own
//! clock. Stopping keeps the unexpired part of the current period, so the next
//! start ticks after that remainder instead of a full period and pausing never
//! loses time.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::trace;

use crate::session::SessionEvent;

struct Running {
    token: CancellationToken,
    handle: JoinHandle<()>,
    /// Deadline of the next tick, advanced by the ticker task
    next_tick: Arc<Mutex<Instant>>,
}

pub struct TimerLoop {
    period: Duration,
    running: Option<Running>,
    /// Time left until the next tick when stopped mid-period
    leftover: Option<Duration>,
}

impl TimerLoop {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            running: None,
            leftover: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
            .as_ref()
            .is_some_and(|r| !r.token.is_cancelled() && !r.handle.is_finished())
    }

    /// Start ticking for `game_id`.
    ///
    /// Returns `false` without spawning when a ticker is already running. The
    /// ticker also stops when `parent` is cancelled or the event channel closes.
    pub fn start(
        &mut self,
        game_id: u64,
        events: mpsc::UnboundedSender<SessionEvent>,
        parent: &CancellationToken,
    ) -> bool {
        if self.is_running() {
            return false;
        }

        let token = parent.child_token();
        let period = self.period;
        let first = Instant::now() + self.leftover.take().unwrap_or(period);
        let next_tick = Arc::new(Mutex::new(first));

        let task_token = token.clone();
        let task_next = Arc::clone(&next_tick);
        let handle = tokio::spawn(async move {
            let mut deadline = first;
            loop {
                tokio::select! {
                    _ = task_token.cancelled() => break,
                    _ = tokio::time::sleep_until(deadline) => {
                        deadline += period;
                        *lock(&task_next) = deadline;
                        if events.send(SessionEvent::Tick { game_id }).is_err() {
                            break;
                        }
                    }
                }
            }
            trace!(game_id, "timer loop stopped");
        });

        self.running = Some(Running {
            token,
            handle,
            next_tick,
        });
        true
    }

    /// Stop ticking, keeping the rest of the current period for the next start.
    pub fn stop(&mut self) {
        if let Some(running) = self.running.take() {
            running.token.cancel();
            let remaining = lock(&running.next_tick).saturating_duration_since(Instant::now());
            self.leftover = Some(remaining.min(self.period));
        }
    }

    /// Stop and forget any partial period (new game).
    pub fn reset(&mut self) {
        self.stop();
        self.leftover = None;
    }
}

fn lock(next: &Mutex<Instant>) -> std::sync::MutexGuard<'_, Instant> {
    next.lock().unwrap_or_else(|e| e.into_inner())
}

impl Drop for TimerLoop {
    fn drop(&mut self) {
        self.stop();
    }
}
