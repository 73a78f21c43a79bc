//! One-second repeating tick task for [`SessionTimer`].
//!
//! At most one tick task is ever pending: starting aborts any stale task
//! before spawning a new one, and stop/reset abort it immediately. Events
//! from the timer are forwarded to the host over an unbounded channel.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::debug;

use super::timer::SessionTimer;
use crate::events::TimerEvent;

const TICK_PERIOD: Duration = Duration::from_secs(1);

pub struct TickDriver {
    timer: Arc<Mutex<SessionTimer>>,
    events: mpsc::UnboundedSender<TimerEvent>,
    task: Option<JoinHandle<()>>,
}

impl TickDriver {
    /// Wrap `timer`. The receiver yields every event the timer produces.
    pub fn new(timer: SessionTimer) -> (Self, mpsc::UnboundedReceiver<TimerEvent>) {
        let (events, rx) = mpsc::unbounded_channel();
        let driver = Self {
            timer: Arc::new(Mutex::new(timer)),
            events,
            task: None,
        };
        (driver, rx)
    }

    /// Run `f` against the timer (settings changes, snapshots).
    pub fn with_timer<R>(&self, f: impl FnOnce(&mut SessionTimer) -> R) -> R {
        f(&mut lock(&self.timer))
    }

    /// Whether a tick task is currently scheduled.
    pub fn is_ticking(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Start a Work phase and schedule ticks. No-op if already running.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(&mut self) {
        let event = {
            let mut timer = lock(&self.timer);
            if timer.is_running() {
                return;
            }
            timer.start()
        };
        self.cancel_pending();
        self.emit(event);
        self.task = Some(tokio::spawn(tick_loop(
            Arc::clone(&self.timer),
            self.events.clone(),
        )));
    }

    /// Cancel the schedule; phase and remaining time stay as they were.
    pub fn stop(&mut self) {
        self.cancel_pending();
        let event = lock(&self.timer).stop();
        self.emit(event);
    }

    /// Cancel the schedule and rewind the current phase.
    pub fn reset(&mut self) {
        self.cancel_pending();
        let event = lock(&self.timer).reset();
        self.emit(Some(event));
    }

    fn cancel_pending(&mut self) {
        if let Some(task) = self.task.take() {
            debug!("cancelling pending tick task");
            task.abort();
        }
    }

    fn emit(&self, event: Option<TimerEvent>) {
        if let Some(event) = event {
            // A dropped receiver only means nobody is listening.
            let _ = self.events.send(event);
        }
    }
}

impl Drop for TickDriver {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}

async fn tick_loop(timer: Arc<Mutex<SessionTimer>>, events: mpsc::UnboundedSender<TimerEvent>) {
    let mut interval = tokio::time::interval(TICK_PERIOD);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first tick completes immediately.
    interval.tick().await;

    loop {
        interval.tick().await;
        let produced = {
            let mut timer = lock(&timer);
            if !timer.is_running() {
                break;
            }
            timer.tick()
        };
        for event in produced {
            if events.send(event).is_err() {
                debug!("event receiver dropped, stopping timer");
                lock(&timer).stop();
                return;
            }
        }
    }
}

fn lock(timer: &Mutex<SessionTimer>) -> MutexGuard<'_, SessionTimer> {
    timer.lock().unwrap_or_else(PoisonError::into_inner)
}
