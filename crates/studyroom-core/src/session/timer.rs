//! Session timer implementation.
//!
//! The timer is a tick-driven state machine. It does not use internal
//! threads -- the caller (normally [`TickDriver`](super::TickDriver)) is
//! responsible for calling `tick()` once per elapsed second while it runs.
//!
//! ## Phase Transitions
//!
//! ```text
//! Work -> Break -> Work -> ...
//! ```
//!
//! Durations and the daily goal are read from the live settings whenever a
//! phase begins or is reset, never snapshotted at construction.
//!
//! ## Usage
//!
//! ```ignore
//! let mut timer = SessionTimer::new(TimerSettings::default(), Box::new(store));
//! timer.start();
//! // Once per second:
//! for event in timer.tick() { /* notify */ }
//! ```

use chrono::{Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::store::SessionStore;
use crate::events::TimerEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionPhase {
    Work,
    Break,
}

impl SessionPhase {
    pub fn label(&self) -> &'static str {
        match self {
            SessionPhase::Work => "Work",
            SessionPhase::Break => "Break",
        }
    }
}

/// User-adjustable timer settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSettings {
    pub work_minutes: u32,
    pub break_minutes: u32,
    /// Completed Work phases per day.
    pub goal: u32,
}

impl Default for TimerSettings {
    fn default() -> Self {
        Self {
            work_minutes: 25,
            break_minutes: 5,
            goal: 4,
        }
    }
}

impl TimerSettings {
    /// Phase length in seconds. A zero-minute setting counts as one minute.
    pub fn duration_secs(&self, phase: SessionPhase) -> u64 {
        let minutes = match phase {
            SessionPhase::Work => self.work_minutes,
            SessionPhase::Break => self.break_minutes,
        };
        u64::from(minutes.max(1)).saturating_mul(60)
    }
}

/// Source of the current calendar day.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Local wall-clock date.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Serializable view of the timer for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub phase: SessionPhase,
    pub running: bool,
    pub remaining_secs: u64,
    pub total_secs: u64,
    pub time_left: String,
    pub progress: f64,
    pub completed_today: u32,
    pub goal: u32,
    pub goal_progress: String,
    pub date: String,
}

/// Pomodoro phase state machine with a persisted daily counter.
pub struct SessionTimer {
    settings: TimerSettings,
    phase: SessionPhase,
    remaining_secs: u64,
    /// Length of the current phase as captured when it began.
    total_secs: u64,
    running: bool,
    completed_today: u32,
    date_key: String,
    store: Box<dyn SessionStore>,
    clock: Box<dyn Clock>,
}

impl SessionTimer {
    /// Create an idle timer, loading today's count from `store`.
    pub fn new(settings: TimerSettings, store: Box<dyn SessionStore>) -> Self {
        Self::with_clock(settings, store, Box::new(SystemClock))
    }

    pub fn with_clock(
        settings: TimerSettings,
        store: Box<dyn SessionStore>,
        clock: Box<dyn Clock>,
    ) -> Self {
        let date_key = date_key(clock.today());
        let completed_today = store.load(&date_key);
        Self {
            settings,
            phase: SessionPhase::Work,
            remaining_secs: 0,
            total_secs: 0,
            running: false,
            completed_today,
            date_key,
            store,
            clock,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn total_secs(&self) -> u64 {
        self.total_secs
    }

    pub fn completed_today(&self) -> u32 {
        self.completed_today
    }

    pub fn goal(&self) -> u32 {
        self.settings.goal
    }

    pub fn date_key(&self) -> &str {
        &self.date_key
    }

    pub fn settings(&self) -> TimerSettings {
        self.settings
    }

    /// 0.0 .. 1.0 progress within the current phase.
    pub fn progress(&self) -> f64 {
        if self.total_secs == 0 {
            return 0.0;
        }
        (1.0 - self.remaining_secs as f64 / self.total_secs as f64).clamp(0.0, 1.0)
    }

    /// Remaining time as `MM:SS`.
    pub fn time_left_text(&self) -> String {
        format!("{:02}:{:02}", self.remaining_secs / 60, self.remaining_secs % 60)
    }

    pub fn goal_progress_text(&self) -> String {
        goal_progress_text(self.completed_today, self.settings.goal)
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            phase: self.phase,
            running: self.running,
            remaining_secs: self.remaining_secs,
            total_secs: self.total_secs,
            time_left: self.time_left_text(),
            progress: self.progress(),
            completed_today: self.completed_today,
            goal: self.settings.goal,
            goal_progress: self.goal_progress_text(),
            date: self.date_key.clone(),
        }
    }

    // ── Settings ─────────────────────────────────────────────────────

    pub fn set_settings(&mut self, settings: TimerSettings) {
        self.settings = settings;
    }

    pub fn set_work_minutes(&mut self, minutes: u32) {
        self.settings.work_minutes = minutes;
    }

    pub fn set_break_minutes(&mut self, minutes: u32) {
        self.settings.break_minutes = minutes;
    }

    pub fn set_goal(&mut self, goal: u32) {
        self.settings.goal = goal;
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Begin a Work phase. Returns `None` if already running.
    pub fn start(&mut self) -> Option<TimerEvent> {
        if self.running {
            return None;
        }
        self.observe_day();
        self.begin_phase(SessionPhase::Work);
        self.running = true;
        info!(duration_secs = self.total_secs, "work phase started");
        Some(TimerEvent::TimerStarted {
            phase: self.phase,
            duration_secs: self.total_secs,
            at: Utc::now(),
        })
    }

    /// Halt without touching phase or remaining time.
    pub fn stop(&mut self) -> Option<TimerEvent> {
        if !self.running {
            return None;
        }
        self.running = false;
        Some(TimerEvent::TimerStopped {
            phase: self.phase,
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    /// Halt and rewind the current phase to its currently configured length.
    pub fn reset(&mut self) -> TimerEvent {
        self.running = false;
        self.begin_phase(self.phase);
        TimerEvent::TimerReset {
            phase: self.phase,
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        }
    }

    /// Advance by one second. Returns the events produced by a phase ending.
    pub fn tick(&mut self) -> Vec<TimerEvent> {
        if !self.running {
            return Vec::new();
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs > 0 {
            return Vec::new();
        }

        let mut events = Vec::new();
        match self.phase {
            SessionPhase::Work => {
                self.observe_day();
                self.completed_today = self.completed_today.saturating_add(1);
                if let Err(e) = self.store.save(&self.date_key, self.completed_today) {
                    warn!("failed to persist completed sessions: {e}");
                }
                info!(
                    completed_today = self.completed_today,
                    goal = self.settings.goal,
                    "work phase completed"
                );
                events.push(TimerEvent::WorkPhaseEnded {
                    completed_today: self.completed_today,
                    at: Utc::now(),
                });
                if self.completed_today == self.settings.goal {
                    events.push(TimerEvent::GoalReached {
                        completed_today: self.completed_today,
                        goal: self.settings.goal,
                        at: Utc::now(),
                    });
                }
                self.begin_phase(SessionPhase::Break);
            }
            SessionPhase::Break => {
                info!("break phase completed");
                events.push(TimerEvent::BreakPhaseEnded { at: Utc::now() });
                self.begin_phase(SessionPhase::Work);
            }
        }
        events
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn begin_phase(&mut self, phase: SessionPhase) {
        self.phase = phase;
        self.total_secs = self.settings.duration_secs(phase);
        self.remaining_secs = self.total_secs;
    }

    /// Reset the counter the first time a new calendar day is seen.
    fn observe_day(&mut self) {
        let today = date_key(self.clock.today());
        if today != self.date_key {
            info!(from = %self.date_key, to = %today, "new day, resetting completed sessions");
            self.date_key = today;
            self.completed_today = 0;
        }
    }
}

/// `"Goal progress: {count}/{goal} "`, with a check mark once the goal is met.
pub fn goal_progress_text(count: u32, goal: u32) -> String {
    let marker = if count >= goal { "✅" } else { "" };
    format!("Goal progress: {count}/{goal} {marker}")
}

/// `YYYY-MM-DD` key for the persisted record.
pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
