//! Timer events emitted by the session timer.
//!
//! Events serialize with a `type` tag so hosts can log or forward them as
//! JSON lines.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::session::SessionPhase;

/// Every session timer state change produces an Event.
/// The host drains them from the tick driver and decides how to notify.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TimerEvent {
    TimerStarted {
        phase: SessionPhase,
        duration_secs: u64,
        at: DateTime<Utc>,
    },
    TimerStopped {
        phase: SessionPhase,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerReset {
        phase: SessionPhase,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    /// A Work phase ran out; the timer moved on to Break.
    WorkPhaseEnded {
        completed_today: u32,
        at: DateTime<Utc>,
    },
    /// A Break phase ran out; the timer moved on to Work.
    BreakPhaseEnded {
        at: DateTime<Utc>,
    },
    /// Completed Work phases today just reached the goal.
    GoalReached {
        completed_today: u32,
        goal: u32,
        at: DateTime<Utc>,
    },
}

impl TimerEvent {
    /// Title and body for a user-facing notification, if this event warrants one.
    pub fn notification(&self) -> Option<(&'static str, String)> {
        match self {
            TimerEvent::WorkPhaseEnded { .. } => Some(("Break Time!", "Time for a break!".into())),
            TimerEvent::BreakPhaseEnded { .. } => Some(("Work Time!", "Back to work!".into())),
            TimerEvent::GoalReached { goal, .. } => Some((
                "Goal Reached!",
                format!("You completed {goal} Pomodoro sessions today."),
            )),
            _ => None,
        }
    }
}
