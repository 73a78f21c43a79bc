mod driver;
mod store;
mod timer;

pub use driver::TickDriver;
pub use store::{JsonSessionStore, PersistedSession, SessionStore};
pub use timer::{
    date_key, goal_progress_text, Clock, SessionPhase, SessionTimer, SystemClock, TimerSettings,
    TimerSnapshot,
};
