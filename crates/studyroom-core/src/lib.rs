//! # Studyroom Core Library
//!
//! This library provides the core logic behind Studyroom, a study companion
//! for a single loaded document. All behavior is reachable from the
//! standalone CLI binary, which is a thin host over this crate.
//!
//! ## Architecture
//!
//! - **Study pipeline**: builds prompts, calls a text-generation service once
//!   per request, and parses the free-form reply into quiz questions,
//!   flashcards, or a topic summary
//! - **Session timer**: a tick-driven Work/Break state machine with a daily
//!   completion goal, persisted as a single `{date, count}` record
//! - **Storage**: TOML-based configuration and the JSON session record
//!
//! ## Key Components
//!
//! - [`StudyContentPipeline`]: quiz, flashcard and topic generation
//! - [`TextGenerationService`]: the capability the pipeline calls out to
//! - [`SessionTimer`]: Pomodoro phase state machine
//! - [`TickDriver`]: the one-second repeating task that drives the timer
//! - [`Config`]: application configuration management

pub mod document;
pub mod error;
pub mod events;
pub mod generation;
pub mod session;
pub mod storage;
pub mod study;

pub use document::{load_document, LoadedDocument};
pub use error::{ConfigError, CoreError, DocumentError, ServiceError, StudyError};
pub use events::TimerEvent;
pub use generation::{GeminiClient, TextGenerationService};
pub use session::{
    JsonSessionStore, SessionPhase, SessionStore, SessionTimer, TickDriver, TimerSettings,
    TimerSnapshot,
};
pub use storage::Config;
pub use study::{
    FlashcardDeck, GenerationKind, GenerationRequest, GenerationResult, QAPair, QuizResult,
    StudyContentPipeline, TopicSummary,
};
