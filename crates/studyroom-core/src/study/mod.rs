mod parser;
mod pipeline;
mod prompt;
mod types;

pub use parser::{normalize_bullets, parse_records};
pub use pipeline::StudyContentPipeline;
pub use prompt::{build_prompt, DEFAULT_FLASHCARD_COUNT, QUIZ_MAX_QUESTIONS};
pub use types::{
    FlashcardDeck, GenerationKind, GenerationRequest, GenerationResult, QAPair, QuizResult,
    TopicSummary,
};
