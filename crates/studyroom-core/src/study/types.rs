use serde::{Deserialize, Serialize};

use super::prompt::DEFAULT_FLASHCARD_COUNT;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationKind {
    Quiz,
    Flashcards,
    Topics,
}

impl GenerationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            GenerationKind::Quiz => "quiz",
            GenerationKind::Flashcards => "flashcard",
            GenerationKind::Topics => "topic",
        }
    }
}

/// A single generation request. Created and consumed per call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub kind: GenerationKind,
    pub text: String,
    /// Target number of flashcards; ignored for other kinds.
    pub flashcard_count: usize,
}

impl GenerationRequest {
    pub fn quiz(text: impl Into<String>) -> Self {
        Self {
            kind: GenerationKind::Quiz,
            text: text.into(),
            flashcard_count: DEFAULT_FLASHCARD_COUNT,
        }
    }

    pub fn flashcards(text: impl Into<String>, count: usize) -> Self {
        Self {
            kind: GenerationKind::Flashcards,
            text: text.into(),
            flashcard_count: count,
        }
    }

    pub fn topics(text: impl Into<String>) -> Self {
        Self {
            kind: GenerationKind::Topics,
            text: text.into(),
            flashcard_count: DEFAULT_FLASHCARD_COUNT,
        }
    }
}

/// A (question, answer) record extracted from generated text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QAPair {
    pub question: String,
    pub answer: String,
}

impl QAPair {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}

/// Up to five quiz questions, in the order the model produced them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizResult {
    pub questions: Vec<QAPair>,
}

/// Flashcards in response order. May be shorter than the requested count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashcardDeck {
    pub cards: Vec<QAPair>,
    pub target: usize,
}

impl FlashcardDeck {
    pub fn is_short(&self) -> bool {
        self.cards.len() < self.target
    }
}

/// Formatted topic text, passed through without decomposition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TopicSummary(pub String);

impl TopicSummary {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TopicSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GenerationResult {
    Quiz(QuizResult),
    Flashcards(FlashcardDeck),
    Topics { summary: TopicSummary },
}
