//! The study content pipeline.
//!
//! Every operation validates its input, builds one prompt, calls the
//! generation service exactly once and shapes the reply. Nothing is cached
//! and no state survives between calls.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info};

use super::parser::parse_records;
use super::prompt::{build_prompt, QUIZ_MAX_QUESTIONS};
use super::types::{
    FlashcardDeck, GenerationKind, GenerationRequest, GenerationResult, QAPair, QuizResult,
    TopicSummary,
};
use crate::error::StudyError;
use crate::generation::TextGenerationService;

pub struct StudyContentPipeline {
    service: Arc<dyn TextGenerationService>,
    /// Held for the duration of a service call; serializes overlapping calls.
    in_flight: Mutex<()>,
}

impl StudyContentPipeline {
    pub fn new(service: Arc<dyn TextGenerationService>) -> Self {
        Self {
            service,
            in_flight: Mutex::new(()),
        }
    }

    pub async fn generate_quiz(&self, text: &str) -> Result<QuizResult, StudyError> {
        let request = GenerationRequest::quiz(text);
        let questions = self.records(&request, QUIZ_MAX_QUESTIONS).await?;
        Ok(QuizResult { questions })
    }

    pub async fn generate_flashcards(
        &self,
        text: &str,
        count: usize,
    ) -> Result<FlashcardDeck, StudyError> {
        if text.trim().is_empty() {
            return Err(StudyError::EmptyInput);
        }
        if count == 0 {
            return Err(StudyError::InvalidRequest(
                "flashcard count must be at least 1".into(),
            ));
        }
        let request = GenerationRequest::flashcards(text, count);
        let cards = self.records(&request, count).await?;
        Ok(FlashcardDeck {
            cards,
            target: count,
        })
    }

    pub async fn extract_topics(&self, text: &str) -> Result<TopicSummary, StudyError> {
        let request = GenerationRequest::topics(text);
        let raw = self.call(&request).await?;
        Ok(TopicSummary(raw.trim().to_string()))
    }

    /// Dispatch a request to the matching operation.
    pub async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResult, StudyError> {
        match request.kind {
            GenerationKind::Quiz => self.generate_quiz(&request.text).await.map(GenerationResult::Quiz),
            GenerationKind::Flashcards => self
                .generate_flashcards(&request.text, request.flashcard_count)
                .await
                .map(GenerationResult::Flashcards),
            GenerationKind::Topics => self
                .extract_topics(&request.text)
                .await
                .map(|summary| GenerationResult::Topics { summary }),
        }
    }

    // ── Internal ─────────────────────────────────────────────────────

    async fn records(
        &self,
        request: &GenerationRequest,
        cap: usize,
    ) -> Result<Vec<QAPair>, StudyError> {
        let raw = self.call(request).await?;
        let mut records = parse_records(&raw);
        if records.is_empty() {
            return Err(StudyError::Parse {
                kind: request.kind.as_str(),
            });
        }
        if records.len() > cap {
            debug!(parsed = records.len(), cap, "truncating generated records");
            records.truncate(cap);
        }
        info!(kind = request.kind.as_str(), records = records.len(), "generated study records");
        Ok(records)
    }

    async fn call(&self, request: &GenerationRequest) -> Result<String, StudyError> {
        if request.text.trim().is_empty() {
            return Err(StudyError::EmptyInput);
        }
        let prompt = build_prompt(request);
        let _guard = self.in_flight.lock().await;
        debug!(
            kind = request.kind.as_str(),
            prompt_chars = prompt.chars().count(),
            "calling generation service"
        );
        Ok(self.service.call(&prompt).await?)
    }
}
