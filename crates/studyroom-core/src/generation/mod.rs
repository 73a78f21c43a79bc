//! Text-generation service boundary.

mod gemini;

pub use gemini::{GeminiClient, GeminiSettings};

use async_trait::async_trait;

use crate::error::ServiceError;

/// A service that turns a prompt into generated text.
///
/// Implementations make exactly one round-trip per call and never retry.
#[async_trait]
pub trait TextGenerationService: Send + Sync {
    async fn call(&self, prompt: &str) -> Result<String, ServiceError>;
}
