//! Gemini integration -- text generation via the `generateContent` REST endpoint.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::json;
use tracing::debug;
use url::Url;

use super::TextGenerationService;
use crate::error::ServiceError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Endpoint, credentials and sampling tunables for [`GeminiClient`].
#[derive(Debug, Clone)]
pub struct GeminiSettings {
    pub base_url: String,
    pub model: String,
    pub api_key: Option<String>,
    pub max_output_tokens: u32,
    pub temperature: f64,
}

impl Default for GeminiSettings {
    fn default() -> Self {
        Self {
            base_url: "https://generativelanguage.googleapis.com".into(),
            model: "gemini-2.0-flash".into(),
            api_key: None,
            max_output_tokens: 512,
            temperature: 0.7,
        }
    }
}

pub struct GeminiClient {
    settings: GeminiSettings,
    http_client: Client,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

impl GeminiClient {
    /// # Errors
    ///
    /// Returns [`ServiceError::Transport`] if the HTTP client cannot be built
    /// (for example when no TLS backend is available).
    pub fn new(settings: GeminiSettings) -> Result<Self, ServiceError> {
        let http_client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            settings,
            http_client,
        })
    }

    fn endpoint(&self, api_key: &str) -> Result<Url, ServiceError> {
        let mut url = Url::parse(&self.settings.base_url).map_err(|e| {
            ServiceError::Transport(format!("invalid base URL '{}': {e}", self.settings.base_url))
        })?;
        url.path_segments_mut()
            .map_err(|_| {
                ServiceError::Transport(format!(
                    "base URL '{}' cannot carry a path",
                    self.settings.base_url
                ))
            })?
            .pop_if_empty()
            .extend([
                "v1beta",
                "models",
                &format!("{}:generateContent", self.settings.model),
            ]);
        url.query_pairs_mut().append_pair("key", api_key);
        Ok(url)
    }
}

#[async_trait]
impl TextGenerationService for GeminiClient {
    async fn call(&self, prompt: &str) -> Result<String, ServiceError> {
        let api_key = self
            .settings
            .api_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| ServiceError::Unauthorized("no API key configured".into()))?;

        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "generationConfig": {
                "maxOutputTokens": self.settings.max_output_tokens,
                "temperature": self.settings.temperature,
            }
        });

        debug!(model = %self.settings.model, "posting generateContent request");
        let resp = self
            .http_client
            .post(self.endpoint(api_key)?)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(match status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                    ServiceError::Unauthorized(format!("HTTP {}", status.as_u16()))
                }
                _ => ServiceError::Status {
                    status: status.as_u16(),
                    body: text,
                },
            });
        }

        let parsed: GenerateContentResponse = resp.json().await?;
        parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .and_then(|content| content.parts.into_iter().next())
            .and_then(|part| part.text)
            .map(|text| text.trim().to_string())
            .ok_or_else(|| {
                ServiceError::UnexpectedResponse("missing candidates[0].content.parts[0].text".into())
            })
    }
}
