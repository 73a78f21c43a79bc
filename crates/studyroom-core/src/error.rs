//! Core error types for studyroom-core.
//!
//! This module defines the error hierarchy using thiserror. The study
//! pipeline surfaces [`StudyError`] verbatim to its caller; [`ConfigError`]
//! is absorbed by the session store on load and only surfaces from the
//! configuration API and from failed saves.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for studyroom-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Study content generation errors
    #[error("Study error: {0}")]
    Study(#[from] StudyError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Document loading errors
    #[error("Document error: {0}")]
    Document(#[from] DocumentError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors returned by the study content pipeline.
#[derive(Error, Debug)]
pub enum StudyError {
    /// No source text; the generation service was never called.
    #[error("Selected document has no contents")]
    EmptyInput,

    /// The request was rejected before reaching the service.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The generation service call failed.
    #[error(transparent)]
    Service(#[from] ServiceError),

    /// The service responded but nothing usable could be parsed.
    #[error("No usable {kind} records in the generated response")]
    Parse { kind: &'static str },
}

/// Failures of the external text-generation service.
#[derive(Error, Debug, Clone)]
pub enum ServiceError {
    /// The request never completed (DNS, connect, TLS, timeout).
    #[error("Generation service request failed: {0}")]
    Transport(String),

    /// Missing or rejected credentials.
    #[error("Generation service rejected the credentials: {0}")]
    Unauthorized(String),

    /// Non-success HTTP status other than an authorization failure.
    #[error("Generation service error (HTTP {status}): {body}")]
    Status { status: u16, body: String },

    /// The response did not have the expected shape.
    #[error("Unexpected generation service response: {0}")]
    UnexpectedResponse(String),
}

/// Configuration and persisted-state errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Unknown configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),

    /// The per-user data directory could not be prepared
    #[error("Data directory unavailable: {0}")]
    DataDir(String),
}

/// Errors raised while turning a user-chosen file into plain text.
#[derive(Error, Debug)]
pub enum DocumentError {
    /// The file extension is not one the loader understands.
    #[error("Unsupported document format: {0}")]
    UnsupportedFormat(String),

    /// The file could not be read.
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file was read but its contents could not be extracted.
    #[error("Failed to extract text from {path}: {message}")]
    Malformed { path: PathBuf, message: String },
}

impl From<reqwest::Error> for ServiceError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ServiceError::UnexpectedResponse(err.to_string())
        } else {
            ServiceError::Transport(err.to_string())
        }
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::ParseFailed(err.to_string())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
