//! Suggestion service API
//!
//! Typed client for the lesson-plan service: learning outcomes,
//! disambiguation tags and lesson plan generation.

use thiserror::Error;

mod client;
mod wire;

pub use client::LessonPlanClient;
pub use wire::{parse_lesson_plan, parse_suggestions};

/// Errors that can occur while talking to the service
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    /// No usable base URL or the HTTP client could not be built
    #[error("Service not configured: {0}")]
    NotConfigured(String),

    /// Connection, DNS, timeout or body read failure
    #[error("Network error: {0}")]
    Network(String),

    /// Non-success HTTP status
    #[error("API error ({code}): {message}")]
    Api { code: u16, message: String },

    /// The service answered with an `{"error": ...}` object
    #[error("Service error: {0}")]
    Service(String),

    /// Response JSON is missing the expected field or has the wrong shape
    #[error("Malformed response: {0}")]
    Malformed(String),

    /// Request was cancelled before it completed
    #[error("Request cancelled")]
    Cancelled,
}

impl ServiceError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, ServiceError::Cancelled)
    }
}
