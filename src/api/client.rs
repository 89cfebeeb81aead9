//! HTTP client for the lesson-plan service
//!
//! Every call takes a cancellation token. A cancelled token aborts the
//! in-flight HTTP request instead of waiting for it to finish.

use std::time::Duration;

use serde::Serialize;
use tokio_util::sync::CancellationToken;

use super::ServiceError;
use super::wire::{LessonPlanBody, SuggestionBody, parse_lesson_plan, parse_suggestions};
use crate::config::ServiceConfig;
use crate::lesson::{FetchParams, GenerationRequest};
use crate::suggestions::Category;

const LESSON_PLAN_PATH: &str = "/generate-lesson-plan/";

/// Async client for the lesson-plan service
#[derive(Debug, Clone)]
pub struct LessonPlanClient {
    http: reqwest::Client,
    base_url: String,
}

impl LessonPlanClient {
    /// Build a client from the `[service]` config section
    pub fn new(config: &ServiceConfig) -> Result<Self, ServiceError> {
        let base_url = config.base_url.trim().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(ServiceError::NotConfigured(
                "service.base_url is empty".to_string(),
            ));
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ServiceError::NotConfigured(e.to_string()))?;

        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch suggestions of one category for a topic and grade
    pub async fn suggestions(
        &self,
        category: Category,
        params: &FetchParams,
        cancel_token: &CancellationToken,
    ) -> Result<Vec<String>, ServiceError> {
        let body = SuggestionBody {
            prompt: &params.topic,
            grade: params.grade.label(),
        };
        let text = self.post(category.endpoint(), &body, cancel_token).await?;
        parse_suggestions(&text, category.response_field())
    }

    /// Generate a lesson plan from the curated selections
    pub async fn lesson_plan(
        &self,
        request: &GenerationRequest,
        cancel_token: &CancellationToken,
    ) -> Result<String, ServiceError> {
        let body = LessonPlanBody {
            prompt: &request.topic,
            grade: request.grade.label(),
            learning_outcomes: &request.learning_outcomes,
            disambiguation_tags: &request.disambiguation_tags,
        };
        let text = self.post(LESSON_PLAN_PATH, &body, cancel_token).await?;
        parse_lesson_plan(&text)
    }

    async fn post<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        cancel_token: &CancellationToken,
    ) -> Result<String, ServiceError> {
        // Don't touch the network for a request that is already stale
        if cancel_token.is_cancelled() {
            return Err(ServiceError::Cancelled);
        }

        let url = format!("{}{}", self.base_url, path);
        let request = async {
            let response = self
                .http
                .post(&url)
                .json(body)
                .send()
                .await
                .map_err(|e| ServiceError::Network(e.to_string()))?;

            let status = response.status();
            let text = response
                .text()
                .await
                .map_err(|e| ServiceError::Network(e.to_string()))?;

            if !status.is_success() {
                return Err(ServiceError::Api {
                    code: status.as_u16(),
                    message: text,
                });
            }
            Ok(text)
        };

        tokio::select! {
            biased;
            _ = cancel_token.cancelled() => Err(ServiceError::Cancelled),
            result = request => result,
        }
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod client_tests;
