//! Suggestion coordinator
//!
//! Owns the dialog's input state. Topic/grade edits restart a debounce
//! timer; when it elapses both suggestion categories are fetched
//! concurrently through the worker. Every dispatched request carries a
//! fresh id and only the response matching a category's latest id is
//! applied, so a slow reply for an old topic can never overwrite a newer one.

use std::path::PathBuf;
use std::sync::mpsc::Receiver;
use std::time::{Duration, Instant};

use tokio::sync::mpsc::UnboundedSender;

use super::category::{Category, CategoryState};
use super::debouncer::Debouncer;
use super::item::ItemId;
use crate::api::ServiceError;
use crate::config::SuggestionsConfig;
use crate::error::PlannerError;
use crate::lesson::{FetchParams, GenerationRequest, GradeLevel};
use crate::worker::{WorkerRequest, WorkerResponse};

const MISSING_FIELDS_MESSAGE: &str = "Please fill in all required fields.";
const GENERATION_FAILED_MESSAGE: &str = "Failed to generate lesson plan. Please try again.";

/// Lesson plan generation lifecycle
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum GenerationStatus {
    #[default]
    Idle,
    Generating,
    PlanReady(String),
    Failed(String),
}

/// Coordinates input, debounced fetches and generation for one dialog
pub struct SuggestionCoordinator {
    topic: String,
    grade: Option<GradeLevel>,
    notes: String,
    document: Option<PathBuf>,
    debouncer: Debouncer,
    outcomes: CategoryState,
    tags: CategoryState,
    generation: GenerationStatus,
    /// Id of the generation request awaiting a response
    pending_generation: Option<u64>,
    /// Last request handed to the service, kept for the plan view
    last_generation: Option<GenerationRequest>,
    next_request_id: u64,
    request_tx: Option<UnboundedSender<WorkerRequest>>,
    response_rx: Option<Receiver<WorkerResponse>>,
}

impl SuggestionCoordinator {
    pub fn new(config: &SuggestionsConfig, default_grade: Option<GradeLevel>) -> Self {
        Self {
            topic: String::new(),
            grade: default_grade,
            notes: String::new(),
            document: None,
            debouncer: Debouncer::new(config.debounce_ms),
            outcomes: CategoryState::new(Category::LearningOutcomes),
            tags: CategoryState::new(Category::DisambiguationTags),
            generation: GenerationStatus::Idle,
            pending_generation: None,
            last_generation: None,
            next_request_id: 0,
            request_tx: None,
            response_rx: None,
        }
    }

    /// Set the channel handles for communication with the worker
    pub fn set_channels(
        &mut self,
        request_tx: UnboundedSender<WorkerRequest>,
        response_rx: Receiver<WorkerResponse>,
    ) {
        self.request_tx = Some(request_tx);
        self.response_rx = Some(response_rx);
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn grade(&self) -> Option<GradeLevel> {
        self.grade
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    pub fn document(&self) -> Option<&PathBuf> {
        self.document.as_ref()
    }

    pub fn state(&self, category: Category) -> &CategoryState {
        match category {
            Category::LearningOutcomes => &self.outcomes,
            Category::DisambiguationTags => &self.tags,
        }
    }

    fn state_mut(&mut self, category: Category) -> &mut CategoryState {
        match category {
            Category::LearningOutcomes => &mut self.outcomes,
            Category::DisambiguationTags => &mut self.tags,
        }
    }

    pub fn generation(&self) -> &GenerationStatus {
        &self.generation
    }

    pub fn last_generation_request(&self) -> Option<&GenerationRequest> {
        self.last_generation.as_ref()
    }

    pub fn is_fetch_scheduled(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// Parameters a fetch would use, if both are present
    pub fn fetch_params(&self) -> Option<FetchParams> {
        let topic = self.topic.trim();
        match self.grade {
            Some(grade) if !topic.is_empty() => Some(FetchParams {
                topic: topic.to_string(),
                grade,
            }),
            _ => None,
        }
    }

    pub fn set_topic(&mut self, topic: &str, now: Instant) {
        if self.topic == topic {
            return;
        }
        let previous = self.fetch_params();
        self.topic = topic.to_string();
        self.reevaluate(previous, now);
    }

    pub fn set_grade(&mut self, grade: Option<GradeLevel>, now: Instant) {
        if self.grade == grade {
            return;
        }
        let previous = self.fetch_params();
        self.grade = grade;
        self.reevaluate(previous, now);
    }

    pub fn set_notes(&mut self, notes: &str) {
        self.notes = notes.to_string();
    }

    /// Attach a reference document; blank paths detach
    pub fn attach_document(&mut self, path: &str) {
        let path = path.trim();
        self.document = if path.is_empty() {
            None
        } else {
            Some(PathBuf::from(path))
        };
    }

    pub fn detach_document(&mut self) {
        self.document = None;
    }

    /// React to an input change
    ///
    /// Edits that leave the fetch parameters unchanged (surrounding
    /// whitespace) keep the current fetch and timer. Otherwise any in-flight
    /// fetch is for old parameters and is abandoned. Complete parameters
    /// restart the debounce window; incomplete ones cancel it and empty both
    /// lists.
    fn reevaluate(&mut self, previous: Option<FetchParams>, now: Instant) {
        if self.fetch_params() == previous {
            return;
        }
        self.abandon_fetches();

        if self.fetch_params().is_some() {
            self.debouncer.schedule(now);
        } else {
            self.debouncer.cancel();
            self.outcomes.reset();
            self.tags.reset();
        }
    }

    /// Dispatch the fetches once the quiet period has elapsed
    ///
    /// Returns true if fetches were dispatched.
    pub fn tick(&mut self, now: Instant) -> bool {
        if !self.debouncer.fire(now) {
            return false;
        }
        self.dispatch_fetches()
    }

    /// Fetch immediately for the current parameters, skipping the debounce
    pub fn refresh(&mut self) -> bool {
        self.debouncer.cancel();
        self.dispatch_fetches()
    }

    fn dispatch_fetches(&mut self) -> bool {
        let Some(params) = self.fetch_params() else {
            return false;
        };

        for category in Category::ALL {
            let request_id = self.allocate_request_id();
            if let Some(superseded) = self.state_mut(category).begin(request_id) {
                self.send(WorkerRequest::Cancel {
                    request_id: superseded,
                });
            }

            let sent = self.send(WorkerRequest::Fetch {
                category,
                params: params.clone(),
                request_id,
            });
            if !sent {
                self.state_mut(category).apply(
                    request_id,
                    Err(ServiceError::NotConfigured(
                        PlannerError::WorkerUnavailable.to_string(),
                    )),
                );
            }
        }
        log::debug!(
            "Dispatched suggestion fetches for {:?} ({})",
            params.topic,
            params.grade
        );
        true
    }

    fn abandon_fetches(&mut self) {
        for category in Category::ALL {
            if let Some(request_id) = self.state_mut(category).abandon() {
                self.send(WorkerRequest::Cancel { request_id });
            }
        }
    }

    /// Drain worker responses. Returns true if any state changed.
    pub fn poll_responses(&mut self) -> bool {
        let responses: Vec<WorkerResponse> = match &self.response_rx {
            Some(rx) => rx.try_iter().collect(),
            None => return false,
        };

        let mut changed = false;
        for response in responses {
            changed |= self.handle_response(response);
        }
        changed
    }

    /// Apply one worker response. Stale responses are ignored.
    pub fn handle_response(&mut self, response: WorkerResponse) -> bool {
        match response {
            WorkerResponse::Suggestions {
                category,
                request_id,
                result,
            } => self.state_mut(category).apply(request_id, result),
            WorkerResponse::LessonPlan { request_id, result } => {
                if self.pending_generation != Some(request_id) {
                    log::debug!("Discarding stale lesson plan response {}", request_id);
                    return false;
                }
                self.pending_generation = None;
                self.generation = match result {
                    Ok(plan) => GenerationStatus::PlanReady(plan),
                    Err(e) if e.is_cancelled() => GenerationStatus::Idle,
                    Err(e) => {
                        log::warn!("Lesson plan generation failed: {}", e);
                        GenerationStatus::Failed(GENERATION_FAILED_MESSAGE.to_string())
                    }
                };
                true
            }
        }
    }

    pub fn toggle(&mut self, category: Category, name: &str) -> bool {
        self.state_mut(category).list.toggle(name)
    }

    pub fn add_manual(&mut self, category: Category, name: &str) -> Option<ItemId> {
        self.state_mut(category).list.add_manual(name)
    }

    pub fn remove(&mut self, category: Category, name: &str) -> bool {
        self.state_mut(category).list.remove(name)
    }

    pub fn clear_all(&mut self, category: Category) {
        self.state_mut(category).list.clear_all();
    }

    /// Build the generation request from the current input
    pub fn generation_request(&self) -> Result<GenerationRequest, PlannerError> {
        let params = self
            .fetch_params()
            .ok_or_else(|| PlannerError::Validation(MISSING_FIELDS_MESSAGE.to_string()))?;
        let notes = self.notes.trim();

        Ok(GenerationRequest {
            topic: params.topic,
            grade: params.grade,
            learning_outcomes: self.outcomes.list.selected().to_vec(),
            disambiguation_tags: self.tags.list.selected().to_vec(),
            document: self.document.clone(),
            notes: (!notes.is_empty()).then(|| notes.to_string()),
        })
    }

    /// Validate input and request a lesson plan
    ///
    /// On a validation error no generation request is sent. Input and
    /// selections are never modified, so a failed attempt can simply be
    /// retried.
    pub fn submit(&mut self) -> Result<u64, PlannerError> {
        let request = match self.generation_request() {
            Ok(request) => request,
            Err(e) => {
                // A plan for earlier input must not open
                self.cancel_generation();
                self.generation = GenerationStatus::Failed(MISSING_FIELDS_MESSAGE.to_string());
                return Err(e);
            }
        };

        self.cancel_generation();

        let request_id = self.allocate_request_id();
        let sent = self.send(WorkerRequest::Generate {
            request: request.clone(),
            request_id,
        });
        if !sent {
            self.generation = GenerationStatus::Failed(GENERATION_FAILED_MESSAGE.to_string());
            return Err(PlannerError::WorkerUnavailable);
        }

        self.pending_generation = Some(request_id);
        self.last_generation = Some(request);
        self.generation = GenerationStatus::Generating;
        Ok(request_id)
    }

    /// Hand over a finished plan, returning generation to idle
    pub fn take_plan(&mut self) -> Option<String> {
        match std::mem::take(&mut self.generation) {
            GenerationStatus::PlanReady(plan) => Some(plan),
            other => {
                self.generation = other;
                None
            }
        }
    }

    /// True while any request is outstanding
    pub fn is_busy(&self) -> bool {
        self.outcomes.is_loading()
            || self.tags.is_loading()
            || self.generation == GenerationStatus::Generating
    }

    /// How long the event loop may sleep before the debounce deadline
    pub fn poll_timeout(&self, now: Instant) -> Option<Duration> {
        self.debouncer.remaining(now)
    }

    /// Tear down: stop the timer, cancel everything and release the worker
    pub fn close(&mut self) {
        self.debouncer.cancel();
        self.abandon_fetches();
        if self.cancel_generation() {
            self.generation = GenerationStatus::Idle;
        }
        self.request_tx = None;
        self.response_rx = None;
    }

    /// Cancel the pending generation request. Returns true if one was pending.
    fn cancel_generation(&mut self) -> bool {
        match self.pending_generation.take() {
            Some(request_id) => {
                self.send(WorkerRequest::Cancel { request_id });
                true
            }
            None => false,
        }
    }

    fn allocate_request_id(&mut self) -> u64 {
        self.next_request_id = self.next_request_id.wrapping_add(1);
        self.next_request_id
    }

    fn send(&self, request: WorkerRequest) -> bool {
        match &self.request_tx {
            Some(tx) => tx.send(request).is_ok(),
            None => false,
        }
    }
}

#[cfg(test)]
#[path = "coordinator_tests.rs"]
mod coordinator_tests;
