//! Per-category fetch state
//!
//! Learning outcomes and disambiguation tags are fetched and fail
//! independently, so each has its own status and request tracking.

use crate::api::ServiceError;

use super::item::SuggestionList;

/// The two kinds of suggestion the service provides
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    LearningOutcomes,
    DisambiguationTags,
}

impl Category {
    pub const ALL: [Category; 2] = [Category::LearningOutcomes, Category::DisambiguationTags];

    /// Service endpoint path
    pub fn endpoint(self) -> &'static str {
        match self {
            Category::LearningOutcomes => "/generate-learning-outcomes/",
            Category::DisambiguationTags => "/generate-disambiguation-tags/",
        }
    }

    /// JSON field holding the list in the response body
    pub fn response_field(self) -> &'static str {
        match self {
            Category::LearningOutcomes => "learning_outcomes",
            Category::DisambiguationTags => "disambiguation_tags",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::LearningOutcomes => "learning outcomes",
            Category::DisambiguationTags => "disambiguation tags",
        }
    }

    /// Heading shown above the chip list
    pub fn heading(self) -> &'static str {
        match self {
            Category::LearningOutcomes => "Suggestions",
            Category::DisambiguationTags => "What's this about?",
        }
    }

    /// Inline message for any failed fetch, transport or malformed alike
    pub fn failure_message(self) -> String {
        format!("Failed to load {}.", self.label())
    }
}

/// Fetch lifecycle of one category
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FetchStatus {
    #[default]
    Idle,
    Loading,
    Ready,
    Failed(String),
}

/// Items, selection and fetch status for one category
#[derive(Debug, Clone)]
pub struct CategoryState {
    category: Category,
    pub list: SuggestionList,
    status: FetchStatus,
    /// Id of the latest dispatched request that has not resolved yet
    in_flight: Option<u64>,
}

impl CategoryState {
    pub fn new(category: Category) -> Self {
        Self {
            category,
            list: SuggestionList::new(),
            status: FetchStatus::Idle,
            in_flight: None,
        }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn status(&self) -> &FetchStatus {
        &self.status
    }

    pub fn in_flight(&self) -> Option<u64> {
        self.in_flight
    }

    pub fn is_loading(&self) -> bool {
        self.status == FetchStatus::Loading
    }

    /// Record a newly dispatched request
    ///
    /// Returns the id it supersedes, which the caller should cancel.
    pub fn begin(&mut self, request_id: u64) -> Option<u64> {
        self.status = FetchStatus::Loading;
        self.in_flight.replace(request_id)
    }

    /// Apply a response if it belongs to the latest request
    ///
    /// Returns false for stale responses, which leave the state untouched.
    pub fn apply(&mut self, request_id: u64, result: Result<Vec<String>, ServiceError>) -> bool {
        if self.in_flight != Some(request_id) {
            log::debug!(
                "Discarding stale {} response {} (current: {:?})",
                self.category.label(),
                request_id,
                self.in_flight
            );
            return false;
        }
        self.in_flight = None;

        match result {
            Ok(names) => {
                log::debug!(
                    "Received {} {} for request {}",
                    names.len(),
                    self.category.label(),
                    request_id
                );
                self.list.replace_fetched(names);
                self.status = FetchStatus::Ready;
            }
            Err(e) if e.is_cancelled() => {
                self.status = FetchStatus::Idle;
            }
            Err(e) => {
                log::warn!("Fetching {} failed: {}", self.category.label(), e);
                self.status = FetchStatus::Failed(self.category.failure_message());
            }
        }
        true
    }

    /// Forget the in-flight request; its response will be discarded
    ///
    /// Returns the abandoned id so the caller can cancel it.
    pub fn abandon(&mut self) -> Option<u64> {
        let abandoned = self.in_flight.take();
        if self.status == FetchStatus::Loading {
            self.status = FetchStatus::Idle;
        }
        abandoned
    }

    /// Abandon any request and empty the list
    pub fn reset(&mut self) -> Option<u64> {
        let abandoned = self.abandon();
        self.list.clear_all();
        self.status = FetchStatus::Idle;
        abandoned
    }
}
