//! Tests for the suggestion coordinator

use super::*;
use crate::suggestions::FetchStatus;
use proptest::prelude::*;
use std::sync::mpsc::{self, Sender};
use tokio::sync::mpsc::{UnboundedReceiver, unbounded_channel};

const DEBOUNCE_MS: u64 = 2000;

struct Harness {
    coordinator: SuggestionCoordinator,
    requests: UnboundedReceiver<WorkerRequest>,
    responses: Sender<WorkerResponse>,
    start: Instant,
}

impl Harness {
    fn new() -> Self {
        Self::with_grade(Some(GradeLevel::HighSchool))
    }

    fn with_grade(grade: Option<GradeLevel>) -> Self {
        let config = SuggestionsConfig {
            debounce_ms: DEBOUNCE_MS,
        };
        let mut coordinator = SuggestionCoordinator::new(&config, grade);
        let (request_tx, requests) = unbounded_channel();
        let (responses, response_rx) = mpsc::channel();
        coordinator.set_channels(request_tx, response_rx);

        Self {
            coordinator,
            requests,
            responses,
            start: Instant::now(),
        }
    }

    fn at(&self, ms: u64) -> Instant {
        self.start + Duration::from_millis(ms)
    }

    fn drain(&mut self) -> Vec<WorkerRequest> {
        let mut requests = Vec::new();
        while let Ok(request) = self.requests.try_recv() {
            requests.push(request);
        }
        requests
    }

    /// Type a topic and let the debounce window elapse
    fn fetch_for(&mut self, topic: &str, at_ms: u64) -> Vec<WorkerRequest> {
        self.coordinator.set_topic(topic, self.at(at_ms));
        assert!(self.coordinator.tick(self.at(at_ms + DEBOUNCE_MS)));
        self.drain()
    }

    fn respond(&mut self, category: Category, request_id: u64, names: &[&str]) -> bool {
        self.coordinator.handle_response(WorkerResponse::Suggestions {
            category,
            request_id,
            result: Ok(names.iter().map(|n| n.to_string()).collect()),
        })
    }
}

fn fetch_ids(requests: &[WorkerRequest]) -> Vec<(Category, String, u64)> {
    requests
        .iter()
        .filter_map(|request| match request {
            WorkerRequest::Fetch {
                category,
                params,
                request_id,
            } => Some((*category, params.topic.clone(), *request_id)),
            _ => None,
        })
        .collect()
}

fn fetch_id(requests: &[WorkerRequest], wanted: Category) -> u64 {
    fetch_ids(requests)
        .into_iter()
        .find(|(category, _, _)| *category == wanted)
        .map(|(_, _, id)| id)
        .expect("fetch for category")
}

fn cancelled_ids(requests: &[WorkerRequest]) -> Vec<u64> {
    requests
        .iter()
        .filter_map(|request| match request {
            WorkerRequest::Cancel { request_id } => Some(*request_id),
            _ => None,
        })
        .collect()
}

fn names(coordinator: &SuggestionCoordinator, category: Category) -> Vec<String> {
    coordinator
        .state(category)
        .list
        .items()
        .iter()
        .map(|item| item.name.clone())
        .collect()
}

// =========================================================================
// Debounce and scheduling
// =========================================================================

#[test]
fn test_no_fetch_before_window_elapses() {
    let mut h = Harness::new();
    h.coordinator.set_topic("Fractions", h.at(0));

    assert!(h.coordinator.is_fetch_scheduled());
    assert!(!h.coordinator.tick(h.at(DEBOUNCE_MS - 1)));
    assert!(h.drain().is_empty());
}

#[test]
fn test_burst_of_edits_issues_one_fetch_pair_with_final_values() {
    let mut h = Harness::new();
    h.coordinator.set_topic("F", h.at(0));
    h.coordinator.set_topic("Fr", h.at(300));
    h.coordinator.set_grade(Some(GradeLevel::Elementary), h.at(900));
    h.coordinator.set_topic("Fractions", h.at(1500));

    assert!(!h.coordinator.tick(h.at(3000)));
    assert!(h.coordinator.tick(h.at(3500)));

    let requests = h.drain();
    let fetches: Vec<_> = requests
        .iter()
        .filter_map(|request| match request {
            WorkerRequest::Fetch {
                category, params, ..
            } => Some((*category, params.clone())),
            _ => None,
        })
        .collect();

    assert_eq!(fetches.len(), 2);
    for category in Category::ALL {
        let params = &fetches.iter().find(|(c, _)| *c == category).unwrap().1;
        assert_eq!(params.topic, "Fractions");
        assert_eq!(params.grade, GradeLevel::Elementary);
    }
    assert!(!h.coordinator.tick(h.at(10_000)));
}

#[test]
fn test_both_categories_loading_after_dispatch() {
    let mut h = Harness::new();
    h.fetch_for("Volcanoes", 0);

    assert!(h.coordinator.state(Category::LearningOutcomes).is_loading());
    assert!(h.coordinator.state(Category::DisambiguationTags).is_loading());
    assert!(h.coordinator.is_busy());
}

#[test]
fn test_clearing_topic_before_window_cancels_fetch() {
    let mut h = Harness::new();
    h.coordinator.set_topic("Fractions", h.at(0));
    h.coordinator.set_topic("", h.at(1000));

    assert!(!h.coordinator.is_fetch_scheduled());
    assert!(!h.coordinator.tick(h.at(5000)));
    assert!(fetch_ids(&h.drain()).is_empty());
    for category in Category::ALL {
        assert!(h.coordinator.state(category).list.is_empty());
    }
}

#[test]
fn test_whitespace_topic_counts_as_empty() {
    let mut h = Harness::new();
    h.coordinator.set_topic("   ", h.at(0));
    assert!(!h.coordinator.is_fetch_scheduled());
    assert!(!h.coordinator.tick(h.at(5000)));
}

#[test]
fn test_unsetting_grade_before_window_cancels_fetch() {
    let mut h = Harness::new();
    h.coordinator.set_topic("Fractions", h.at(0));
    h.coordinator.set_grade(None, h.at(500));

    assert!(!h.coordinator.tick(h.at(5000)));
    assert!(fetch_ids(&h.drain()).is_empty());
}

#[test]
fn test_no_fetch_without_grade() {
    let mut h = Harness::with_grade(None);
    h.coordinator.set_topic("Fractions", h.at(0));
    assert!(!h.coordinator.is_fetch_scheduled());

    h.coordinator.set_grade(Some(GradeLevel::College), h.at(100));
    assert!(h.coordinator.tick(h.at(100 + DEBOUNCE_MS)));
}

#[test]
fn test_clearing_topic_empties_lists_and_cancels_in_flight() {
    let mut h = Harness::new();
    let requests = h.fetch_for("Fractions", 0);
    let outcomes_id = fetch_id(&requests, Category::LearningOutcomes);
    let tags_id = fetch_id(&requests, Category::DisambiguationTags);
    h.respond(Category::LearningOutcomes, outcomes_id, &["Compare fractions"]);
    h.coordinator.add_manual(Category::LearningOutcomes, "My outcome");

    h.coordinator.set_topic("", h.at(5000));

    assert_eq!(cancelled_ids(&h.drain()), vec![tags_id]);
    for category in Category::ALL {
        let state = h.coordinator.state(category);
        assert!(state.list.is_empty());
        assert!(state.list.selected().is_empty());
        assert_eq!(state.status(), &FetchStatus::Idle);
    }

    // The tags response arriving late is ignored
    assert!(!h.respond(Category::DisambiguationTags, tags_id, &["Math"]));
    assert!(h.coordinator.state(Category::DisambiguationTags).list.is_empty());
}

#[test]
fn test_setting_same_topic_does_not_reschedule() {
    let mut h = Harness::new();
    h.coordinator.set_topic("Fractions", h.at(0));
    h.coordinator.set_topic("Fractions", h.at(1500));

    assert!(h.coordinator.tick(h.at(DEBOUNCE_MS)));
}

#[test]
fn test_trailing_whitespace_keeps_in_flight_fetch() {
    let mut h = Harness::new();
    let requests = h.fetch_for("Fractions", 0);
    let outcomes_id = fetch_id(&requests, Category::LearningOutcomes);

    h.coordinator.set_topic("Fractions ", h.at(2500));

    assert!(cancelled_ids(&h.drain()).is_empty());
    assert!(!h.coordinator.is_fetch_scheduled());
    assert!(h.coordinator.state(Category::LearningOutcomes).is_loading());
    assert!(h.respond(
        Category::LearningOutcomes,
        outcomes_id,
        &["Compare fractions"]
    ));
    assert_eq!(
        names(&h.coordinator, Category::LearningOutcomes),
        vec!["Compare fractions"]
    );
}

#[test]
fn test_whitespace_edit_does_not_extend_window() {
    let mut h = Harness::new();
    h.coordinator.set_topic("Fractions", h.at(0));
    h.coordinator.set_topic(" Fractions", h.at(1500));

    assert!(h.coordinator.tick(h.at(DEBOUNCE_MS)));
}

#[test]
fn test_poll_timeout_tracks_deadline() {
    let mut h = Harness::new();
    assert_eq!(h.coordinator.poll_timeout(h.at(0)), None);

    h.coordinator.set_topic("Fractions", h.at(0));
    assert_eq!(
        h.coordinator.poll_timeout(h.at(500)),
        Some(Duration::from_millis(DEBOUNCE_MS - 500))
    );
}

// =========================================================================
// Responses and staleness
// =========================================================================

#[test]
fn test_responses_populate_lists() {
    let mut h = Harness::new();
    let requests = h.fetch_for("Mercury", 0);

    assert!(h.respond(
        Category::DisambiguationTags,
        fetch_id(&requests, Category::DisambiguationTags),
        &["Planet", "Element"],
    ));
    assert!(h.respond(
        Category::LearningOutcomes,
        fetch_id(&requests, Category::LearningOutcomes),
        &["Describe orbits"],
    ));

    assert_eq!(
        names(&h.coordinator, Category::DisambiguationTags),
        vec!["Planet", "Element"]
    );
    assert_eq!(
        names(&h.coordinator, Category::LearningOutcomes),
        vec!["Describe orbits"]
    );
    assert!(!h.coordinator.is_busy());
}

#[test]
fn test_stale_response_arriving_after_newer_one_is_discarded() {
    let mut h = Harness::new();
    let first = h.fetch_for("A", 0);
    let first_outcomes = fetch_id(&first, Category::LearningOutcomes);
    let first_tags = fetch_id(&first, Category::DisambiguationTags);

    h.coordinator.set_topic("B", h.at(2500));
    let changed = h.drain();
    assert_eq!(cancelled_ids(&changed), vec![first_outcomes, first_tags]);

    assert!(h.coordinator.tick(h.at(2500 + DEBOUNCE_MS)));
    let second = h.drain();
    assert!(fetch_ids(&second).iter().all(|(_, topic, _)| topic == "B"));

    assert!(h.respond(
        Category::LearningOutcomes,
        fetch_id(&second, Category::LearningOutcomes),
        &["B outcome"],
    ));
    assert!(!h.respond(Category::LearningOutcomes, first_outcomes, &["A outcome"]));

    assert_eq!(
        names(&h.coordinator, Category::LearningOutcomes),
        vec!["B outcome"]
    );
}

#[test]
fn test_stale_response_during_new_debounce_window_is_discarded() {
    let mut h = Harness::new();
    let first = h.fetch_for("A", 0);
    h.coordinator.set_topic("B", h.at(2500));

    assert!(!h.respond(
        Category::DisambiguationTags,
        fetch_id(&first, Category::DisambiguationTags),
        &["A tag"],
    ));
    assert!(h.coordinator.state(Category::DisambiguationTags).list.is_empty());
    assert_eq!(
        h.coordinator.state(Category::DisambiguationTags).status(),
        &FetchStatus::Idle
    );
}

#[test]
fn test_refresh_cancels_superseded_requests() {
    let mut h = Harness::new();
    let first = h.fetch_for("Fractions", 0);

    assert!(h.coordinator.refresh());
    let second = h.drain();

    let mut cancelled = cancelled_ids(&second);
    cancelled.sort();
    let mut expected: Vec<u64> = fetch_ids(&first).into_iter().map(|(_, _, id)| id).collect();
    expected.sort();
    assert_eq!(cancelled, expected);
    assert_eq!(fetch_ids(&second).len(), 2);
}

#[test]
fn test_refresh_without_params_does_nothing() {
    let mut h = Harness::with_grade(None);
    assert!(!h.coordinator.refresh());
    assert!(h.drain().is_empty());
}

#[test]
fn test_failure_in_one_category_does_not_affect_the_other() {
    let mut h = Harness::new();
    let requests = h.fetch_for("Fractions", 0);

    h.coordinator.handle_response(WorkerResponse::Suggestions {
        category: Category::LearningOutcomes,
        request_id: fetch_id(&requests, Category::LearningOutcomes),
        result: Err(ServiceError::Network("connection refused".to_string())),
    });

    let tags = h.coordinator.state(Category::DisambiguationTags);
    assert!(tags.is_loading());

    h.respond(
        Category::DisambiguationTags,
        fetch_id(&requests, Category::DisambiguationTags),
        &["Math"],
    );

    assert_eq!(
        h.coordinator.state(Category::LearningOutcomes).status(),
        &FetchStatus::Failed("Failed to load learning outcomes.".to_string())
    );
    assert_eq!(
        h.coordinator.state(Category::DisambiguationTags).status(),
        &FetchStatus::Ready
    );
    assert_eq!(names(&h.coordinator, Category::DisambiguationTags), vec!["Math"]);
}

#[test]
fn test_poll_responses_drains_channel() {
    let mut h = Harness::new();
    let requests = h.fetch_for("Fractions", 0);

    h.responses
        .send(WorkerResponse::Suggestions {
            category: Category::LearningOutcomes,
            request_id: fetch_id(&requests, Category::LearningOutcomes),
            result: Ok(vec!["Compare fractions".to_string()]),
        })
        .unwrap();

    assert!(h.coordinator.poll_responses());
    assert!(!h.coordinator.poll_responses());
    assert_eq!(
        names(&h.coordinator, Category::LearningOutcomes),
        vec!["Compare fractions"]
    );
}

#[test]
fn test_fetch_without_worker_reports_failure() {
    let config = SuggestionsConfig { debounce_ms: 10 };
    let mut coordinator = SuggestionCoordinator::new(&config, Some(GradeLevel::PreK));
    let start = Instant::now();
    coordinator.set_topic("Colors", start);

    assert!(coordinator.tick(start + Duration::from_millis(10)));
    for category in Category::ALL {
        assert!(matches!(
            coordinator.state(category).status(),
            FetchStatus::Failed(_)
        ));
    }
}

// =========================================================================
// Curation
// =========================================================================

#[test]
fn test_curation_operations_per_category() {
    let mut h = Harness::new();
    let requests = h.fetch_for("Mercury", 0);
    h.respond(
        Category::DisambiguationTags,
        fetch_id(&requests, Category::DisambiguationTags),
        &["Planet", "Element"],
    );

    assert!(h.coordinator.toggle(Category::DisambiguationTags, "Planet"));
    assert!(!h.coordinator.toggle(Category::DisambiguationTags, "Planet"));
    assert!(h.coordinator.state(Category::DisambiguationTags).list.selected().is_empty());

    assert!(h.coordinator.add_manual(Category::DisambiguationTags, "  ").is_none());
    assert!(h.coordinator.add_manual(Category::DisambiguationTags, "Roman god").is_some());

    h.coordinator.toggle(Category::DisambiguationTags, "Element");
    assert!(h.coordinator.remove(Category::DisambiguationTags, "Element"));
    let tags = &h.coordinator.state(Category::DisambiguationTags).list;
    assert!(!tags.contains("Element"));
    assert!(!tags.is_selected("Element"));
    assert_eq!(tags.selected(), ["Roman god".to_string()]);

    // Outcomes are untouched by tag edits
    assert!(h.coordinator.state(Category::LearningOutcomes).list.is_empty());

    h.coordinator.clear_all(Category::DisambiguationTags);
    assert!(h.coordinator.state(Category::DisambiguationTags).list.is_empty());
}

#[test]
fn test_manual_items_survive_refetch() {
    let mut h = Harness::new();
    let first = h.fetch_for("Mercury", 0);
    h.respond(
        Category::LearningOutcomes,
        fetch_id(&first, Category::LearningOutcomes),
        &["Describe orbits"],
    );
    h.coordinator.add_manual(Category::LearningOutcomes, "Field trip");

    let second = h.fetch_for("Mercury planet", 3000);
    h.respond(
        Category::LearningOutcomes,
        fetch_id(&second, Category::LearningOutcomes),
        &["Compare planets"],
    );

    assert_eq!(
        names(&h.coordinator, Category::LearningOutcomes),
        vec!["Compare planets", "Field trip"]
    );
    assert_eq!(
        h.coordinator.state(Category::LearningOutcomes).list.selected(),
        ["Field trip".to_string()]
    );
}

// =========================================================================
// Submission
// =========================================================================

fn generate_requests(requests: &[WorkerRequest]) -> Vec<(GenerationRequest, u64)> {
    requests
        .iter()
        .filter_map(|request| match request {
            WorkerRequest::Generate {
                request,
                request_id,
            } => Some((request.clone(), *request_id)),
            _ => None,
        })
        .collect()
}

#[test]
fn test_submit_with_empty_topic_fails_validation() {
    let mut h = Harness::new();

    let result = h.coordinator.submit();
    assert!(matches!(result, Err(PlannerError::Validation(_))));
    assert!(h.drain().is_empty());
    assert_eq!(
        h.coordinator.generation(),
        &GenerationStatus::Failed("Please fill in all required fields.".to_string())
    );
}

#[test]
fn test_submit_without_grade_fails_validation() {
    let mut h = Harness::with_grade(None);
    h.coordinator.set_topic("Fractions", h.at(0));

    assert!(matches!(
        h.coordinator.submit(),
        Err(PlannerError::Validation(_))
    ));
    assert!(generate_requests(&h.drain()).is_empty());
}

#[test]
fn test_submit_sends_one_request_with_current_selections() {
    let mut h = Harness::new();
    let requests = h.fetch_for("Volcanoes", 0);
    h.respond(
        Category::LearningOutcomes,
        fetch_id(&requests, Category::LearningOutcomes),
        &["Describe eruptions", "Map plates"],
    );
    h.respond(
        Category::DisambiguationTags,
        fetch_id(&requests, Category::DisambiguationTags),
        &["Geology", "Music band"],
    );
    h.coordinator.toggle(Category::LearningOutcomes, "Map plates");
    h.coordinator.toggle(Category::DisambiguationTags, "Geology");
    h.coordinator.add_manual(Category::LearningOutcomes, "Build a model");
    h.coordinator.set_notes("  45 minutes  ");
    h.coordinator.attach_document("docs/volcano.pdf");

    let request_id = h.coordinator.submit().unwrap();
    let generated = generate_requests(&h.drain());

    assert_eq!(generated.len(), 1);
    let (request, sent_id) = &generated[0];
    assert_eq!(*sent_id, request_id);
    assert_eq!(request.topic, "Volcanoes");
    assert_eq!(request.grade, GradeLevel::HighSchool);
    assert_eq!(request.learning_outcomes, vec!["Map plates", "Build a model"]);
    assert_eq!(request.disambiguation_tags, vec!["Geology"]);
    assert_eq!(request.notes.as_deref(), Some("45 minutes"));
    assert_eq!(request.document, Some(PathBuf::from("docs/volcano.pdf")));
    assert_eq!(h.coordinator.generation(), &GenerationStatus::Generating);
}

#[test]
fn test_successful_generation_is_plan_ready() {
    let mut h = Harness::new();
    h.coordinator.set_topic("Fractions", h.at(0));
    let request_id = h.coordinator.submit().unwrap();

    assert!(h.coordinator.handle_response(WorkerResponse::LessonPlan {
        request_id,
        result: Ok("Lesson: fractions".to_string()),
    }));
    assert_eq!(
        h.coordinator.generation(),
        &GenerationStatus::PlanReady("Lesson: fractions".to_string())
    );

    assert_eq!(h.coordinator.take_plan().as_deref(), Some("Lesson: fractions"));
    assert_eq!(h.coordinator.generation(), &GenerationStatus::Idle);
    assert_eq!(h.coordinator.take_plan(), None);
    assert_eq!(
        h.coordinator.last_generation_request().map(|r| r.topic.as_str()),
        Some("Fractions")
    );
}

#[test]
fn test_generation_failure_keeps_input_intact() {
    let mut h = Harness::new();
    let requests = h.fetch_for("Fractions", 0);
    h.respond(
        Category::LearningOutcomes,
        fetch_id(&requests, Category::LearningOutcomes),
        &["Compare fractions"],
    );
    h.coordinator.toggle(Category::LearningOutcomes, "Compare fractions");

    let request_id = h.coordinator.submit().unwrap();
    h.coordinator.handle_response(WorkerResponse::LessonPlan {
        request_id,
        result: Err(ServiceError::Malformed("missing lesson_plan".to_string())),
    });

    assert!(matches!(
        h.coordinator.generation(),
        GenerationStatus::Failed(_)
    ));
    assert_eq!(h.coordinator.topic(), "Fractions");
    assert_eq!(
        h.coordinator.state(Category::LearningOutcomes).list.selected(),
        ["Compare fractions".to_string()]
    );

    // Retry works
    h.drain();
    h.coordinator.submit().unwrap();
    assert_eq!(generate_requests(&h.drain()).len(), 1);
}

#[test]
fn test_resubmit_discards_previous_generation() {
    let mut h = Harness::new();
    h.coordinator.set_topic("Fractions", h.at(0));
    let first = h.coordinator.submit().unwrap();
    let second = h.coordinator.submit().unwrap();

    assert!(cancelled_ids(&h.drain()).contains(&first));
    assert!(!h.coordinator.handle_response(WorkerResponse::LessonPlan {
        request_id: first,
        result: Ok("old plan".to_string()),
    }));
    assert!(h.coordinator.handle_response(WorkerResponse::LessonPlan {
        request_id: second,
        result: Ok("new plan".to_string()),
    }));
    assert_eq!(h.coordinator.take_plan().as_deref(), Some("new plan"));
}

#[test]
fn test_failed_validation_cancels_pending_generation() {
    let mut h = Harness::new();
    h.coordinator.set_topic("Fractions", h.at(0));
    let pending = h.coordinator.submit().unwrap();
    h.drain();

    h.coordinator.set_topic("", h.at(100));
    assert!(matches!(
        h.coordinator.submit(),
        Err(PlannerError::Validation(_))
    ));
    assert!(cancelled_ids(&h.drain()).contains(&pending));

    // The plan for the earlier input never opens
    assert!(!h.coordinator.handle_response(WorkerResponse::LessonPlan {
        request_id: pending,
        result: Ok("old plan".to_string()),
    }));
    assert_eq!(h.coordinator.take_plan(), None);
    assert_eq!(
        h.coordinator.generation(),
        &GenerationStatus::Failed("Please fill in all required fields.".to_string())
    );
}

#[test]
fn test_detach_document() {
    let mut h = Harness::new();
    h.coordinator.attach_document("syllabus.pdf");
    h.coordinator.detach_document();
    assert!(h.coordinator.document().is_none());
}

#[test]
fn test_attach_blank_document_detaches() {
    let mut h = Harness::new();
    h.coordinator.attach_document("syllabus.pdf");
    assert!(h.coordinator.document().is_some());
    h.coordinator.attach_document("  ");
    assert!(h.coordinator.document().is_none());
}

// =========================================================================
// Teardown
// =========================================================================

#[test]
fn test_close_cancels_timer_and_requests() {
    let mut h = Harness::new();
    h.fetch_for("Fractions", 0);
    let generation = h.coordinator.submit().unwrap();
    h.coordinator.set_grade(Some(GradeLevel::College), h.at(3000));
    h.drain();

    // Fetches for College are pending; generation is in flight
    assert!(h.coordinator.is_fetch_scheduled());
    h.coordinator.close();

    let cancelled = cancelled_ids(&h.drain());
    assert!(cancelled.contains(&generation));
    assert!(!h.coordinator.is_fetch_scheduled());
    assert!(!h.coordinator.tick(h.at(60_000)));
    assert_eq!(h.coordinator.generation(), &GenerationStatus::Idle);
}

#[test]
fn test_closed_coordinator_sends_nothing() {
    let mut h = Harness::new();
    h.coordinator.close();
    h.coordinator.set_topic("Fractions", h.at(0));
    h.coordinator.tick(h.at(DEBOUNCE_MS));

    assert!(h.drain().is_empty());
    assert!(matches!(
        h.coordinator.submit(),
        Err(PlannerError::WorkerUnavailable)
    ));
}

// =========================================================================
// Property-Based Tests
// =========================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Any burst of edits inside the window yields one fetch per category,
    // using the final parameters
    #[test]
    fn prop_burst_yields_single_fetch_pair(
        edits in prop::collection::vec(("[a-z]{1,8}", 0u64..DEBOUNCE_MS), 1..15),
        grade in prop::sample::select(GradeLevel::ALL.to_vec()),
    ) {
        let mut h = Harness::with_grade(Some(grade));
        let mut now = 0;
        let mut final_topic = String::new();
        for (i, (topic, gap)) in edits.iter().enumerate() {
            now += gap;
            final_topic = format!("{}{}", topic, i);
            h.coordinator.set_topic(&final_topic, h.at(now));
            prop_assert!(!h.coordinator.tick(h.at(now)));
        }

        prop_assert!(h.coordinator.tick(h.at(now + DEBOUNCE_MS)));
        let fetches = fetch_ids(&h.drain());
        prop_assert_eq!(fetches.len(), 2);

        for (_, topic, _) in &fetches {
            prop_assert_eq!(topic, &final_topic);
        }
        prop_assert!(!h.coordinator.tick(h.at(now + 10 * DEBOUNCE_MS)));
    }

    // Only the response for the latest dispatch is ever displayed,
    // regardless of the order responses come back in
    #[test]
    fn prop_only_latest_response_applies(
        rounds in 2usize..6,
        rotation in 0usize..6,
    ) {
        let mut h = Harness::new();
        let mut dispatched = Vec::new();
        for round in 0..rounds {
            let requests = h.fetch_for(&format!("topic {}", round), round as u64 * 10_000);
            dispatched.push((round, fetch_id(&requests, Category::LearningOutcomes)));
        }

        // Deliver in a scrambled order
        let len = dispatched.len();
        let mut scrambled = dispatched.clone();
        scrambled.rotate_left(rotation % len);

        for (round, request_id) in scrambled {
            let name = format!("outcome {}", round);
            h.respond(Category::LearningOutcomes, request_id, &[name.as_str()]);
        }

        let expected = format!("outcome {}", rounds - 1);
        prop_assert_eq!(names(&h.coordinator, Category::LearningOutcomes), vec![expected]);
    }
}
