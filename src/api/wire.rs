//! Request bodies and response parsing
//!
//! The service reports model failures as `{"error": "..."}` with a 200
//! status, so responses are inspected as raw JSON before field extraction.

use serde::Serialize;
use serde_json::{Map, Value};

use super::ServiceError;

#[derive(Debug, Serialize)]
pub(crate) struct SuggestionBody<'a> {
    pub prompt: &'a str,
    pub grade: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct LessonPlanBody<'a> {
    pub prompt: &'a str,
    pub grade: &'a str,
    pub learning_outcomes: &'a [String],
    pub disambiguation_tags: &'a [String],
}

/// Extract a list of suggestion strings stored under `field`
pub fn parse_suggestions(body: &str, field: &str) -> Result<Vec<String>, ServiceError> {
    let object = parse_object(body, field)?;
    let items = object
        .get(field)
        .and_then(Value::as_array)
        .ok_or_else(|| ServiceError::Malformed(format!("expected `{field}` array")))?;

    items
        .iter()
        .map(|item| {
            item.as_str().map(str::to_string).ok_or_else(|| {
                ServiceError::Malformed(format!("`{field}` contains a non-string entry"))
            })
        })
        .collect()
}

/// Extract the generated plan text
pub fn parse_lesson_plan(body: &str) -> Result<String, ServiceError> {
    let object = parse_object(body, "lesson_plan")?;
    object
        .get("lesson_plan")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| ServiceError::Malformed("expected `lesson_plan` string".to_string()))
}

fn parse_object(body: &str, field: &str) -> Result<Map<String, Value>, ServiceError> {
    let value: Value =
        serde_json::from_str(body).map_err(|e| ServiceError::Malformed(e.to_string()))?;

    let Value::Object(object) = value else {
        return Err(ServiceError::Malformed("expected a JSON object".to_string()));
    };

    // A body carrying the expected field wins over a stray error entry
    if !object.contains_key(field)
        && let Some(message) = object.get("error")
    {
        let message = message
            .as_str()
            .map(str::to_string)
            .unwrap_or_else(|| message.to_string());
        return Err(ServiceError::Service(message));
    }

    Ok(object)
}
