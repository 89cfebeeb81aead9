//! Lesson planner
//!
//! Terminal front end for a lesson-plan generation service: pick a tool,
//! enter a topic and grade, curate the suggested learning outcomes and
//! disambiguation tags, and generate an editable plan.

pub mod api;
pub mod app;
pub mod clipboard;
pub mod config;
pub mod error;
pub mod lesson;
pub mod notification;
pub mod suggestions;
pub mod widgets;
pub mod worker;

#[cfg(test)]
mod test_utils;
