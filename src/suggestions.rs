//! Suggestion coordination for the lesson-plan dialog
//!
//! Turns topic/grade edits into debounced fetches of learning outcomes and
//! disambiguation tags, keeps the two curated lists, and submits the
//! generation request.

mod category;
mod coordinator;
mod debouncer;
mod item;

pub use category::{Category, CategoryState, FetchStatus};
pub use coordinator::{GenerationStatus, SuggestionCoordinator};
pub use debouncer::Debouncer;
pub use item::{ItemId, ItemOrigin, SuggestionItem, SuggestionList};
