// Configuration type definitions

use serde::Deserialize;

use crate::lesson::GradeLevel;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_DEBOUNCE_MS: u64 = 2000;

/// Clipboard backend selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ClipboardBackend {
    #[default]
    Auto,
    System,
    Osc52,
}

/// Clipboard configuration section
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClipboardConfig {
    #[serde(default)]
    pub backend: ClipboardBackend,
}

/// Suggestion service connection
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout; lesson plan generation is slow
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        ServiceConfig {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Suggestion fetching behaviour
#[derive(Debug, Clone, Deserialize)]
pub struct SuggestionsConfig {
    /// Quiet period after the last topic/grade edit before fetching
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

impl Default for SuggestionsConfig {
    fn default() -> Self {
        SuggestionsConfig {
            debounce_ms: default_debounce_ms(),
        }
    }
}

/// Dialog defaults
#[derive(Debug, Clone, Deserialize)]
pub struct DialogConfig {
    /// Grade preselected when the dialog opens; absent means unset
    #[serde(default = "default_grade")]
    pub default_grade: Option<GradeLevel>,
}

impl Default for DialogConfig {
    fn default() -> Self {
        DialogConfig {
            default_grade: default_grade(),
        }
    }
}

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub service: ServiceConfig,
    #[serde(default)]
    pub suggestions: SuggestionsConfig,
    #[serde(default)]
    pub dialog: DialogConfig,
    #[serde(default)]
    pub clipboard: ClipboardConfig,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_debounce_ms() -> u64 {
    DEFAULT_DEBOUNCE_MS
}

fn default_grade() -> Option<GradeLevel> {
    Some(GradeLevel::HighSchool)
}
