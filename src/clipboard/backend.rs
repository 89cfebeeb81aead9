//! Clipboard backend selection and error types

use thiserror::Error;

use crate::config::ClipboardBackend;

use super::{osc52, system};

/// Where copied text ended up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipboardTarget {
    System,
    Terminal,
}

impl ClipboardTarget {
    /// Status line text after a successful copy
    pub fn confirmation(self) -> &'static str {
        match self {
            ClipboardTarget::System => "Copied lesson plan to clipboard",
            ClipboardTarget::Terminal => "Copied lesson plan via terminal (OSC 52)",
        }
    }
}

pub type ClipboardResult = Result<ClipboardTarget, ClipboardError>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ClipboardError {
    #[error("System clipboard unavailable")]
    SystemUnavailable,

    #[error("Failed to write to clipboard: {0}")]
    WriteError(String),
}

/// Copy text using the configured backend
///
/// `Auto` tries the system clipboard first and falls back to OSC 52.
pub fn copy_to_clipboard(text: &str, backend: ClipboardBackend) -> ClipboardResult {
    match backend {
        ClipboardBackend::System => system::copy(text).map(|_| ClipboardTarget::System),
        ClipboardBackend::Osc52 => osc52::copy(text).map(|_| ClipboardTarget::Terminal),
        ClipboardBackend::Auto => match system::copy(text) {
            Ok(()) => Ok(ClipboardTarget::System),
            Err(e) => {
                log::debug!("System clipboard failed ({}), falling back to OSC 52", e);
                osc52::copy(text).map(|_| ClipboardTarget::Terminal)
            }
        },
    }
}

#[cfg(test)]
#[path = "backend_tests.rs"]
mod backend_tests;
