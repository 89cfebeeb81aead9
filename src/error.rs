use thiserror::Error;

/// Custom error types for lessonplan
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlannerError {
    /// Required input missing when submitting
    #[error("Validation error: {0}")]
    Validation(String),

    /// The request worker is gone (dialog closed or thread exited)
    #[error("Request worker unavailable")]
    WorkerUnavailable,

    #[error("IO error: {0}")]
    Io(String),
}

impl From<std::io::Error> for PlannerError {
    fn from(err: std::io::Error) -> Self {
        PlannerError::Io(err.to_string())
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod error_tests;
