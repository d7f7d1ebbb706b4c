//! Error types for the CAPTCHA solver client.

use thiserror::Error;

/// Errors raised while solving a CAPTCHA through the external service.
#[derive(Debug, Error)]
pub enum SolveError {
    /// Network, DNS, or TLS failure talking to the solver service
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Solver service answered with a non-success HTTP status
    #[error("solver API returned HTTP status {status}")]
    ApiStatus {
        /// Status code the service returned
        status: u16,
    },

    /// Solver rejected the create-task request
    #[error("create task failed ({code}): {description}")]
    CreateTaskFailed {
        /// Service error code, e.g. `ERROR_KEY_DOES_NOT_EXIST`
        code: String,
        /// Human-readable description from the service
        description: String,
    },

    /// Solver reported a terminal failure for a submitted task
    #[error("captcha solve failed ({code}): {description}")]
    TaskFailed {
        /// Service error code, e.g. `ERROR_CAPTCHA_UNSOLVABLE`
        code: String,
        /// Human-readable description from the service
        description: String,
    },

    /// Polling was cancelled before a solution was ready
    #[error("captcha solve cancelled before completion")]
    Cancelled,

    /// A poll response did not match any known variant
    #[error("unrecognized solver response: {detail}")]
    UnrecognizedResponse {
        /// What the response looked like
        detail: String,
    },
}

/// Result type for solver operations.
pub type Result<T> = std::result::Result<T, SolveError>;
