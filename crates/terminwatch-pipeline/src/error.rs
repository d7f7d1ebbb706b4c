//! Error types for the check pipeline.

use terminwatch_portal::PortalError;
use terminwatch_solver::SolveError;
use thiserror::Error;

/// Errors surfaced by a check run, attributed to the failing subsystem.
///
/// Nothing is recovered internally; every variant is terminal for the
/// current run. The inner error names the exact stage that failed (token
/// extraction, payload parsing, solve polling, ...).
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Portal interaction or interpretation failed
    #[error("portal stage failed: {0}")]
    Portal(#[from] PortalError),

    /// CAPTCHA solving failed, timed out, or was cancelled
    #[error("captcha stage failed: {0}")]
    Solver(#[from] SolveError),
}

/// Result type for pipeline operations.
pub type Result<T> = std::result::Result<T, PipelineError>;
