//! Terminwatch Solver - Client for the external CAPTCHA solving service.
//!
//! The solver works asynchronously: a challenge is registered through a
//! create-task call, then polled until the service reports a solution or a
//! terminal failure. Each poll response is classified into the [`TaskPoll`]
//! sum type, and the polling loop honors an injected cancellation token so
//! a caller can bound the total wait.
//!
//! The transport sits behind the [`SolverApi`] trait; tests script poll
//! sequences against it without any network.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

pub mod api;
pub mod client;
pub mod error;

// Re-export commonly used types
pub use api::{
    CreateTaskRequest, CreatedTask, HttpSolverApi, RawTaskResult, Solution, SolverApi, TaskPoll,
    TaskResultRequest, TaskSpec,
};
pub use client::SolverClient;
pub use error::{Result, SolveError};
