//! Terminwatch Pipeline - End-to-end availability check orchestration.
//!
//! This crate sequences the portal and solver crates into the single-pass
//! check: fetch the landing page, read the anti-forgery token, solve the
//! CAPTCHA if the portal raised one, submit the booking search, and turn
//! the embedded appointments payload into a [`Verdict`].
//!
//! # Example
//!
//! ```rust,ignore
//! use terminwatch_core::AppConfig;
//! use terminwatch_pipeline::CheckOrchestrator;
//!
//! let config = AppConfig::load_with_env()?;
//! let orchestrator = CheckOrchestrator::from_config(&config)?;
//! let verdict = orchestrator.run().await?;
//! if let Some(date) = verdict.date() {
//!     println!("open slots on {date}");
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

pub mod error;
pub mod gateway;
pub mod orchestrator;

// Re-export commonly used types
pub use error::{PipelineError, Result};
pub use gateway::PortalGateway;
pub use orchestrator::CheckOrchestrator;
pub use terminwatch_portal::Verdict;
