//! Terminwatch Core - Foundation crate for the terminwatch workspace.
//!
//! This crate provides the shared types, error handling, and configuration
//! management that the portal, solver, and pipeline crates depend on.
//!
//! # Modules
//!
//! - [`error`] - Configuration error types using thiserror
//! - [`config`] - TOML-based configuration with XDG paths and env overrides
//! - [`types`] - Shared domain types (`CaseType`)
//!
//! # Example
//!
//! ```rust
//! use terminwatch_core::AppConfig;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::default();
//! config.validate()?;
//! assert_eq!(config.solver.poll_interval_secs, 5);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

pub mod config;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use config::{AppConfig, PortalConfig, SolverConfig};
pub use error::{ConfigError, ConfigResult};
pub use types::CaseType;
