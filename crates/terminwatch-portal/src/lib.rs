//! Terminwatch Portal - Booking portal interaction.
//!
//! This crate covers everything that touches the appointment portal itself:
//! the cookie-persisting HTTP session, landing-page interpretation (form
//! token and optional CAPTCHA site key), booking-search form construction
//! and submission, and extraction/evaluation of the appointments payload
//! embedded in the submission response.
//!
//! # Example
//!
//! ```rust
//! use terminwatch_portal::{evaluate, extract_appoints_json, parse_availability};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let body = r#"var jsonAppoints = '{"LOADBALANCER":{"appoints":{"2024-05-01":[{"slot":"09:00"}]}}}'"#;
//! let map = parse_availability(extract_appoints_json(body)?)?;
//! assert_eq!(evaluate(&map).date(), Some("2024-05-01"));
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

pub mod appoints;
pub mod client;
pub mod error;
pub mod form;
pub mod page;
pub mod session;

// Re-export commonly used types
pub use appoints::{
    evaluate, extract_appoints_json, first_available, parse_availability, AvailabilityMap, Verdict,
};
pub use client::PortalClient;
pub use error::{PortalError, Result};
pub use form::{build_search_form, FIELD_CAPTCHA_SOLUTION, STEP_SEARCH_BY_CASETYPES};
pub use page::{parse_landing_page, PageContext, FORM_TOKEN_INPUT};
pub use session::PortalSession;
