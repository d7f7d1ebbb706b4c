//! Shared types used across the terminwatch crates.

use crate::error::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A bookable case type on the appointment portal.
///
/// The numeric id selects the booking flow (the portal's `cts` query
/// parameter); the label is the exact key the portal expects inside the
/// `CASETYPES[...]` form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaseType {
    /// Portal identifier, sent as the `cts` query parameter
    pub id: u32,
    /// Selector label, e.g. "Notfalltermin UA 35"
    pub label: String,
}

impl CaseType {
    /// Create a new `CaseType`.
    ///
    /// # Errors
    /// Returns error if the label is empty or whitespace-only.
    pub fn new(id: u32, label: impl Into<String>) -> ConfigResult<Self> {
        let case_type = Self {
            id,
            label: label.into(),
        };
        case_type.validate()?;
        Ok(case_type)
    }

    /// Validate the case type for use in a portal request.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.label.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "case_type.label".to_string(),
                reason: "label cannot be empty".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for CaseType {
    fn default() -> Self {
        Self {
            id: 1_000_113,
            label: "Notfalltermin UA 35".to_string(),
        }
    }
}

impl fmt::Display for CaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (cts={})", self.label, self.id)
    }
}
