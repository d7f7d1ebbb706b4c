//! Embedded appointments payload extraction and evaluation.
//!
//! The submission response is HTML; the appointment data is a JSON string
//! embedded in an inline script as `var jsonAppoints = '...'`. Extraction
//! isolates that string, parsing turns it into a date → slots map, and
//! evaluation answers the one question the pipeline asks: is any slot open?

use crate::error::{PortalError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// Mapping from date string to the slot descriptors offered on that date.
///
/// A `BTreeMap` keeps iteration deterministic, so "first available date"
/// always means the lexicographically earliest one.
pub type AvailabilityMap = BTreeMap<String, Vec<Value>>;

#[derive(Debug, Deserialize)]
struct AppointsPayload {
    #[serde(rename = "LOADBALANCER")]
    load_balancer: LoadBalancerRecord,
}

#[derive(Debug, Deserialize)]
struct LoadBalancerRecord {
    appoints: AvailabilityMap,
}

/// Availability verdict for one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    /// At least one date currently offers a bookable slot
    SlotsOpen {
        /// First date with a non-empty slot list
        date: String,
    },
    /// Every offered date has an empty slot list
    NoSlots,
}

impl Verdict {
    /// Check whether any slot is open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        matches!(self, Self::SlotsOpen { .. })
    }

    /// The first available date, if any.
    #[must_use]
    pub fn date(&self) -> Option<&str> {
        match self {
            Self::SlotsOpen { date } => Some(date),
            Self::NoSlots => None,
        }
    }
}

fn appoints_marker() -> &'static Regex {
    static MARKER: OnceLock<Regex> = OnceLock::new();
    MARKER.get_or_init(|| Regex::new(r"var jsonAppoints = '(.*?)'").expect("valid regex"))
}

/// Isolate the embedded JSON string from the submission response body.
pub fn extract_appoints_json(body: &str) -> Result<&str> {
    appoints_marker()
        .captures(body)
        .and_then(|captures| captures.get(1))
        .map(|json| json.as_str())
        .ok_or(PortalError::PayloadNotFound)
}

/// Parse the extracted JSON into an [`AvailabilityMap`].
///
/// The payload must nest the `appoints` map under the `LOADBALANCER`
/// record; anything else is a structure change on the portal side.
pub fn parse_availability(json: &str) -> Result<AvailabilityMap> {
    let payload: AppointsPayload =
        serde_json::from_str(json).map_err(|e| PortalError::MalformedPayload {
            reason: e.to_string(),
        })?;
    Ok(payload.load_balancer.appoints)
}

/// First date with a non-empty slot list, if any.
pub fn first_available(map: &AvailabilityMap) -> Option<&str> {
    map.iter()
        .find(|(_, slots)| !slots.is_empty())
        .map(|(date, _)| date.as_str())
}

/// Evaluate the availability question over a parsed map.
#[must_use]
pub fn evaluate(map: &AvailabilityMap) -> Verdict {
    match first_available(map) {
        Some(date) => Verdict::SlotsOpen {
            date: date.to_string(),
        },
        None => Verdict::NoSlots,
    }
}
