//! Error types for portal interactions.

use thiserror::Error;

/// Errors raised while talking to or interpreting the booking portal.
#[derive(Debug, Error)]
pub enum PortalError {
    /// Network, DNS, or TLS failure from the underlying HTTP client
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The portal answered with a non-success HTTP status
    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus {
        /// Status code the portal returned
        status: u16,
        /// URL of the failing request
        url: String,
    },

    /// The anti-forgery token input is missing from the landing page
    #[error("form token input '{input_name}' not found in landing page")]
    TokenNotFound {
        /// Name attribute of the expected input element
        input_name: &'static str,
    },

    /// The embedded appointments payload marker is missing from the response
    #[error("appointments payload marker not found in response body")]
    PayloadNotFound,

    /// The embedded appointments payload does not have the expected shape
    #[error("malformed appointments payload: {reason}")]
    MalformedPayload {
        /// What was wrong with the payload
        reason: String,
    },
}

/// Result type for portal operations.
pub type Result<T> = std::result::Result<T, PortalError>;
