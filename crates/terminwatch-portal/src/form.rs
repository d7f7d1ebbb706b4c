//! Booking-search form construction.

use crate::page::FORM_TOKEN_INPUT;

/// Fixed step marker for the search-by-case-type flow.
pub const STEP_SEARCH_BY_CASETYPES: &str = "WEB_APPOINT_SEARCH_BY_CASETYPES";

/// Field name the portal-side CAPTCHA verifier expects the solution under.
pub const FIELD_CAPTCHA_SOLUTION: &str = "frc-captcha-solution";

/// Build the URL-encoded body for the booking-search POST.
///
/// The CAPTCHA solution field is only appended when a token was solved; an
/// ungated search must not carry it.
pub fn build_search_form(
    form_token: &str,
    case_label: &str,
    captcha_token: Option<&str>,
) -> Vec<(String, String)> {
    let mut fields = vec![
        (FORM_TOKEN_INPUT.to_string(), form_token.to_string()),
        ("step".to_string(), STEP_SEARCH_BY_CASETYPES.to_string()),
        (format!("CASETYPES[{case_label}]"), "1".to_string()),
    ];

    if let Some(token) = captcha_token {
        fields.push((FIELD_CAPTCHA_SOLUTION.to_string(), token.to_string()));
    }

    fields
}
