//! Landing page interpretation.
//!
//! The landing page carries the anti-forgery token every subsequent POST
//! must replay, and — only when the portal decides to gate the search — a
//! FriendlyCaptcha widget whose `data-sitekey` identifies the challenge.

use crate::error::{PortalError, Result};
use scraper::{Html, Selector};
use std::sync::OnceLock;

/// Name of the anti-forgery token input on the landing page.
pub const FORM_TOKEN_INPUT: &str = "FRM_CASETYPES_token";

/// Values lifted from one landing page document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageContext {
    /// Anti-forgery token required on the subsequent form POST
    pub form_token: String,
    /// CAPTCHA site key, present only when the portal gates the search
    pub captcha_site_key: Option<String>,
}

fn token_selector() -> &'static Selector {
    static SELECTOR: OnceLock<Selector> = OnceLock::new();
    SELECTOR.get_or_init(|| {
        Selector::parse(&format!("input[name=\"{FORM_TOKEN_INPUT}\"]")).expect("valid selector")
    })
}

fn captcha_selector() -> &'static Selector {
    static SELECTOR: OnceLock<Selector> = OnceLock::new();
    SELECTOR.get_or_init(|| Selector::parse("div.frc-captcha").expect("valid selector"))
}

/// Parse the landing page HTML into a [`PageContext`].
///
/// The form token is mandatory; without it the pipeline cannot proceed. A
/// missing CAPTCHA widget is not an error — it means the search is ungated.
pub fn parse_landing_page(html: &str) -> Result<PageContext> {
    let document = Html::parse_document(html);

    let form_token = document
        .select(token_selector())
        .next()
        .and_then(|input| input.value().attr("value"))
        .map(str::to_string)
        .ok_or(PortalError::TokenNotFound {
            input_name: FORM_TOKEN_INPUT,
        })?;

    let captcha_site_key = document
        .select(captcha_selector())
        .next()
        .and_then(|widget| widget.value().attr("data-sitekey"))
        .map(str::to_string);

    if captcha_site_key.is_some() {
        tracing::debug!("captcha widget present on landing page");
    }

    Ok(PageContext {
        form_token,
        captcha_site_key,
    })
}
