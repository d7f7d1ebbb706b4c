//! High-level portal operations for one check run.

use crate::error::Result;
use crate::form::build_search_form;
use crate::session::PortalSession;
use std::time::Duration;
use terminwatch_core::{CaseType, PortalConfig};

/// Portal client binding a cookie session to one case type.
///
/// Owns the session for exactly one run; drop it to release the underlying
/// connection resources.
pub struct PortalClient {
    session: PortalSession,
    base_url: String,
    origin: String,
    landing_referer: String,
    case_type: CaseType,
}

impl PortalClient {
    /// Create a client for the configured portal and case type.
    pub fn new(config: &PortalConfig, case_type: CaseType) -> Result<Self> {
        let session = PortalSession::new(
            &config.user_agent,
            Duration::from_secs(config.timeout_secs),
        )?;
        let base_url = config.base_url.trim_end_matches('/').to_string();
        let origin = origin_of(&base_url);

        Ok(Self {
            session,
            base_url,
            origin,
            landing_referer: config.landing_referer.clone(),
            case_type,
        })
    }

    /// URL of the landing page for the configured case type.
    #[must_use]
    pub fn landing_url(&self) -> String {
        format!("{}/termin/?cts={}", self.base_url, self.case_type.id)
    }

    /// URL the booking-search form is POSTed to.
    #[must_use]
    pub fn submit_url(&self) -> String {
        format!("{}/termin/index.php?cts={}", self.base_url, self.case_type.id)
    }

    /// Fetch the landing page HTML.
    pub async fn fetch_landing_page(&self) -> Result<String> {
        self.session
            .get(&self.landing_url(), &self.landing_referer)
            .await
    }

    /// Submit the booking search and return the raw response body.
    ///
    /// The landing page is the `Referer` of the submission, matching what a
    /// browser would send after loading the form.
    pub async fn submit_search(
        &self,
        form_token: &str,
        captcha_token: Option<&str>,
    ) -> Result<String> {
        let fields = build_search_form(form_token, &self.case_type.label, captcha_token);
        self.session
            .post_form(&self.submit_url(), &self.landing_url(), &self.origin, &fields)
            .await
    }
}

/// Scheme-and-host origin of a URL, for the submission `Origin` header.
fn origin_of(base_url: &str) -> String {
    url::Url::parse(base_url)
        .map(|parsed| parsed.origin().ascii_serialization())
        .unwrap_or_else(|_| base_url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use terminwatch_core::AppConfig;

    fn test_client() -> PortalClient {
        let config = AppConfig::default();
        PortalClient::new(&config.portal, config.case_type).expect("create portal client")
    }

    #[test]
    fn test_landing_url() {
        let client = test_client();
        assert_eq!(
            client.landing_url(),
            "https://terminvereinbarung.muenchen.de/abh/termin/?cts=1000113"
        );
    }

    #[test]
    fn test_submit_url() {
        let client = test_client();
        assert_eq!(
            client.submit_url(),
            "https://terminvereinbarung.muenchen.de/abh/termin/index.php?cts=1000113"
        );
    }

    #[test]
    fn test_origin_strips_path() {
        assert_eq!(
            origin_of("https://terminvereinbarung.muenchen.de/abh"),
            "https://terminvereinbarung.muenchen.de"
        );
    }
}
