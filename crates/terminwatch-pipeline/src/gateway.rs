//! Portal gateway seam for the pipeline.

use async_trait::async_trait;
use terminwatch_portal::{PortalClient, Result};

/// Portal operations the pipeline drives, pluggable for tests.
#[async_trait]
pub trait PortalGateway: Send + Sync {
    /// Landing page URL — also the website URL reported to the solver.
    fn landing_url(&self) -> String;

    /// Fetch the landing page HTML.
    async fn fetch_landing_page(&self) -> Result<String>;

    /// Submit the booking search with the given tokens, returning the raw
    /// response body.
    async fn submit_search(
        &self,
        form_token: &str,
        captcha_token: Option<&str>,
    ) -> Result<String>;
}

#[async_trait]
impl PortalGateway for PortalClient {
    fn landing_url(&self) -> String {
        PortalClient::landing_url(self)
    }

    async fn fetch_landing_page(&self) -> Result<String> {
        PortalClient::fetch_landing_page(self).await
    }

    async fn submit_search(
        &self,
        form_token: &str,
        captcha_token: Option<&str>,
    ) -> Result<String> {
        PortalClient::submit_search(self, form_token, captcha_token).await
    }
}
