//! Cookie-persisting HTTP session for the booking portal.

use crate::error::{PortalError, Result};
use reqwest::{Client, Response};
use std::time::Duration;

/// HTTP session scoped to one pipeline run.
///
/// Cookies set by any portal response are replayed on subsequent requests
/// through the same session. The cookie jar belongs to this session alone;
/// concurrent runs each get their own.
pub struct PortalSession {
    client: Client,
}

impl PortalSession {
    /// Create a session with the given user agent and per-request timeout.
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .cookie_store(true)
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }

    /// GET a page, returning the body on a success status.
    pub async fn get(&self, url: &str, referer: &str) -> Result<String> {
        let response = self
            .client
            .get(url)
            .header("Referer", referer)
            .send()
            .await?;
        Self::read_body(url, response).await
    }

    /// POST a URL-encoded form, returning the body on a success status.
    ///
    /// `Content-Type: application/x-www-form-urlencoded` is set by the form
    /// encoder; `Origin` and `Referer` are supplied by the caller.
    pub async fn post_form(
        &self,
        url: &str,
        referer: &str,
        origin: &str,
        fields: &[(String, String)],
    ) -> Result<String> {
        let response = self
            .client
            .post(url)
            .header("Referer", referer)
            .header("Origin", origin)
            .form(fields)
            .send()
            .await?;
        Self::read_body(url, response).await
    }

    async fn read_body(url: &str, response: Response) -> Result<String> {
        let status = response.status();
        if !status.is_success() {
            return Err(PortalError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        Ok(response.text().await?)
    }
}
