//! Single-pass availability check orchestration.
//!
//! Sequences landing-page fetch, optional CAPTCHA solving, form submission,
//! and payload evaluation into one sequential run. CAPTCHA handling is a
//! conditional branch, never a separate code path: the form is only
//! submitted once the solver has returned a token, or once the landing page
//! proved no gate is present.

use crate::error::Result;
use crate::gateway::PortalGateway;
use std::time::Duration;
use terminwatch_core::AppConfig;
use terminwatch_portal::{
    evaluate, extract_appoints_json, parse_availability, parse_landing_page, PortalClient, Verdict,
};
use terminwatch_solver::SolverClient;
use tokio_util::sync::CancellationToken;

/// Orchestrates one end-to-end availability check.
///
/// Owns the portal session for the duration of the run; the cookie jar is
/// never shared across concurrent checks.
pub struct CheckOrchestrator {
    portal: Box<dyn PortalGateway>,
    solver: SolverClient,
    solve_timeout: Option<Duration>,
}

impl CheckOrchestrator {
    /// Create an orchestrator over the given portal gateway and solver.
    #[must_use]
    pub fn new(portal: Box<dyn PortalGateway>, solver: SolverClient) -> Self {
        Self {
            portal,
            solver,
            solve_timeout: None,
        }
    }

    /// Assemble the production orchestrator from configuration.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let portal = PortalClient::new(&config.portal, config.case_type.clone())?;
        let solver = SolverClient::new(&config.solver)?;

        Ok(Self::new(Box::new(portal), solver)
            .with_solve_timeout(config.solver.timeout_secs.map(Duration::from_secs)))
    }

    /// Bound the total CAPTCHA solve wait; unbounded when `None`.
    #[must_use]
    pub fn with_solve_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.solve_timeout = timeout;
        self
    }

    /// Run the full check once and return the availability verdict.
    ///
    /// When a solve timeout is configured, a deadline task arms the
    /// cancellation token so solver polling cannot outlive it.
    pub async fn run(&self) -> Result<Verdict> {
        let cancel = CancellationToken::new();
        let deadline = self.solve_timeout.map(|timeout| {
            let cancel = cancel.clone();
            tokio::spawn(async move {
                tokio::time::sleep(timeout).await;
                cancel.cancel();
            })
        });

        let verdict = self.run_with_cancel(&cancel).await;

        if let Some(deadline) = deadline {
            deadline.abort();
        }

        verdict
    }

    /// Run the full check, honoring an externally controlled cancellation
    /// token.
    pub async fn run_with_cancel(&self, cancel: &CancellationToken) -> Result<Verdict> {
        let landing_url = self.portal.landing_url();
        tracing::info!(url = %landing_url, "fetching landing page");
        let html = self.portal.fetch_landing_page().await?;
        let context = parse_landing_page(&html)?;

        let captcha_token = match &context.captcha_site_key {
            Some(site_key) => {
                tracing::info!("captcha gate detected, delegating to solver");
                Some(self.solver.solve(site_key, &landing_url, cancel).await?)
            }
            None => {
                tracing::info!("no captcha gate on landing page");
                None
            }
        };

        tracing::info!("submitting booking search");
        let body = self
            .portal
            .submit_search(&context.form_token, captcha_token.as_deref())
            .await?;

        let map = parse_availability(extract_appoints_json(&body)?)?;
        let verdict = evaluate(&map);

        match &verdict {
            Verdict::SlotsOpen { date } => tracing::info!(%date, "open slots found"),
            Verdict::NoSlots => tracing::info!("no open slots"),
        }

        Ok(verdict)
    }
}
