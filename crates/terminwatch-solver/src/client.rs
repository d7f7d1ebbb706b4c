//! Asynchronous CAPTCHA solve orchestration.

use crate::api::{
    CreateTaskRequest, HttpSolverApi, SolverApi, TaskPoll, TaskResultRequest, TaskSpec,
};
use crate::error::{Result, SolveError};
use std::time::Duration;
use terminwatch_core::SolverConfig;
use tokio_util::sync::CancellationToken;

/// Client for the asynchronous CAPTCHA solving service.
///
/// Submits a solve task and polls until the solver reports a terminal state.
/// The loop itself never caps its iterations; the caller bounds total wait
/// through the cancellation token.
pub struct SolverClient {
    api: Box<dyn SolverApi>,
    client_key: String,
    task_type: String,
    poll_interval: Duration,
}

impl SolverClient {
    /// Create a client against the configured HTTP solver service.
    pub fn new(config: &SolverConfig) -> Result<Self> {
        Ok(Self::with_api(
            Box::new(HttpSolverApi::new(&config.api_base_url)?),
            config.client_key.clone(),
            config.task_type.clone(),
            Duration::from_secs(config.poll_interval_secs),
        ))
    }

    /// Create a client over a custom transport.
    #[must_use]
    pub fn with_api(
        api: Box<dyn SolverApi>,
        client_key: impl Into<String>,
        task_type: impl Into<String>,
        poll_interval: Duration,
    ) -> Self {
        Self {
            api,
            client_key: client_key.into(),
            task_type: task_type.into(),
            poll_interval,
        }
    }

    /// Solve the CAPTCHA identified by `site_key` as embedded at `website_url`.
    ///
    /// Returns the solution token, or [`SolveError::Cancelled`] once `cancel`
    /// fires between polls. Each poll waits out the configured interval
    /// first, giving the solver time to work before the first result request.
    pub async fn solve(
        &self,
        site_key: &str,
        website_url: &str,
        cancel: &CancellationToken,
    ) -> Result<String> {
        let created = self
            .api
            .create_task(&CreateTaskRequest {
                client_key: self.client_key.clone(),
                task: TaskSpec {
                    task_type: self.task_type.clone(),
                    website_url: website_url.to_string(),
                    website_key: site_key.to_string(),
                },
            })
            .await?;

        if created.error_id != 0 {
            return Err(SolveError::CreateTaskFailed {
                code: created.error_code.unwrap_or_default(),
                description: created.error_description.unwrap_or_default(),
            });
        }

        tracing::info!(task_id = created.task_id, "captcha solve task created");

        let request = TaskResultRequest {
            client_key: self.client_key.clone(),
            task_id: created.task_id,
        };

        loop {
            tokio::select! {
                biased;
                () = cancel.cancelled() => return Err(SolveError::Cancelled),
                () = tokio::time::sleep(self.poll_interval) => {}
            }

            let raw = self.api.task_result(&request).await?;
            match TaskPoll::classify(raw)? {
                TaskPoll::Processing => {
                    tracing::debug!(task_id = created.task_id, "captcha solve still processing");
                }
                TaskPoll::Ready { token } => {
                    tracing::info!(task_id = created.task_id, "captcha solved");
                    return Ok(token);
                }
                TaskPoll::Failed { code, description } => {
                    return Err(SolveError::TaskFailed { code, description });
                }
            }
        }
    }
}
