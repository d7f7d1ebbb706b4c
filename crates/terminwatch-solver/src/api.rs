//! Solver service wire protocol.
//!
//! The service exposes two JSON endpoints: create-task, which registers a
//! solve job and returns its id, and get-task-result, which reports one of
//! three states per poll. The raw result is classified into the [`TaskPoll`]
//! sum type so the polling loop matches exhaustively instead of probing
//! fields at runtime.

use crate::error::{Result, SolveError};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Create-task request payload.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    /// Account key for the solver service
    pub client_key: String,
    /// Description of the challenge to solve
    pub task: TaskSpec,
}

/// Challenge description submitted with a create-task request.
#[derive(Debug, Clone, Serialize)]
pub struct TaskSpec {
    /// Solver-side task type, e.g. `FriendlyCaptchaTaskProxyless`
    #[serde(rename = "type")]
    pub task_type: String,
    /// Page the challenge is embedded on
    #[serde(rename = "websiteURL")]
    pub website_url: String,
    /// Public site key of the challenge instance
    #[serde(rename = "websiteKey")]
    pub website_key: String,
}

/// Create-task response.
///
/// `error_code`/`error_description` are only populated when `error_id` is
/// non-zero.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedTask {
    /// Zero on success
    pub error_id: i64,
    /// Opaque id for subsequent result polls
    #[serde(default)]
    pub task_id: i64,
    /// Service error code on failure
    #[serde(default)]
    pub error_code: Option<String>,
    /// Human-readable error description on failure
    #[serde(default)]
    pub error_description: Option<String>,
}

/// Get-task-result request payload.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskResultRequest {
    /// Account key for the solver service
    pub client_key: String,
    /// Task id returned by create-task
    pub task_id: i64,
}

/// Raw get-task-result response before classification.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTaskResult {
    /// Zero unless the task failed terminally
    pub error_id: i64,
    /// `"processing"` or `"ready"` when `error_id` is zero
    #[serde(default)]
    pub status: Option<String>,
    /// Present once `status` is `"ready"`
    #[serde(default)]
    pub solution: Option<Solution>,
    /// Service error code when `error_id` is non-zero
    #[serde(default)]
    pub error_code: Option<String>,
    /// Human-readable error description when `error_id` is non-zero
    #[serde(default)]
    pub error_description: Option<String>,
}

/// Solved-challenge payload.
#[derive(Debug, Clone, Deserialize)]
pub struct Solution {
    /// Solution token to replay into the gated form
    pub token: String,
}

/// One poll response, discriminated by the errorId/status pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskPoll {
    /// Solver is still working on the task
    Processing,
    /// Solution is ready
    Ready {
        /// The solution token
        token: String,
    },
    /// Terminal solver-side failure
    Failed {
        /// Service error code
        code: String,
        /// Human-readable description
        description: String,
    },
}

impl TaskPoll {
    /// Classify a raw response into one of the three variants.
    ///
    /// A non-zero `errorId` wins over any `status` value; a zero `errorId`
    /// with an unknown status is a protocol change and rejected outright.
    pub fn classify(raw: RawTaskResult) -> Result<Self> {
        if raw.error_id != 0 {
            return Ok(Self::Failed {
                code: raw.error_code.unwrap_or_default(),
                description: raw.error_description.unwrap_or_default(),
            });
        }

        match raw.status.as_deref() {
            Some("ready") => {
                let token = raw.solution.map(|solution| solution.token).ok_or_else(|| {
                    SolveError::UnrecognizedResponse {
                        detail: "status is 'ready' but no solution token present".to_string(),
                    }
                })?;
                Ok(Self::Ready { token })
            }
            Some("processing") => Ok(Self::Processing),
            other => Err(SolveError::UnrecognizedResponse {
                detail: format!("unknown status {other:?} with errorId 0"),
            }),
        }
    }
}

/// Transport seam for the solver service, pluggable for tests.
#[async_trait]
pub trait SolverApi: Send + Sync {
    /// Submit a create-task request.
    async fn create_task(&self, request: &CreateTaskRequest) -> Result<CreatedTask>;

    /// Fetch the current result for a task.
    async fn task_result(&self, request: &TaskResultRequest) -> Result<RawTaskResult>;
}

/// HTTP implementation over the solver's JSON endpoints.
pub struct HttpSolverApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpSolverApi {
    /// Create an HTTP transport against the given API base URL.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        let base_url = base_url.into();

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn post_json<Req, Resp>(&self, path: &str, request: &Req) -> Result<Resp>
    where
        Req: Serialize + Sync,
        Resp: DeserializeOwned,
    {
        let response = self
            .client
            .post(format!("{}{path}", self.base_url))
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SolveError::ApiStatus {
                status: status.as_u16(),
            });
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl SolverApi for HttpSolverApi {
    async fn create_task(&self, request: &CreateTaskRequest) -> Result<CreatedTask> {
        self.post_json("/createTask", request).await
    }

    async fn task_result(&self, request: &TaskResultRequest) -> Result<RawTaskResult> {
        self.post_json("/getTaskResult", request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_task_request_wire_format() {
        let request = CreateTaskRequest {
            client_key: "key".to_string(),
            task: TaskSpec {
                task_type: "FriendlyCaptchaTaskProxyless".to_string(),
                website_url: "https://example.com/termin/?cts=1".to_string(),
                website_key: "SITEKEY".to_string(),
            },
        };

        let value = serde_json::to_value(&request).expect("serialize request");
        assert_eq!(value["clientKey"], "key");
        assert_eq!(value["task"]["type"], "FriendlyCaptchaTaskProxyless");
        assert_eq!(value["task"]["websiteURL"], "https://example.com/termin/?cts=1");
        assert_eq!(value["task"]["websiteKey"], "SITEKEY");
    }

    #[test]
    fn test_classify_processing() {
        let raw: RawTaskResult =
            serde_json::from_str(r#"{"errorId":0,"status":"processing"}"#).expect("parse raw");
        assert_eq!(TaskPoll::classify(raw).expect("classify"), TaskPoll::Processing);
    }

    #[test]
    fn test_classify_ready() {
        let raw: RawTaskResult = serde_json::from_str(
            r#"{"errorId":0,"status":"ready","solution":{"token":"solved-token"},"cost":"0.002"}"#,
        )
        .expect("parse raw");

        assert_eq!(
            TaskPoll::classify(raw).expect("classify"),
            TaskPoll::Ready {
                token: "solved-token".to_string()
            }
        );
    }

    #[test]
    fn test_classify_error_wins_over_status() {
        let raw: RawTaskResult = serde_json::from_str(
            r#"{"errorId":12,"status":"ready","errorCode":"ERROR_CAPTCHA_UNSOLVABLE","errorDescription":"unsolvable"}"#,
        )
        .expect("parse raw");

        assert_eq!(
            TaskPoll::classify(raw).expect("classify"),
            TaskPoll::Failed {
                code: "ERROR_CAPTCHA_UNSOLVABLE".to_string(),
                description: "unsolvable".to_string(),
            }
        );
    }

    #[test]
    fn test_classify_unknown_status_rejected() {
        let raw: RawTaskResult =
            serde_json::from_str(r#"{"errorId":0,"status":"paused"}"#).expect("parse raw");
        let err = TaskPoll::classify(raw).expect_err("unknown status should be rejected");
        assert!(matches!(err, SolveError::UnrecognizedResponse { .. }));
    }

    #[test]
    fn test_classify_ready_without_solution_rejected() {
        let raw: RawTaskResult =
            serde_json::from_str(r#"{"errorId":0,"status":"ready"}"#).expect("parse raw");
        let err = TaskPoll::classify(raw).expect_err("ready without token should be rejected");
        assert!(matches!(err, SolveError::UnrecognizedResponse { .. }));
    }
}
