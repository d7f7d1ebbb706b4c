//! Polling-loop behavior against scripted solver transports.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use terminwatch_solver::{
    CreateTaskRequest, CreatedTask, RawTaskResult, Solution, SolveError, SolverApi, SolverClient,
    TaskResultRequest,
};
use tokio_util::sync::CancellationToken;

/// Scripted transport serving a fixed sequence of poll responses.
struct ScriptedApi {
    responses: Arc<Mutex<VecDeque<RawTaskResult>>>,
}

#[async_trait]
impl SolverApi for ScriptedApi {
    async fn create_task(
        &self,
        _request: &CreateTaskRequest,
    ) -> terminwatch_solver::Result<CreatedTask> {
        Ok(CreatedTask {
            error_id: 0,
            task_id: 42,
            error_code: None,
            error_description: None,
        })
    }

    async fn task_result(
        &self,
        _request: &TaskResultRequest,
    ) -> terminwatch_solver::Result<RawTaskResult> {
        Ok(self
            .responses
            .lock()
            .expect("lock script")
            .pop_front()
            .expect("poll script exhausted"))
    }
}

/// Transport whose create-task call is rejected by the service.
struct RejectingApi;

#[async_trait]
impl SolverApi for RejectingApi {
    async fn create_task(
        &self,
        _request: &CreateTaskRequest,
    ) -> terminwatch_solver::Result<CreatedTask> {
        Ok(CreatedTask {
            error_id: 1,
            task_id: 0,
            error_code: Some("ERROR_KEY_DOES_NOT_EXIST".to_string()),
            error_description: Some("unknown client key".to_string()),
        })
    }

    async fn task_result(
        &self,
        _request: &TaskResultRequest,
    ) -> terminwatch_solver::Result<RawTaskResult> {
        panic!("no task should be polled after a rejected create");
    }
}

fn processing() -> RawTaskResult {
    RawTaskResult {
        error_id: 0,
        status: Some("processing".to_string()),
        solution: None,
        error_code: None,
        error_description: None,
    }
}

fn ready(token: &str) -> RawTaskResult {
    RawTaskResult {
        error_id: 0,
        status: Some("ready".to_string()),
        solution: Some(Solution {
            token: token.to_string(),
        }),
        error_code: None,
        error_description: None,
    }
}

fn failed(code: &str, description: &str) -> RawTaskResult {
    RawTaskResult {
        error_id: 33,
        status: None,
        solution: None,
        error_code: Some(code.to_string()),
        error_description: Some(description.to_string()),
    }
}

fn scripted_client(
    responses: Vec<RawTaskResult>,
) -> (SolverClient, Arc<Mutex<VecDeque<RawTaskResult>>>) {
    let script = Arc::new(Mutex::new(VecDeque::from(responses)));
    let client = SolverClient::with_api(
        Box::new(ScriptedApi {
            responses: Arc::clone(&script),
        }),
        "test-key",
        "FriendlyCaptchaTaskProxyless",
        Duration::from_millis(1),
    );
    (client, script)
}

#[tokio::test]
async fn solve_consumes_processing_responses_before_success() {
    let (client, script) =
        scripted_client(vec![processing(), processing(), ready("solved-token")]);

    let token = client
        .solve("SITEKEY", "https://example.com/termin/?cts=1", &CancellationToken::new())
        .await
        .expect("solve should succeed");

    assert_eq!(token, "solved-token");
    assert!(script.lock().expect("lock script").is_empty());
}

#[tokio::test]
async fn solve_stops_polling_on_terminal_error() {
    let (client, script) = scripted_client(vec![
        failed("ERROR_CAPTCHA_UNSOLVABLE", "workers gave up"),
        ready("never-reached"),
    ]);

    let err = client
        .solve("SITEKEY", "https://example.com/termin/?cts=1", &CancellationToken::new())
        .await
        .expect_err("solve should fail");

    assert!(matches!(err, SolveError::TaskFailed { .. }));
    // The ready response after the error must never be consumed
    assert_eq!(script.lock().expect("lock script").len(), 1);
}

#[tokio::test]
async fn solve_exits_on_cancellation_without_polling() {
    let (client, script) = scripted_client(vec![ready("never-reached")]);

    let cancel = CancellationToken::new();
    cancel.cancel();

    let err = client
        .solve("SITEKEY", "https://example.com/termin/?cts=1", &cancel)
        .await
        .expect_err("solve should be cancelled");

    assert!(matches!(err, SolveError::Cancelled));
    assert_eq!(script.lock().expect("lock script").len(), 1);
}

#[tokio::test]
async fn solve_surfaces_create_task_rejection() {
    let client = SolverClient::with_api(
        Box::new(RejectingApi),
        "bad-key",
        "FriendlyCaptchaTaskProxyless",
        Duration::from_millis(1),
    );

    let err = client
        .solve("SITEKEY", "https://example.com/termin/?cts=1", &CancellationToken::new())
        .await
        .expect_err("create rejection should fail the solve");

    match err {
        SolveError::CreateTaskFailed { code, .. } => {
            assert_eq!(code, "ERROR_KEY_DOES_NOT_EXIST");
        }
        other => panic!("unexpected error: {other}"),
    }
}
