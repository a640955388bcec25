use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::ExecutorConfig;

pub const DEFAULT_URL: &str = "https://emkc.org/api/v2/piston/execute";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Serialize, Deserialize, Debug, Default, PartialEq, Eq)]
pub struct ExecutionResult {
    pub output: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ExecutionResult {
    fn failed(message: String) -> Self {
        Self {
            output: String::new(),
            error: Some(message),
        }
    }
}

/// Pass-through client for the remote execution service. No retry policy:
/// a failed call is reported through the `error` field, never raised past
/// this boundary.
#[derive(Clone)]
pub struct ExecutorClient {
    client: reqwest::Client,
    url: String,
    timeout: Duration,
}

impl ExecutorClient {
    pub fn new(url: String, timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            url,
            timeout,
        }
    }

    pub fn from_config(config: &ExecutorConfig) -> Self {
        Self::new(
            config.url.clone().unwrap_or_else(|| DEFAULT_URL.to_string()),
            Duration::from_secs(config.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)),
        )
    }

    /// Submit source and stdin for execution, returning captured
    /// stdout/stderr
    pub async fn run(&self, language: &str, source: &str, stdin: &str) -> ExecutionResult {
        let payload = serde_json::json!({
            "language": language,
            "version": "*",
            "files": [{"content": source}],
            "stdin": stdin,
        });

        let response = self
            .client
            .post(&self.url)
            .json(&payload)
            .timeout(self.timeout)
            .send()
            .await;

        let response = match response {
            Ok(response) => response,
            Err(e) => {
                log::warn!("execution request failed: {e}");
                return ExecutionResult::failed(format!("Execution failed: {e}"));
            }
        };

        if !response.status().is_success() {
            let status = response.status();
            log::warn!("execution service returned {status}");
            return ExecutionResult::failed(format!("Execution failed: {status}"));
        }

        let body: Value = match response.json().await {
            Ok(body) => body,
            Err(e) => {
                log::warn!("execution service returned malformed body: {e}");
                return ExecutionResult::failed(format!("Execution failed: {e}"));
            }
        };

        let run = body.get("run");
        let stdout = run
            .and_then(|r| r.get("stdout"))
            .and_then(Value::as_str)
            .unwrap_or("");
        let stderr = run
            .and_then(|r| r.get("stderr"))
            .and_then(Value::as_str)
            .unwrap_or("");

        ExecutionResult {
            output: stdout.to_string(),
            error: if stderr.is_empty() {
                None
            } else {
                Some(stderr.to_string())
            },
        }
    }
}
