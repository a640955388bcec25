use std::time::Duration;

use serde_json::Value;
use thiserror::Error;

use crate::config::AiConfig;

/// Candidate backend models, primary first
pub const DEFAULT_MODELS: &[&str] = &["gemini-1.5-flash", "gemini-1.5-flash-8b", "gemini-pro"];
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
/// Extra attempts per model after the first (i.e. at most 2 calls per model)
pub const DEFAULT_RETRIES: u32 = 1;
/// Enforced per attempt, never cumulatively across fallback attempts
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

#[derive(Debug, Error)]
pub enum AiError {
    #[error("GEMINI_API_KEY not set in environment variables")]
    MissingApiKey,
    #[error("every candidate model exhausted its attempts")]
    BackendUnavailable,
}

/// Client for the generateContent REST API with ordered multi-model fallback
/// and a bounded per-model attempt budget.
#[derive(Clone)]
pub struct AiClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    models: Vec<String>,
    retries: u32,
    timeout: Duration,
}

impl AiClient {
    pub fn new(
        api_key: String,
        base_url: String,
        models: Vec<String>,
        retries: u32,
        timeout: Duration,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            base_url,
            models,
            retries,
            timeout,
        }
    }

    /// Build a client from configuration, reading the backend credential
    /// from the environment. Fails fast before any network attempt.
    pub fn from_config(config: &AiConfig) -> Result<Self, AiError> {
        let api_key = std::env::var(API_KEY_ENV)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or(AiError::MissingApiKey)?;

        Ok(Self::new(
            api_key,
            config
                .base_url
                .clone()
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            config.models.clone().unwrap_or_else(|| {
                DEFAULT_MODELS.iter().map(|m| m.to_string()).collect()
            }),
            config.retries.unwrap_or(DEFAULT_RETRIES),
            Duration::from_secs(config.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)),
        ))
    }

    /// The configured model identifiers, in fallback order
    pub fn models(&self) -> &[String] {
        &self.models
    }

    /// Dispatch a prompt: try each candidate model in order, up to
    /// `retries + 1` calls per model, short-circuiting on the first
    /// non-empty reply. Returns `BackendUnavailable` only once every model
    /// has exhausted its budget.
    pub async fn generate(&self, prompt: &str) -> Result<String, AiError> {
        for model in &self.models {
            if let Some(text) = self.try_model(model, prompt).await {
                return Ok(text);
            }
            log::warn!("model {model} exhausted its attempts, advancing to next candidate");
        }

        log::error!("all candidate models exhausted, giving up");
        Err(AiError::BackendUnavailable)
    }

    /// Bounded-attempt policy for a single model: up to `retries + 1` calls,
    /// `None` once the budget is spent
    async fn try_model(&self, model: &str, prompt: &str) -> Option<String> {
        let attempts = self.retries + 1;
        for attempt in 1..=attempts {
            match self.attempt(model, prompt).await {
                Ok(text) => {
                    log::info!("model {model} answered on attempt {attempt}");
                    return Some(text);
                }
                Err(cause) => {
                    log::warn!("model {model} attempt {attempt}/{attempts} failed: {cause}");
                }
            }
        }
        None
    }

    /// One call to one model. Any transport error, non-success status,
    /// error object in the body, or empty-after-trim content fails the
    /// attempt.
    async fn attempt(&self, model: &str, prompt: &str) -> anyhow::Result<String> {
        let url = format!("{}/v1beta/models/{}:generateContent", self.base_url, model);
        let payload = serde_json::json!({
            "contents": [{"parts": [{"text": prompt}]}],
        });

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&payload)
            .timeout(self.timeout)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("backend returned {status}: {body}");
        }

        let body: Value = response.json().await?;
        if let Some(error) = body.get("error") {
            anyhow::bail!("backend signaled an error: {error}");
        }

        let text = body
            .get("candidates")
            .and_then(|c| c.get(0))
            .and_then(|c| c.get("content"))
            .and_then(|c| c.get("parts"))
            .and_then(|p| p.get(0))
            .and_then(|p| p.get("text"))
            .and_then(|t| t.as_str())
            .unwrap_or("")
            .trim();

        if text.is_empty() {
            anyhow::bail!("message content was empty");
        }

        Ok(text.to_string())
    }
}
