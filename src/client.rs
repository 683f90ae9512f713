use crate::config::Config;
use crate::error::AskError;
use serde::Serialize;
use serde_json::Value;
use std::future::Future;
use std::time::Instant;
use tracing::{debug, warn};

/// Bot text used when the backend answers without a usable `answer`
pub const NO_RESPONSE: &str = "No response";

/// Body of `POST /ask`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AskRequest {
    pub question: String,
}

/// Parsed reply from `/ask`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AskResponse {
    /// The usable answer, if the body carried one
    pub answer: Option<String>,
}

impl AskResponse {
    pub fn new(answer: impl Into<String>) -> Self {
        Self {
            answer: Some(answer.into()),
        }
    }

    /// A reply with no usable answer
    pub fn empty() -> Self {
        Self { answer: None }
    }

    /// Parse a response body. Only bodies that are not JSON at all fail;
    /// any JSON shape is accepted and simply may lack an answer.
    pub fn from_body(body: &[u8]) -> Result<Self, AskError> {
        let value: Value = serde_json::from_slice(body)?;
        Ok(Self {
            answer: Self::extract_answer(&value),
        })
    }

    fn extract_answer(value: &Value) -> Option<String> {
        match value.get("answer")? {
            Value::String(text) if !text.is_empty() => Some(text.clone()),
            Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
            Value::Bool(true) => Some("true".to_string()),
            _ => None,
        }
    }

    /// Text for the bot message
    pub fn answer_text(&self) -> &str {
        self.answer.as_deref().unwrap_or(NO_RESPONSE)
    }
}

/// Anything that can answer a question. Implemented by [`AskClient`] for
/// the real backend and by simulated backends in tests.
pub trait AskBackend: Send + Sync {
    fn ask(&self, question: &str) -> impl Future<Output = Result<AskResponse, AskError>> + Send;
}

/// HTTP client for the `/ask` endpoint
#[derive(Clone)]
pub struct AskClient {
    ask_url: String,
    client: reqwest::Client,
}

impl AskClient {
    pub fn new(config: &Config) -> Result<Self, AskError> {
        let ask_url = config.ask_url();
        reqwest::Url::parse(&ask_url)
            .map_err(|e| AskError::InvalidBaseUrl(format!("{}: {}", config.base_url, e)))?;

        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()?;

        Ok(Self { ask_url, client })
    }

    pub fn ask_url(&self) -> &str {
        &self.ask_url
    }
}

impl AskBackend for AskClient {
    async fn ask(&self, question: &str) -> Result<AskResponse, AskError> {
        let started = Instant::now();
        debug!(url = %self.ask_url, question_len = question.len(), "sending question");

        let payload = AskRequest {
            question: question.to_string(),
        };

        let response = self
            .client
            .post(&self.ask_url)
            .header("Content-Type", "application/json")
            .json(&payload)
            .send()
            .await?;

        // The body decides the outcome, not the status code.
        let status = response.status();
        if !status.is_success() {
            warn!(%status, "backend returned a non-success status");
        }

        let body = response.bytes().await?;
        let parsed = AskResponse::from_body(&body);

        debug!(
            %status,
            elapsed_ms = started.elapsed().as_millis() as u64,
            ok = parsed.is_ok(),
            "question answered"
        );

        parsed
    }
}
