//! HTTP client for the answer service: question submission and health check.

use crate::messages::{AnswerResponse, QuestionRequest};

/// HTTP client bound to one service base URL. The base URL is runtime
/// configuration (see `config`), never a compiled-in constant.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Submit one question: POST {base}/process-question with a JSON body.
    /// Non-success statuses and bodies that do not decode as
    /// `AnswerResponse` are errors.
    pub async fn ask(&self, question: &str) -> Result<AnswerResponse, ApiError> {
        let url = format!("{}/process-question", self.base_url);
        let response = self
            .http
            .post(&url)
            .json(&QuestionRequest { question })
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json::<AnswerResponse>().await?)
    }

    /// Probe GET {base}/health-check. True iff a response with a success
    /// status arrived; transport failures and error statuses both read as
    /// offline.
    pub async fn health_check(&self) -> bool {
        let url = format!("{}/health-check", self.base_url);
        match self.http.get(&url).send().await {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }
}

/// Request error. The controller treats every variant the same; the split
/// exists for diagnostics.
#[derive(Debug)]
pub enum ApiError {
    /// DNS, connection, or timeout failure before a status was received.
    Transport(String),
    /// Response arrived with a non-success status.
    Status(u16),
    /// Response body did not decode as the expected shape.
    Decode(String),
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Transport(s) => write!(f, "transport error: {}", s),
            ApiError::Status(code) => write!(f, "server returned status {}", code),
            ApiError::Decode(s) => write!(f, "unexpected response shape: {}", s),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if let Some(status) = e.status() {
            ApiError::Status(status.as_u16())
        } else if e.is_decode() {
            ApiError::Decode(e.to_string())
        } else {
            ApiError::Transport(e.to_string())
        }
    }
}
