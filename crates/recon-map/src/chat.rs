//! Chat-completions adapter for the matching oracle.
//!
//! One request per call, no retries, no caching. The reply is plain text
//! and is parsed with [`extract_mapped_value`].

use std::time::Duration;

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use recon_model::redact::redact_value;

use crate::oracle::{MatchKind, MatchingOracle, OracleError};
use crate::reply::{extract_mapped_value, render_candidates};

/// Default chat-completions endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";

/// Default model name.
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default sampling temperature.
pub const DEFAULT_TEMPERATURE: f32 = 0.5;

/// Connection and sampling settings for [`ChatOracle`].
#[derive(Debug, Clone)]
pub struct OracleConfig {
    /// Full URL of the chat-completions endpoint.
    pub endpoint: String,
    /// Model name sent with each request.
    pub model: String,
    /// Bearer credential. Required by [`ChatOracle::new`].
    pub api_key: Option<String>,
    /// Per-request timeout; expiry counts as a failed call.
    pub timeout: Duration,
    pub temperature: f32,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key: None,
            timeout: DEFAULT_TIMEOUT,
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

impl OracleConfig {
    #[must_use]
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage; 2],
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    #[serde(default)]
    content: Option<String>,
}

fn system_prompt(kind: MatchKind) -> &'static str {
    match kind {
        MatchKind::DrugName => "You are a helpful assistant that maps drug names.",
        MatchKind::HcpId => {
            "You are a helpful assistant that finds and corrects the closest 5-digit HCP IDs."
        }
    }
}

fn user_prompt(kind: MatchKind, query: &str, candidates: &[String]) -> String {
    let list = render_candidates(candidates);
    match kind {
        MatchKind::DrugName => format!(
            "Map the drug name '{query}' to the most similar one from the following list: {list}"
        ),
        MatchKind::HcpId => format!(
            "Map the HCP ID '{query}' to the closest valid 5-digit HCP ID from the list: {list}."
        ),
    }
}

fn max_tokens(kind: MatchKind) -> u32 {
    match kind {
        MatchKind::DrugName => 100,
        MatchKind::HcpId => 150,
    }
}

/// Oracle backed by a chat-completions HTTP service.
pub struct ChatOracle {
    client: Client,
    config: OracleConfig,
    api_key: String,
}

impl ChatOracle {
    /// Creates a client. Fails when no credential is configured.
    pub fn new(config: OracleConfig) -> Result<Self, OracleError> {
        let api_key = config
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .ok_or(OracleError::MissingCredential)?;
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            config,
            api_key,
        })
    }

    pub fn config(&self) -> &OracleConfig {
        &self.config
    }

    fn request_body<'a>(
        &'a self,
        kind: MatchKind,
        query: &str,
        candidates: &[String],
    ) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.config.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: system_prompt(kind).to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: user_prompt(kind, query, candidates),
                },
            ],
            max_tokens: max_tokens(kind),
            temperature: self.config.temperature,
        }
    }

    /// Sends one request and returns the trimmed reply text.
    fn complete(
        &self,
        kind: MatchKind,
        query: &str,
        candidates: &[String],
    ) -> Result<String, OracleError> {
        let body = self.request_body(kind, query, candidates);
        debug!(
            kind = %kind,
            candidates = candidates.len(),
            model = %self.config.model,
            "sending oracle request"
        );
        let response = self
            .client
            .post(&self.config.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()?;

        let status = response.status();
        if status.as_u16() == 429 {
            return Err(OracleError::RateLimited);
        }
        if !status.is_success() {
            let message = response
                .text()
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(OracleError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let text = response.text()?;
        parse_reply_body(&text)
    }
}

/// Pulls the first choice's message content out of a response body.
fn parse_reply_body(body: &str) -> Result<String, OracleError> {
    let parsed: ChatResponse = serde_json::from_str(body)?;
    parsed
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .map(|content| content.trim().to_string())
        .ok_or_else(|| OracleError::MalformedReply("reply has no message content".to_string()))
}

impl MatchingOracle for ChatOracle {
    fn resolve(
        &self,
        kind: MatchKind,
        query: &str,
        candidates: &[String],
    ) -> Result<Option<String>, OracleError> {
        let reply = self.complete(kind, query, candidates)?;
        trace!(kind = %kind, reply = %redact_value(&reply), "oracle reply");
        Ok(extract_mapped_value(&reply))
    }
}
