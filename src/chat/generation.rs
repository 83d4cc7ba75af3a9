/**
 * External Text-Generation Client
 *
 * This module calls the generation provider's `generateContent` endpoint
 * with the full prior-turn history plus the new message, and extracts the
 * generated reply text.
 *
 * # Configuration
 *
 * The API key comes from `GEMINI_API_KEY`; the model from `GEMINI_MODEL`
 * and the endpoint base URL from `GEMINI_API_URL`. An absent key leaves the
 * client unconfigured, which surfaces as a server error on use. The base
 * URL is overridable so tests can point the client at a mock server.
 *
 * # Failure Modes
 *
 * No retries and no timeout: a slow or hung provider blocks the request.
 */

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::chat::memory::Turn;

/// Endpoint used when `GEMINI_API_URL` is absent
pub const DEFAULT_GENERATION_URL: &str = "https://generativelanguage.googleapis.com";

/// Model used when `GEMINI_MODEL` is absent
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Why no reply was generated
#[derive(Debug, Error)]
pub enum GenerationError {
    /// No API key is configured
    #[error("no generation API key is configured")]
    NotConfigured,
    /// The provider was unreachable or rejected the request
    #[error("{0}")]
    Provider(String),
    /// The provider answered but the response carried no text
    #[error("provider returned an empty reply")]
    EmptyReply,
}

/// Client for the external generation service
#[derive(Clone)]
pub struct GenerationClient {
    api_key: Option<String>,
    base_url: String,
    model: String,
    http: reqwest::Client,
}

#[derive(Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Serialize)]
struct Content {
    role: &'static str,
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ReplyPart>,
}

#[derive(Deserialize)]
struct ReplyPart {
    text: String,
}

impl From<&Turn> for Content {
    fn from(turn: &Turn) -> Self {
        Content {
            role: turn.role.as_str(),
            parts: vec![Part {
                text: turn.text.clone(),
            }],
        }
    }
}

impl GenerationClient {
    /// Create a generation client
    ///
    /// `api_key` of `None` leaves the client unconfigured.
    pub fn new(
        api_key: Option<String>,
        base_url: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            api_key,
            base_url,
            model: model.into(),
            http: reqwest::Client::new(),
        }
    }

    /// Load generation configuration from the environment
    pub fn from_env() -> Self {
        let api_key = std::env::var("GEMINI_API_KEY").ok();
        match &api_key {
            Some(_) => tracing::info!("Generation service configured"),
            None => tracing::warn!("GEMINI_API_KEY not set, chat replies will fail"),
        }

        let base_url = std::env::var("GEMINI_API_URL")
            .unwrap_or_else(|_| DEFAULT_GENERATION_URL.to_string());
        let model = std::env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        Self::new(api_key, base_url, model)
    }

    /// Whether an API key is configured
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Generate a reply to `message` given the prior turn history
    pub async fn generate(
        &self,
        history: &[Turn],
        message: &str,
    ) -> Result<String, GenerationError> {
        let Some(api_key) = &self.api_key else {
            return Err(GenerationError::NotConfigured);
        };

        let mut contents: Vec<Content> = history.iter().map(Content::from).collect();
        contents.push(Content {
            role: "user",
            parts: vec![Part {
                text: message.to_string(),
            }],
        });

        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url, self.model, api_key
        );

        let response = self
            .http
            .post(&url)
            .json(&GenerateRequest { contents })
            .send()
            .await
            .map_err(|e| GenerationError::Provider(format!("provider unreachable: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let detail = response.text().await.unwrap_or_default();
            return Err(GenerationError::Provider(format!(
                "provider returned {}: {}",
                status, detail
            )));
        }

        let reply: GenerateResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::Provider(format!("malformed provider response: {}", e)))?;

        reply
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content.parts.into_iter().next())
            .map(|part| part.text)
            .filter(|text| !text.is_empty())
            .ok_or(GenerationError::EmptyReply)
    }
}
