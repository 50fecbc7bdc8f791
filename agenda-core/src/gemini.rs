//! Gemini `generateContent` client.
//!
//! A plain text-in/text-out collaborator. Callers that must never fail
//! (insight line, chat) wrap it with their own fallback text.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::chat::{ChatMessage, ChatRole};
use crate::config::AgendaConfig;
use crate::error::{AgendaError, AgendaResult};

pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'static str>,
    parts: Vec<RequestPart<'a>>,
}

impl<'a> Content<'a> {
    fn text(role: Option<&'static str>, text: &'a str) -> Self {
        Content {
            role,
            parts: vec![RequestPart { text }],
        }
    }
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

impl GenerateResponse {
    /// Text of the first candidate, parts concatenated.
    fn into_text(self) -> Option<String> {
        let content = self.candidates.into_iter().next()?.content?;
        let text: String = content.parts.into_iter().filter_map(|p| p.text).collect();
        let text = text.trim();
        (!text.is_empty()).then(|| text.to_string())
    }
}

#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>, config: &AgendaConfig) -> AgendaResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.http_timeout_secs))
            .build()?;

        Ok(GeminiClient {
            http,
            base_url: config.gemini_base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            model: config.gemini_model.clone(),
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Single prompt, optional system instruction.
    pub async fn generate(
        &self,
        prompt: &str,
        system_instruction: Option<&str>,
    ) -> AgendaResult<String> {
        let request = GenerateRequest {
            contents: vec![Content::text(Some("user"), prompt)],
            system_instruction: system_instruction.map(|s| Content::text(None, s)),
        };
        self.generate_content(&request).await
    }

    /// Continue a conversation: `history` holds the earlier turns, `message`
    /// is the new user turn.
    pub async fn chat(
        &self,
        system_instruction: Option<&str>,
        history: &[ChatMessage],
        message: &str,
    ) -> AgendaResult<String> {
        let mut contents: Vec<Content> = history
            .iter()
            .map(|m| Content::text(Some(role_name(m.role)), &m.text))
            .collect();
        contents.push(Content::text(Some("user"), message));

        let request = GenerateRequest {
            contents,
            system_instruction: system_instruction.map(|s| Content::text(None, s)),
        };
        self.generate_content(&request).await
    }

    async fn generate_content(&self, request: &GenerateRequest<'_>) -> AgendaResult<String> {
        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);
        debug!(model = %self.model, turns = request.contents.len(), "Calling Gemini");

        let response = self
            .http
            .post(url)
            .header("x-goog-api-key", &self.api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AgendaError::GeminiStatus {
                status: status.as_u16(),
                body,
            });
        }

        let body: GenerateResponse = response.json().await?;
        body.into_text().ok_or(AgendaError::EmptyResponse)
    }
}

fn role_name(role: ChatRole) -> &'static str {
    match role {
        ChatRole::User => "user",
        ChatRole::Model => "model",
    }
}
