//! Chat transcript and the assistant conversation loop.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use crate::gemini::GeminiClient;

pub const CHAT_GREETING: &str = "Olá! Sou seu assistente virtual da Crescer. Como posso ajudar com a agenda ou dúvidas espirituais hoje?";

pub const CHAT_FALLBACK: &str = "Não foi possível conectar. Tente novamente.";

pub const CHAT_SYSTEM_INSTRUCTION: &str = "You are a warm, welcoming, and knowledgeable assistant for Igreja Batista Crescer. You help members find events in the agenda and answer spiritual questions.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Model,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub role: ChatRole,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    pub fn new(role: ChatRole, text: impl Into<String>) -> Self {
        ChatMessage {
            id: Uuid::new_v4().to_string(),
            role,
            text: text.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Outcome of sending one user message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatReply {
    /// The model answered; the answer is in the transcript.
    Answer(String),
    /// The call failed; show this notice. Nothing was added for the model.
    Fallback(&'static str),
    /// Blank input, nothing sent.
    Ignored,
}

/// An in-memory conversation, seeded with the assistant's greeting.
#[derive(Debug, Clone)]
pub struct ChatSession {
    messages: Vec<ChatMessage>,
    system_instruction: String,
}

impl Default for ChatSession {
    fn default() -> Self {
        ChatSession::new()
    }
}

impl ChatSession {
    pub fn new() -> Self {
        ChatSession {
            messages: vec![ChatMessage::new(ChatRole::Model, CHAT_GREETING)],
            system_instruction: CHAT_SYSTEM_INSTRUCTION.to_string(),
        }
    }

    /// Extra context (e.g. the loaded agenda) appended to the system
    /// instruction.
    pub fn with_context(mut self, context: &str) -> Self {
        if !context.trim().is_empty() {
            self.system_instruction.push_str("\n\n");
            self.system_instruction.push_str(context.trim());
        }
        self
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Send `text`. The user turn is recorded before the call; earlier
    /// turns go along as history.
    pub async fn send(&mut self, client: &GeminiClient, text: &str) -> ChatReply {
        let text = text.trim();
        if text.is_empty() {
            return ChatReply::Ignored;
        }

        let history_len = self.messages.len();
        self.messages.push(ChatMessage::new(ChatRole::User, text));

        let result = client
            .chat(
                Some(self.system_instruction.as_str()),
                &self.messages[..history_len],
                text,
            )
            .await;

        match result {
            Ok(answer) => {
                self.messages
                    .push(ChatMessage::new(ChatRole::Model, answer.clone()));
                ChatReply::Answer(answer)
            }
            Err(e) => {
                warn!(error = %e, "Chat request failed");
                ChatReply::Fallback(CHAT_FALLBACK)
            }
        }
    }
}
