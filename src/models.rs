use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::language::Language;

/// Role of one message in a conversation, shared by the wire history
/// format and the in-memory conversation log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

/// One prior exchange entry as submitted by the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
}

/// Request body for `POST /api/chat`.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    /// Prior turns, oldest first. Only the trailing window is used.
    #[serde(default)]
    pub history: Vec<ChatMessage>,
}

/// Success body for `POST /api/chat`.
#[derive(Debug, Clone, Serialize)]
pub struct ChatResponse {
    pub response: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    pub timestamp: String,
    #[serde(rename = "detectedLanguage", skip_serializing_if = "Option::is_none")]
    pub detected_language: Option<Language>,
}

/// Failure body, paired with a classified status code.
#[derive(Debug, Clone, Serialize)]
pub struct ChatErrorBody {
    pub error: String,
    pub timestamp: String,
}

/// Body for the `GET /api/chat` status probe.
#[derive(Debug, Clone, Serialize)]
pub struct ChatStatus {
    pub message: String,
    pub status: String,
    #[serde(rename = "supportedLanguages")]
    pub supported_languages: Vec<Language>,
    pub endpoints: ChatEndpoints,
    pub timestamp: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatEndpoints {
    pub chat: String,
    pub health: String,
}

/// Current time in the ISO-8601 form the wire contract uses.
pub fn now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

// --- Gemini generateContent wire types ---

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub contents: Vec<Content>,
    pub generation_config: GenerationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Part {
    pub text: String,
}

/// Generation parameters, tuned for bounded-length educational answers
/// rather than creative variance.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f32,
    pub top_p: f32,
    pub top_k: i32,
    pub max_output_tokens: i32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            top_p: 0.8,
            top_k: 40,
            max_output_tokens: 1024,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    pub prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub content: Option<Content>,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    pub block_reason: Option<String>,
}

impl GenerateResponse {
    /// Concatenated text of the first candidate, if any.
    pub fn text(&self) -> Option<String> {
        let parts = &self.candidates.first()?.content.as_ref()?.parts;
        if parts.is_empty() {
            return None;
        }
        Some(
            parts
                .iter()
                .map(|p| p.text.as_str())
                .collect::<Vec<_>>()
                .join(""),
        )
    }
}

/// Raw provider output, consumed exactly once by the formatter.
#[derive(Debug, Clone)]
pub struct ModelReply {
    pub raw_text: String,
}

impl ModelReply {
    /// Whitespace-only replies count as empty; they must never surface
    /// as a successful blank answer.
    pub fn is_empty(&self) -> bool {
        self.raw_text.trim().is_empty()
    }
}
