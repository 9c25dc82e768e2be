use async_trait::async_trait;
use reqwest::Client;

use crate::error::{AssistantError, Result};
use crate::models::{Content, GenerateRequest, GenerateResponse, GenerationConfig, Part};

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Outbound call to the generative-model provider. One production
/// implementation; tests substitute their own.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    /// Issue exactly one generation call and return the raw model text.
    async fn generate(&self, prompt: &str, generation: GenerationConfig) -> Result<String>;
}

pub struct GeminiTransport {
    client: Client,
    api_key: String,
    model: String,
}

impl GeminiTransport {
    pub fn new(api_key: String, model: String) -> Result<Self> {
        Ok(Self {
            client: Client::new(),
            api_key,
            model,
        })
    }
}

#[async_trait]
impl Transport for GeminiTransport {
    async fn generate(&self, prompt: &str, generation: GenerationConfig) -> Result<String> {
        // A missing credential is a per-request failure; the service
        // must keep starting and answering probes without it.
        if self.api_key.trim().is_empty() {
            return Err(AssistantError::Configuration(
                "GEMINI_API_KEY is not configured".to_string(),
            ));
        }

        let url = format!("{GEMINI_API_BASE}/{}:generateContent", self.model);
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: generation,
        };

        // Exactly one attempt per user turn. Retrying here would mean
        // duplicate billable calls and duplicate answers; resubmission
        // is the caller's decision.
        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AssistantError::Provider(format!(
                "Gemini API error (status {status}): {body}"
            )));
        }

        let parsed: GenerateResponse = response.json().await.map_err(|e| {
            AssistantError::Internal(format!("Failed to parse Gemini API response: {e}"))
        })?;

        if let Some(reason) = parsed
            .prompt_feedback
            .as_ref()
            .and_then(|f| f.block_reason.clone())
        {
            return Err(AssistantError::PolicyBlocked(reason));
        }

        match parsed.text() {
            Some(text) => Ok(text),
            // No candidates and no block reason: anomalous provider
            // behavior, surfaced like an empty answer.
            None => Err(AssistantError::EmptyResponse),
        }
    }
}
