use std::sync::Arc;
use std::time::Duration;

use crate::error::{AssistantError, Result};
use crate::models::ModelReply;
use crate::prompt::PromptRequest;
use crate::transport::Transport;

/// Owns the single outbound model call per user turn: races it against
/// a hard wall-clock timeout and rejects empty answers.
pub struct ModelGateway {
    transport: Arc<dyn Transport>,
    timeout: Duration,
}

impl ModelGateway {
    pub fn new(transport: Arc<dyn Transport>, timeout: Duration) -> Self {
        Self { transport, timeout }
    }

    /// Dispatch one prompt. Whichever of the provider call and the
    /// timer settles first wins; on timeout the call future is dropped,
    /// so a late provider completion can never reach a response.
    pub async fn invoke(&self, prompt: &PromptRequest) -> Result<ModelReply> {
        let timeout_ms = self.timeout.as_millis() as u64;
        match tokio::time::timeout(
            self.timeout,
            self.transport.generate(&prompt.prompt, prompt.generation),
        )
        .await
        {
            Err(_elapsed) => {
                tracing::warn!(timeout_ms, "provider call exceeded the response deadline");
                Err(AssistantError::Timeout(timeout_ms))
            }
            Ok(Err(e)) => Err(e),
            Ok(Ok(text)) => {
                let reply = ModelReply { raw_text: text };
                if reply.is_empty() {
                    // A blank answer must never render as a successful
                    // empty chat bubble.
                    Err(AssistantError::EmptyResponse)
                } else {
                    Ok(reply)
                }
            }
        }
    }
}
