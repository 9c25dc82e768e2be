pub mod classify;
pub mod config;
pub mod conversation;
pub mod error;
pub mod format;
pub mod gateway;
pub mod handlers;
pub mod language;
pub mod models;
pub mod prompt;
pub mod rate_limit;
pub mod transport;
pub mod validation;

use std::sync::Arc;

use crate::config::Config;
use crate::error::Result;
use crate::gateway::ModelGateway;
use crate::handlers::ChatHandlers;
use crate::rate_limit::FixedWindowLimiter;
use crate::transport::{GeminiTransport, Transport};
use crate::validation::InputValidator;

/// Wires the assistant components from configuration and exposes the
/// API router.
pub struct AssistantService {
    handlers: ChatHandlers,
}

impl AssistantService {
    pub fn new(cfg: &Config) -> Result<Self> {
        let transport = Arc::new(GeminiTransport::new(
            cfg.gemini.api_key.clone(),
            cfg.gemini.model.clone(),
        )?);

        let gateway = Arc::new(ModelGateway::new(
            transport as Arc<dyn Transport>,
            cfg.request_timeout(),
        ));

        let rate_limiter = Arc::new(FixedWindowLimiter::new(
            cfg.rate_limiter.max_requests,
            cfg.rate_limiter.window_seconds,
        ));

        let validator = Arc::new(InputValidator::new(cfg.chat.max_message_chars));

        let handlers = ChatHandlers::new(gateway, rate_limiter, validator, Arc::new(cfg.clone()));

        Ok(Self { handlers })
    }

    pub fn router(&self) -> axum::Router {
        handlers::router(self.handlers.clone())
    }
}
