pub mod chat;

#[cfg(test)]
mod test_handlers;

use std::sync::Arc;

use axum::Router;
use axum::routing::post;

use crate::config::Config;
use crate::gateway::ModelGateway;
use crate::rate_limit::RateLimit;
use crate::validation::InputValidator;

/// Shared dependencies for the chat endpoint.
#[derive(Clone)]
pub struct ChatHandlers {
    pub(crate) gateway: Arc<ModelGateway>,
    pub(crate) rate_limiter: Arc<dyn RateLimit>,
    pub(crate) validator: Arc<InputValidator>,
    pub(crate) config: Arc<Config>,
}

impl ChatHandlers {
    pub fn new(
        gateway: Arc<ModelGateway>,
        rate_limiter: Arc<dyn RateLimit>,
        validator: Arc<InputValidator>,
        config: Arc<Config>,
    ) -> Self {
        Self {
            gateway,
            rate_limiter,
            validator,
            config,
        }
    }
}

/// API router for the chat subsystem.
pub fn router(handlers: ChatHandlers) -> Router {
    Router::new()
        .route("/api/chat", post(chat::post_chat).get(chat::get_chat))
        .with_state(handlers)
}
