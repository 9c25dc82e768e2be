use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};

use crate::classify::classify;
use crate::conversation::ConversationWindow;
use crate::error::AssistantError;
use crate::format::format_response;
use crate::language::{self, Language};
use crate::models::{
    ChatEndpoints, ChatErrorBody, ChatRequest, ChatResponse, ChatStatus, now_iso,
};
use crate::prompt;
use crate::rate_limit::client_key;

use super::ChatHandlers;

/// `POST /api/chat` — answer one question.
pub async fn post_chat(
    State(handlers): State<ChatHandlers>,
    headers: HeaderMap,
    Json(request): Json<ChatRequest>,
) -> Response {
    handlers.handle_chat(&headers, request).await
}

/// `GET /api/chat` — status probe. Reports the process as alive; it
/// does not verify provider reachability.
pub async fn get_chat(State(_handlers): State<ChatHandlers>) -> Json<ChatStatus> {
    Json(ChatStatus {
        message: "مساعد الصلاة الذكي جاهز للخدمة".to_string(),
        status: "active".to_string(),
        supported_languages: Language::ALL.to_vec(),
        endpoints: ChatEndpoints {
            chat: "POST /api/chat".to_string(),
            health: "GET /api/chat".to_string(),
        },
        timestamp: now_iso(),
    })
}

impl ChatHandlers {
    /// One question in, exactly one response out: rate limit, validate,
    /// detect, compose, invoke, then format the answer or classify the
    /// failure. No partial responses and no streaming.
    pub async fn handle_chat(&self, headers: &HeaderMap, request: ChatRequest) -> Response {
        // Detection is pure and only localizes whatever the outcome is;
        // invalid input still never reaches composing or the provider.
        let lang = language::detect(&request.message);

        let key = client_key(headers);
        let decision = self.rate_limiter.check(&key);
        if !decision.allowed {
            tracing::warn!(client = %key, "rate limit exceeded");
            return error_response(&AssistantError::RateLimited(key), lang);
        }

        let question = match self.validator.validate_question(&request.message) {
            Ok(question) => question.to_string(),
            Err(e) => {
                tracing::warn!("rejected chat input: {e}");
                return error_response(&e, lang);
            }
        };

        let window =
            ConversationWindow::from_messages(&request.history, self.config.chat.history_window);
        let prompt = prompt::compose(&window, &question, lang);

        match self.gateway.invoke(&prompt).await {
            Ok(reply) => {
                tracing::info!(language = lang.as_tag(), "answered chat question");
                success_response(ChatResponse {
                    response: format_response(&reply.raw_text),
                    source: Some(prompt::source_label(lang).to_string()),
                    timestamp: now_iso(),
                    detected_language: Some(lang),
                })
            }
            Err(e) => {
                // Full diagnostic stays server-side; the client only
                // ever sees the localized message.
                tracing::error!("chat request failed: {e}");
                error_response(&e, lang)
            }
        }
    }
}

fn success_response(body: ChatResponse) -> Response {
    let mut response = (StatusCode::OK, Json(body)).into_response();
    let headers = response.headers_mut();
    headers.insert(
        header::CACHE_CONTROL,
        HeaderValue::from_static("no-cache, no-store, must-revalidate"),
    );
    headers.insert(header::PRAGMA, HeaderValue::from_static("no-cache"));
    headers.insert(header::EXPIRES, HeaderValue::from_static("0"));
    response
}

fn error_response(error: &AssistantError, lang: Language) -> Response {
    let classified = classify(error, lang);
    let body = ChatErrorBody {
        error: classified.message,
        timestamp: now_iso(),
    };
    (classified.status, Json(body)).into_response()
}
