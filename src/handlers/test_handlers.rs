use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use crate::config::Config;
use crate::error::Result as AssistantResult;
use crate::gateway::ModelGateway;
use crate::models::GenerationConfig;
use crate::rate_limit::FixedWindowLimiter;
use crate::transport::{MockTransport, Transport};
use crate::validation::InputValidator;

use super::{ChatHandlers, router};

/// Transport whose provider call never resolves.
struct PendingTransport;

#[async_trait]
impl Transport for PendingTransport {
    async fn generate(&self, _prompt: &str, _generation: GenerationConfig) -> AssistantResult<String> {
        std::future::pending().await
    }
}

fn test_config() -> Config {
    Config {
        gemini: crate::config::GeminiConfig {
            api_key: "test-key".to_string(),
            model: "gemini-1.5-flash".to_string(),
            timeout_ms: 15_000,
        },
        ..Config::default()
    }
}

fn test_router(transport: Arc<dyn Transport>, config: Config) -> Router {
    let gateway = Arc::new(ModelGateway::new(transport, config.request_timeout()));
    let rate_limiter = Arc::new(FixedWindowLimiter::new(
        config.rate_limiter.max_requests,
        config.rate_limiter.window_seconds,
    ));
    let validator = Arc::new(InputValidator::new(config.chat.max_message_chars));
    router(ChatHandlers::new(
        gateway,
        rate_limiter,
        validator,
        Arc::new(config),
    ))
}

async fn post_chat(router: Router, body: serde_json::Value) -> (StatusCode, serde_json::Value) {
    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/chat")
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .expect("request"),
        )
        .await
        .expect("response");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    let json = serde_json::from_slice(&bytes).expect("json body");
    (status, json)
}

#[tokio::test]
async fn empty_message_is_rejected_without_a_provider_call() {
    let mut transport = MockTransport::new();
    transport.expect_generate().times(0);
    let router = test_router(Arc::new(transport), test_config());

    let (status, body) = post_chat(router, serde_json::json!({ "message": "" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Please enter a valid question");
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn overlong_message_is_rejected_without_a_provider_call() {
    let mut transport = MockTransport::new();
    transport.expect_generate().times(0);
    let router = test_router(Arc::new(transport), test_config());

    let long = "a".repeat(1001);
    let (status, body) = post_chat(router, serde_json::json!({ "message": long })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(
        body["error"].as_str().expect("error string").contains("1000"),
        "error should mention the length limit: {body}"
    );
}

#[tokio::test]
async fn arabic_question_is_answered_with_arabic_metadata() {
    let mut transport = MockTransport::new();
    transport
        .expect_generate()
        .times(1)
        .returning(|_, _| Ok("الوضوء أربع فرائض:\n\n\n- النية\n- غسل الوجه".to_string()));
    let router = test_router(Arc::new(transport), test_config());

    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/chat")
                .header("content-type", "application/json")
                .body(Body::from(
                    serde_json::json!({ "message": "كيف أتوضأ؟" }).to_string(),
                ))
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    // Answers are per-request and must never be cached downstream.
    assert_eq!(
        response
            .headers()
            .get("cache-control")
            .and_then(|v| v.to_str().ok()),
        Some("no-cache, no-store, must-revalidate")
    );
    assert_eq!(
        response.headers().get("pragma").and_then(|v| v.to_str().ok()),
        Some("no-cache")
    );

    let bytes = response.into_body().collect().await.expect("body").to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&bytes).expect("json");
    assert_eq!(body["detectedLanguage"], "arabic");
    assert_eq!(body["source"], "مساعد ذكي متخصص في تعليم الصلاة");
    // Formatting is applied on the success path.
    assert_eq!(body["response"], "الوضوء أربع فرائض:\n\n• النية\n• غسل الوجه");
}

#[tokio::test]
async fn quota_failure_maps_to_429_with_quota_message() {
    let mut transport = MockTransport::new();
    transport.expect_generate().returning(|_, _| {
        Err(crate::error::AssistantError::Provider(
            "Resource has been exhausted (quota)".to_string(),
        ))
    });
    let router = test_router(Arc::new(transport), test_config());

    let (status, body) = post_chat(router, serde_json::json!({ "message": "كيف أصلي؟" })).await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(body["error"], "تم تجاوز حد الاستخدام المسموح. يرجى المحاولة بعد قليل");
}

#[tokio::test]
async fn unresolved_provider_yields_408_near_the_deadline() {
    let mut config = test_config();
    config.gemini.timeout_ms = 100;
    let router = test_router(Arc::new(PendingTransport), config);

    let started = Instant::now();
    let (status, body) = post_chat(router, serde_json::json!({ "message": "how long?" })).await;
    let elapsed = started.elapsed();

    assert_eq!(status, StatusCode::REQUEST_TIMEOUT);
    assert_eq!(body["error"], "The response timed out. Please try again");
    assert!(elapsed >= Duration::from_millis(100));
    assert!(elapsed < Duration::from_secs(2), "response too late: {elapsed:?}");
}

#[tokio::test]
async fn whitespace_only_answer_is_never_a_success() {
    let mut transport = MockTransport::new();
    transport.expect_generate().returning(|_, _| Ok("   \n ".to_string()));
    let router = test_router(Arc::new(transport), test_config());

    let (status, body) = post_chat(router, serde_json::json!({ "message": "anything?" })).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].is_string());
    assert!(body.get("response").is_none());
}

#[tokio::test]
async fn history_is_bounded_to_the_trailing_eight_turns() {
    let mut transport = MockTransport::new();
    transport
        .expect_generate()
        .times(1)
        .withf(|prompt, _| {
            // Ten prior turns submitted; the composed history keeps
            // only the last eight, oldest first.
            let kept = (2..10).all(|i| prompt.contains(&format!("turn {i}")));
            kept && !prompt.contains("turn 0") && !prompt.contains("turn 1")
        })
        .returning(|_, _| Ok("answer".to_string()));
    let router = test_router(Arc::new(transport), test_config());

    let history: Vec<serde_json::Value> = (0..10)
        .map(|i| {
            serde_json::json!({
                "role": if i % 2 == 0 { "user" } else { "assistant" },
                "content": format!("turn {i}"),
            })
        })
        .collect();
    let (status, _body) = post_chat(
        router,
        serde_json::json!({ "message": "next question", "history": history }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn exhausted_rate_limit_returns_429() {
    let mut transport = MockTransport::new();
    transport.expect_generate().returning(|_, _| Ok("answer".to_string()));
    let mut config = test_config();
    config.rate_limiter.max_requests = 1;
    let router = test_router(Arc::new(transport), config);

    let (first, _) = post_chat(router.clone(), serde_json::json!({ "message": "first" })).await;
    assert_eq!(first, StatusCode::OK);

    let (second, body) = post_chat(router, serde_json::json!({ "message": "second" })).await;
    assert_eq!(second, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(body["error"], "Too many requests. Please wait a moment and try again");
}

#[tokio::test]
async fn rate_limit_keys_on_forwarded_client_ip() {
    let mut transport = MockTransport::new();
    transport.expect_generate().returning(|_, _| Ok("answer".to_string()));
    let mut config = test_config();
    config.rate_limiter.max_requests = 1;
    let router = test_router(Arc::new(transport), config);

    for ip in ["1.1.1.1", "2.2.2.2"] {
        let response = router
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/chat")
                    .header("content-type", "application/json")
                    .header("x-forwarded-for", ip)
                    .body(Body::from(serde_json::json!({ "message": "hi" }).to_string()))
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK, "fresh window for {ip}");
    }
}

#[tokio::test]
async fn status_probe_reports_active_without_touching_the_provider() {
    let mut transport = MockTransport::new();
    transport.expect_generate().times(0);
    let router = test_router(Arc::new(transport), test_config());

    let response = router
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/chat")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = response.into_body().collect().await.expect("body").to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&bytes).expect("json");
    assert_eq!(body["status"], "active");
    assert_eq!(
        body["supportedLanguages"]
            .as_array()
            .expect("languages")
            .len(),
        5
    );
    assert_eq!(body["endpoints"]["chat"], "POST /api/chat");
}

#[tokio::test]
async fn missing_api_key_surfaces_as_configuration_error_per_request() {
    use crate::transport::GeminiTransport;

    let mut config = test_config();
    config.gemini.api_key = String::new();
    let transport = GeminiTransport::new(
        config.gemini.api_key.clone(),
        config.gemini.model.clone(),
    )
    .expect("transport");
    let router = test_router(Arc::new(transport), config);

    let (status, body) = post_chat(router, serde_json::json!({ "message": "سؤال" })).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "خطأ في إعدادات الخدمة. يرجى التحقق من الإعدادات");
}
