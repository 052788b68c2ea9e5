//! End-to-end behavior of the analysis endpoint with a mock model.

mod common;

use analytics_service::services::providers::mock::MockTextProvider;
use analytics_service::startup::build_router;
use axum::body::{to_bytes, Body};
use axum::extract::Query;
use axum::http::{header, HeaderMap, Request, Response, StatusCode};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tower::util::ServiceExt;

fn analyze_request(body: Value, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/api/gemini/analise")
        .header(header::CONTENT_TYPE, "application/json");

    if let Some(value) = cookie {
        builder = builder.header(header::COOKIE, value);
    }

    builder.body(Body::from(body.to_string())).unwrap()
}

async fn body_json(response: Response<Body>) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn fenced_model_output_is_relayed_verbatim() {
    let base = common::spawn_internal_stub(common::healthy_internal_router()).await;
    let provider = Arc::new(MockTextProvider::new("```json\n{\"widgets\":[]}\n```"));
    let app = build_router(common::test_state(&base, provider));

    let response = app
        .oneshot(analyze_request(
            json!({"prompt": "Como foram as vendas?"}),
            Some(r#"user={"id":3}"#),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({"widgets": []}));
}

#[tokio::test]
async fn prose_model_output_returns_fixed_error() {
    let base = common::spawn_internal_stub(common::healthy_internal_router()).await;
    let provider = Arc::new(MockTextProvider::new(
        "Desculpe, não consegui gerar os widgets.",
    ));
    let app = build_router(common::test_state(&base, provider));

    let response = app
        .oneshot(analyze_request(json!({"prompt": "Resumo do mês"}), None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body_json(response).await,
        json!({"error": "Erro ao processar análise", "widgets": []})
    );
}

#[tokio::test]
async fn provider_failure_returns_fixed_error() {
    let base = common::spawn_internal_stub(common::healthy_internal_router()).await;
    let provider = Arc::new(MockTextProvider::disabled());
    let app = build_router(common::test_state(&base, provider));

    let response = app
        .oneshot(analyze_request(json!({"prompt": "Resumo do mês"}), None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body_json(response).await,
        json!({"error": "Erro ao processar análise", "widgets": []})
    );
}

#[tokio::test]
async fn empty_prompt_returns_fixed_error() {
    let base = common::spawn_internal_stub(common::healthy_internal_router()).await;
    let provider = Arc::new(MockTextProvider::new("{\"widgets\":[]}"));
    let app = build_router(common::test_state(&base, provider));

    let response = app
        .oneshot(analyze_request(json!({"prompt": ""}), None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body_json(response).await,
        json!({"error": "Erro ao processar análise", "widgets": []})
    );
}

/// Stub that records the `userId` query parameter of the orders call and
/// the forwarded `user` cookie of the leads call.
fn recording_internal_router(
    seen_user_id: Arc<Mutex<Option<String>>>,
    seen_cookie: Arc<Mutex<Option<String>>>,
) -> Router {
    Router::new()
        .route(
            "/api/leads",
            get(move |headers: HeaderMap| {
                let seen = seen_cookie.clone();
                async move {
                    *seen.lock().unwrap() = headers
                        .get(header::COOKIE)
                        .and_then(|v| v.to_str().ok())
                        .map(|s| s.to_string());
                    Json(json!([]))
                }
            }),
        )
        .route(
            "/api/sankhya/parceiros",
            get(|| async { Json(json!({"parceiros": []})) }),
        )
        .route(
            "/api/sankhya/produtos",
            get(|| async { Json(json!({"produtos": []})) }),
        )
        .route(
            "/api/sankhya/pedidos/listar",
            get(move |Query(params): Query<HashMap<String, String>>| {
                let seen = seen_user_id.clone();
                async move {
                    *seen.lock().unwrap() = params.get("userId").cloned();
                    Json(json!([]))
                }
            }),
        )
}

#[tokio::test]
async fn missing_cookie_scopes_calls_to_anonymous_user() {
    let seen_user_id = Arc::new(Mutex::new(None));
    let seen_cookie = Arc::new(Mutex::new(None));
    let stub = recording_internal_router(seen_user_id.clone(), seen_cookie.clone());
    let base = common::spawn_internal_stub(stub).await;

    let mock = MockTextProvider::new("{\"widgets\":[]}");
    let call_log = mock.call_log();
    let app = build_router(common::test_state(&base, Arc::new(mock)));

    let response = app
        .oneshot(analyze_request(json!({"prompt": "Resumo geral"}), None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(*seen_user_id.lock().unwrap(), Some("0".to_string()));
    assert_eq!(
        *seen_cookie.lock().unwrap(),
        Some(r#"user={"id":0}"#.to_string())
    );

    // Prompt composition: system instruction first, then the data context
    // holding the literal question.
    let calls = call_log.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].len(), 2);
    assert!(calls[0][0].contains("FORMATO DE RESPOSTA OBRIGATÓRIO"));
    assert!(calls[0][1].contains("PERGUNTA DO USUÁRIO:\nResumo geral"));
}

#[tokio::test]
async fn session_cookie_scopes_internal_calls() {
    let seen_user_id = Arc::new(Mutex::new(None));
    let seen_cookie = Arc::new(Mutex::new(None));
    let stub = recording_internal_router(seen_user_id.clone(), seen_cookie.clone());
    let base = common::spawn_internal_stub(stub).await;

    let provider = Arc::new(MockTextProvider::new("{\"widgets\":[]}"));
    let app = build_router(common::test_state(&base, provider));

    let response = app
        .oneshot(analyze_request(
            json!({"prompt": "Meus pedidos"}),
            Some(r#"user={"id":42}"#),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(*seen_user_id.lock().unwrap(), Some("42".to_string()));
    assert_eq!(
        *seen_cookie.lock().unwrap(),
        Some(r#"user={"id":42}"#.to_string())
    );
}
