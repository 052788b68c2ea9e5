//! Test helpers for analytics-service integration tests.

#![allow(dead_code)]

use analytics_service::config::{AnalyticsConfig, GoogleConfig, InternalApiConfig, ModelConfig};
use analytics_service::services::providers::TextProvider;
use analytics_service::services::DataAggregator;
use analytics_service::startup::AppState;
use axum::{routing::get, Json, Router};
use secrecy::Secret;
use serde_json::json;
use std::sync::Arc;
use tokio::net::TcpListener;

pub fn test_config(base_url: &str) -> AnalyticsConfig {
    AnalyticsConfig {
        common: service_core::config::Config {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        google: GoogleConfig {
            api_key: Secret::new("test-api-key".to_string()),
        },
        models: ModelConfig {
            text_model: "gemini-2.0-flash-exp".to_string(),
        },
        internal_api: InternalApiConfig {
            base_url: base_url.to_string(),
        },
    }
}

pub fn test_state(base_url: &str, provider: Arc<dyn TextProvider>) -> AppState {
    AppState {
        config: test_config(base_url),
        text_provider: provider,
        aggregator: DataAggregator::new(base_url),
    }
}

/// Serve a canned internal API on a random port; returns its base URL.
pub async fn spawn_internal_stub(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind stub listener");
    let addr = listener.local_addr().expect("Stub listener has no address");

    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });

    format!("http://{}", addr)
}

/// Internal API stub where all four sources answer successfully.
pub fn healthy_internal_router() -> Router {
    Router::new()
        .route(
            "/api/leads",
            get(|| async { Json(json!([{"nome": "Lead 1", "estagio": "Proposta"}])) }),
        )
        .route(
            "/api/sankhya/parceiros",
            get(|| async { Json(json!({"parceiros": [{"nome": "Parceiro 1"}]})) }),
        )
        .route(
            "/api/sankhya/produtos",
            get(|| async { Json(json!({"produtos": [{"descricao": "Produto 1"}]})) }),
        )
        .route(
            "/api/sankhya/pedidos/listar",
            get(|| async { Json(json!([{"numero": 1001}])) }),
        )
}
