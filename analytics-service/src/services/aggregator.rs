//! Per-request aggregation of internal CRM data.
//!
//! Fans out four independent reads (leads, partners, products, orders) and
//! joins them into a [`SystemSnapshot`]. Each source degrades to an empty
//! collection on failure; the snapshot itself can never fail.

use reqwest::{header, Client};
use serde_json::Value;
use service_core::observability::TracedClientExt;

/// The four-collection snapshot grounding the model's answer.
#[derive(Debug, Default, Clone)]
pub struct SystemSnapshot {
    pub leads: Vec<Value>,
    pub parceiros: Vec<Value>,
    pub produtos: Vec<Value>,
    pub pedidos: Vec<Value>,
}

/// Client for the internal service cluster.
#[derive(Clone)]
pub struct DataAggregator {
    client: Client,
    base_url: String,
}

impl DataAggregator {
    pub fn new(base_url: &str) -> Self {
        // No request timeout here: a hung upstream stalls the request, the
        // same contract the callers already rely on.
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Fetch all four collections concurrently. Infallible: every source
    /// that cannot be read contributes an empty collection.
    pub async fn fetch_snapshot(&self, user_id: i64) -> SystemSnapshot {
        let (leads, parceiros, produtos, pedidos) = tokio::join!(
            self.fetch_leads(user_id),
            self.fetch_listing("parceiros"),
            self.fetch_listing("produtos"),
            self.fetch_pedidos(user_id),
        );

        tracing::debug!(
            leads = leads.len(),
            parceiros = parceiros.len(),
            produtos = produtos.len(),
            pedidos = pedidos.len(),
            "Aggregated system snapshot"
        );

        SystemSnapshot {
            leads,
            parceiros,
            produtos,
            pedidos,
        }
    }

    /// Leads scoped to the session identity, forwarded as the `user` cookie.
    async fn fetch_leads(&self, user_id: i64) -> Vec<Value> {
        let url = format!("{}/api/leads", self.base_url);
        let cookie = format!("user={{\"id\":{}}}", user_id);

        let body = match self
            .client
            .traced_get(&url)
            .header(header::COOKIE.as_str(), &cookie)
            .send()
            .await
        {
            Ok(resp) => decode_success(resp, &url).await,
            Err(e) => {
                tracing::warn!(url = %url, error = %e, "Internal request failed");
                None
            }
        };

        into_array(body)
    }

    /// Paginated Sankhya listing whose body wraps the array in a field
    /// named after the resource (`parceiros`, `produtos`).
    async fn fetch_listing(&self, resource: &str) -> Vec<Value> {
        let url = format!(
            "{}/api/sankhya/{}?page=1&pageSize=100",
            self.base_url, resource
        );

        let body = match self.client.traced_get(&url).send().await {
            Ok(resp) => decode_success(resp, &url).await,
            Err(e) => {
                tracing::warn!(url = %url, error = %e, "Internal request failed");
                None
            }
        };

        into_field_array(body, resource)
    }

    /// Orders scoped by user identifier via query parameter.
    async fn fetch_pedidos(&self, user_id: i64) -> Vec<Value> {
        let url = format!(
            "{}/api/sankhya/pedidos/listar?userId={}",
            self.base_url, user_id
        );

        let body = match self.client.traced_get(&url).send().await {
            Ok(resp) => decode_success(resp, &url).await,
            Err(e) => {
                tracing::warn!(url = %url, error = %e, "Internal request failed");
                None
            }
        };

        into_array(body)
    }
}

/// Decode a response body as JSON when the status is a success; anything
/// else is logged and collapsed to `None`.
async fn decode_success(resp: reqwest::Response, url: &str) -> Option<Value> {
    if !resp.status().is_success() {
        tracing::warn!(url = %url, status = %resp.status(), "Internal endpoint returned non-success");
        return None;
    }

    match resp.json::<Value>().await {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(url = %url, error = %e, "Failed to decode internal response body");
            None
        }
    }
}

/// Coerce a body expected to be a top-level JSON array.
fn into_array(body: Option<Value>) -> Vec<Value> {
    match body {
        Some(Value::Array(items)) => items,
        _ => Vec::new(),
    }
}

/// Coerce a body expected to carry an array under `key`.
fn into_field_array(body: Option<Value>, key: &str) -> Vec<Value> {
    match body.and_then(|mut v| v.get_mut(key).map(Value::take)) {
        Some(Value::Array(items)) => items,
        _ => Vec::new(),
    }
}
