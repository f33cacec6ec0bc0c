// SPDX-License-Identifier: MIT

//! Proxy server: a loopback-bound axum service that fronts routed providers
//! (OpenRouter, Ollama, OpenAI, Gemini), translating to/from the canonical
//! dialect so callers never speak a provider's native wire format
//! (spec.md section 4.8).

use super::transform::{from_gemini_response, from_openai_response, to_gemini_request, to_openai_request, CanonicalRequest, CanonicalResponse};
use crate::error::AdapterError;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::Json;
use oss_core::Provider;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;

/// Per-provider base URL and API key, keyed by `Provider`.
#[derive(Debug, Clone, Default)]
pub struct ProviderRoutes {
    routes: HashMap<&'static str, (String, Option<String>)>,
}

impl ProviderRoutes {
    pub fn insert(&mut self, provider: Provider, base_url: impl Into<String>, api_key: Option<String>) {
        self.routes.insert(provider_key(provider), (base_url.into(), api_key));
    }

    fn get(&self, provider: Provider) -> Option<&(String, Option<String>)> {
        self.routes.get(provider_key(provider))
    }
}

fn provider_key(provider: Provider) -> &'static str {
    match provider {
        Provider::Openrouter => "openrouter",
        Provider::Ollama => "ollama",
        Provider::Openai => "openai",
        Provider::Gemini => "gemini",
    }
}

pub struct ProxyState {
    pub routes: ProviderRoutes,
    pub client: reqwest::Client,
}

impl ProxyState {
    pub fn new(routes: ProviderRoutes) -> Self {
        Self { routes, client: reqwest::Client::new() }
    }
}

#[derive(Debug, Serialize)]
struct HealthBody {
    healthy: bool,
}

/// Routes registered under `/v1/messages` and `/health`. Binding the listener
/// to an ephemeral loopback port and shutting it down is the caller's
/// responsibility (it owns the port lifecycle, the router is transport-agnostic).
pub fn proxy_router(state: Arc<ProxyState>) -> axum::Router {
    axum::Router::new()
        .route("/v1/messages", post(handle_messages))
        .route("/health", get(handle_health))
        .with_state(state)
}

async fn handle_health() -> impl IntoResponse {
    Json(HealthBody { healthy: true })
}

async fn handle_messages(State(state): State<Arc<ProxyState>>, Json(request): Json<CanonicalRequest>) -> impl IntoResponse {
    match dispatch(&state, &request).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => (StatusCode::BAD_GATEWAY, e.to_string()).into_response(),
    }
}

async fn dispatch(state: &ProxyState, request: &CanonicalRequest) -> Result<CanonicalResponse, AdapterError> {
    let parsed = oss_core::parse_model_id(&request.model)
        .ok_or_else(|| AdapterError::InvalidArgument(format!("invalid model id '{}'", request.model)))?;
    let oss_core::ParsedModelId::Routed { provider, .. } = parsed else {
        return Err(AdapterError::InvalidArgument("proxy cannot serve the native model id".to_string()));
    };

    let (base_url, api_key) = state
        .routes
        .get(provider)
        .ok_or_else(|| AdapterError::InvalidArgument(format!("no route configured for provider {provider}")))?;

    match provider {
        Provider::Openai | Provider::Openrouter => {
            let body = to_openai_request(request);
            let mut req = state.client.post(format!("{base_url}/chat/completions")).json(&body);
            if let Some(key) = api_key {
                req = req.bearer_auth(key);
            }
            let response = req.send().await.map_err(|e| AdapterError::Network(e.to_string()))?;
            let json: serde_json::Value = response.json().await.map_err(|e| AdapterError::Network(e.to_string()))?;
            from_openai_response(&json).ok_or_else(|| AdapterError::Network("malformed upstream response".to_string()))
        }
        Provider::Ollama => {
            let body = to_openai_request(request);
            let response = state
                .client
                .post(format!("{base_url}/v1/chat/completions"))
                .json(&body)
                .send()
                .await
                .map_err(|e| AdapterError::Network(e.to_string()))?;
            let json: serde_json::Value = response.json().await.map_err(|e| AdapterError::Network(e.to_string()))?;
            from_openai_response(&json).ok_or_else(|| AdapterError::Network("malformed upstream response".to_string()))
        }
        Provider::Gemini => {
            let body = to_gemini_request(request);
            let mut url = format!("{base_url}/v1/models/{}:generateContent", request.model);
            if let Some(key) = api_key {
                url = format!("{url}?key={key}");
            }
            let response = state.client.post(url).json(&body).send().await.map_err(|e| AdapterError::Network(e.to_string()))?;
            let json: serde_json::Value = response.json().await.map_err(|e| AdapterError::Network(e.to_string()))?;
            from_gemini_response(&json).ok_or_else(|| AdapterError::Network("malformed upstream response".to_string()))
        }
    }
}

#[cfg(test)]
#[path = "proxy_tests.rs"]
mod tests;
