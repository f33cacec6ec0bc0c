// SPDX-License-Identifier: MIT

//! Webhook Receiver: signed-event HTTP endpoint (spec.md section 4.7).

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::Json;
use hmac::{Hmac, Mac};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use std::sync::Arc;

pub const MAX_PAYLOAD_BYTES: usize = 1024 * 1024;
pub const DEFAULT_RATE_LIMIT_PER_MINUTE: u32 = 10;
const SIGNATURE_HEADER: &str = "x-hub-signature-256";

type HmacSha256 = Hmac<Sha256>;

/// Timing-safe verification of `sha256=<hex>` against `HMAC-SHA256(secret, body)`.
pub fn verify_signature(secret: &[u8], body: &[u8], header_value: &str) -> bool {
    let Some(hex_sig) = header_value.strip_prefix("sha256=") else { return false };
    let Ok(expected_bytes) = hex::decode(hex_sig) else { return false };
    let Ok(mut mac) = HmacSha256::new_from_slice(secret) else { return false };
    mac.update(body);
    mac.verify_slice(&expected_bytes).is_ok()
}

/// Fixed 60-second window counter (property 8): accepts the first *N*
/// requests in a window, rejects the rest with 429, then resets.
pub struct RateLimiter {
    limit: u32,
    window: Mutex<(chrono::DateTime<chrono::Utc>, u32)>,
}

impl RateLimiter {
    pub fn new(limit: u32, now: chrono::DateTime<chrono::Utc>) -> Self {
        Self { limit, window: Mutex::new((now, 0)) }
    }

    pub fn check(&self, now: chrono::DateTime<chrono::Utc>) -> bool {
        let mut window = self.window.lock();
        if (now - window.0).num_seconds() >= 60 {
            *window = (now, 0);
        }
        if window.1 >= self.limit {
            return false;
        }
        window.1 += 1;
        true
    }
}

#[derive(Debug, Deserialize)]
pub struct WebhookEvent {
    pub action: String,
    pub review: Option<ReviewPayload>,
    pub pull_request: Option<PullRequestPayload>,
}

#[derive(Debug, Deserialize)]
pub struct ReviewPayload {
    pub state: String,
    pub body: String,
}

#[derive(Debug, Deserialize)]
pub struct PullRequestPayload {
    pub number: u64,
    pub head: HeadRef,
}

#[derive(Debug, Deserialize)]
pub struct HeadRef {
    #[serde(rename = "ref")]
    pub ref_name: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub healthy: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

/// Emitted for a matching `review`/`changes_requested` event so the daemon
/// can enqueue a remediation task without waiting on the next PR-monitor poll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangesRequested {
    pub pr_number: u64,
    pub branch: String,
    pub body: String,
}

pub trait WebhookSink: Send + Sync {
    fn on_changes_requested(&self, event: ChangesRequested);
}

pub struct WebhookState<C: oss_core::Clock + 'static> {
    pub secret: Vec<u8>,
    pub rate_limiter: RateLimiter,
    pub sink: Arc<dyn WebhookSink>,
    pub clock: C,
}

pub fn router<C: oss_core::Clock + 'static>(state: Arc<WebhookState<C>>) -> axum::Router {
    axum::Router::new()
        .route("/webhook", post(handle_webhook::<C>))
        .route("/health", get(handle_health))
        .with_state(state)
}

async fn handle_health() -> impl IntoResponse {
    Json(HealthResponse { healthy: true, provider: None, model: None })
}

async fn handle_webhook<C: oss_core::Clock + 'static>(State(state): State<Arc<WebhookState<C>>>, headers: HeaderMap, body: Bytes) -> impl IntoResponse {
    if body.len() > MAX_PAYLOAD_BYTES {
        return StatusCode::PAYLOAD_TOO_LARGE;
    }

    if !state.rate_limiter.check(state.clock.now()) {
        return StatusCode::TOO_MANY_REQUESTS;
    }

    let signature = match headers.get(SIGNATURE_HEADER).and_then(|v| v.to_str().ok()) {
        Some(sig) => sig,
        None => return StatusCode::UNAUTHORIZED,
    };
    if !verify_signature(&state.secret, &body, signature) {
        return StatusCode::UNAUTHORIZED;
    }

    let Ok(event) = serde_json::from_slice::<WebhookEvent>(&body) else {
        return StatusCode::OK;
    };

    if event.action != "submitted" {
        return StatusCode::OK;
    }

    if let (Some(review), Some(pr)) = (event.review, event.pull_request) {
        if review.state == "changes_requested" {
            state.sink.on_changes_requested(ChangesRequested {
                pr_number: pr.number,
                branch: pr.head.ref_name,
                body: review.body,
            });
        }
    }

    StatusCode::OK
}

#[cfg(test)]
#[path = "webhook_tests.rs"]
mod tests;
