// SPDX-License-Identifier: MIT

//! Custom Command Executor: resolves team-prefixed chain commands by
//! fetching their prompt over HTTP (spec.md section 4.9).

use crate::error::EngineError;
use async_trait::async_trait;

/// Abstraction over the HTTP fetch so chain execution stays testable without
/// a live network.
#[async_trait]
pub trait CustomCommandFetcher: Send + Sync {
    async fn fetch_prompt(&self, command: &str) -> Result<String, EngineError>;
}

/// Production fetcher backed by `reqwest`.
pub struct HttpCustomCommandFetcher {
    base_url: String,
    client: reqwest::Client,
}

impl HttpCustomCommandFetcher {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into(), client: reqwest::Client::new() }
    }
}

#[async_trait]
impl CustomCommandFetcher for HttpCustomCommandFetcher {
    async fn fetch_prompt(&self, command: &str) -> Result<String, EngineError> {
        let slug = command.trim_start_matches('@');
        let url = format!("{}/commands/{}", self.base_url.trim_end_matches('/'), slug);
        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| EngineError::CustomCommandFetch(e.to_string()))?;
        if !resp.status().is_success() {
            return Err(EngineError::CustomCommandFetch(format!(
                "{} returned {}",
                url,
                resp.status()
            )));
        }
        resp.text().await.map_err(|e| EngineError::CustomCommandFetch(e.to_string()))
    }
}

#[cfg(test)]
pub struct FakeCustomCommandFetcher {
    pub prompt: Result<String, String>,
}

#[cfg(test)]
#[async_trait]
impl CustomCommandFetcher for FakeCustomCommandFetcher {
    async fn fetch_prompt(&self, _command: &str) -> Result<String, EngineError> {
        self.prompt.clone().map_err(EngineError::CustomCommandFetch)
    }
}
