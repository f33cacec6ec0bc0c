// SPDX-License-Identifier: MIT

//! Executor: dispatches a canonical request natively or via the proxy,
//! with native fallback on provider failure (spec.md section 4.8).

use super::transform::{CanonicalRequest, CanonicalResponse};
use crate::error::AdapterError;
use async_trait::async_trait;
use oss_core::{parse_model_id, ParsedModelId};

#[async_trait]
pub trait NativeExecutor: Send + Sync {
    async fn execute_native(&self, request: &CanonicalRequest) -> Result<CanonicalResponse, AdapterError>;
}

#[async_trait]
pub trait ProxyExecutor: Send + Sync {
    async fn execute_via_proxy(&self, parsed: &ParsedModelId, request: &CanonicalRequest) -> Result<CanonicalResponse, AdapterError>;
}

#[derive(Debug, Clone)]
pub struct ExecutionOutcome {
    pub response: CanonicalResponse,
    pub fallback_used: bool,
}

/// Route `request.model` per the executor contract: `default`/`claude` takes
/// the native path; otherwise the proxy, falling back to native on provider
/// failure when `fallback_enabled`.
pub async fn execute(
    request: CanonicalRequest,
    native: &dyn NativeExecutor,
    proxy: &dyn ProxyExecutor,
    fallback_enabled: bool,
) -> Result<ExecutionOutcome, AdapterError> {
    let parsed = parse_model_id(&request.model)
        .ok_or_else(|| AdapterError::InvalidArgument(format!("invalid model id '{}'", request.model)))?;

    if matches!(parsed, ParsedModelId::Native) {
        let response = native.execute_native(&request).await?;
        return Ok(ExecutionOutcome { response, fallback_used: false });
    }

    match proxy.execute_via_proxy(&parsed, &request).await {
        Ok(response) => Ok(ExecutionOutcome { response, fallback_used: false }),
        Err(e) if fallback_enabled => {
            tracing::warn!(error = %e, model = %request.model, "provider failed, falling back to native");
            let response = native.execute_native(&request).await?;
            Ok(ExecutionOutcome { response, fallback_used: true })
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
#[path = "executor_tests.rs"]
mod tests;
