// SPDX-License-Identifier: MIT

//! Model Routing Core: routes a unit of work to a model identifier and
//! executes it natively or via a local proxy (spec.md section 4.8).

pub mod cost;
pub mod executor;
pub mod proxy;
pub mod transform;

pub use cost::{CostTracker, ModelPricing, PricingRegistry, UsageRecord};
pub use executor::{execute, ExecutionOutcome, NativeExecutor, ProxyExecutor};
pub use proxy::{proxy_router, ProxyState};
pub use transform::{CanonicalMessage, CanonicalRequest, CanonicalResponse, StreamingBuffer};
