// SPDX-License-Identifier: MIT

//! Cost tracking: per-day, per-command token usage and USD cost, computed
//! from a model-pricing registry and persisted to a rolling JSON file
//! (spec.md section 4.8, "Cost tracking").

use chrono::NaiveDate;
use oss_core::Provider;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Per-million-token pricing for a model. Local models (Ollama) price at $0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelPricing {
    pub input_per_1m: f64,
    pub output_per_1m: f64,
}

impl ModelPricing {
    pub const FREE: ModelPricing = ModelPricing { input_per_1m: 0.0, output_per_1m: 0.0 };

    pub fn cost_usd(&self, input_tokens: u32, output_tokens: u32) -> f64 {
        (input_tokens as f64 / 1_000_000.0) * self.input_per_1m + (output_tokens as f64 / 1_000_000.0) * self.output_per_1m
    }
}

/// Maps `provider/model` to its pricing. Ollama entries default to free even
/// when absent, since local inference has no per-token cost.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PricingRegistry {
    prices: HashMap<String, ModelPricing>,
}

impl PricingRegistry {
    pub fn set(&mut self, provider: Provider, model: &str, pricing: ModelPricing) {
        self.prices.insert(format!("{provider}/{model}"), pricing);
    }

    pub fn lookup(&self, provider: Provider, model: &str) -> ModelPricing {
        self.prices.get(&format!("{provider}/{model}")).copied().unwrap_or(ModelPricing::FREE)
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct UsageRecord {
    pub tokens: u64,
    pub cost_usd: f64,
}

impl UsageRecord {
    fn add(&mut self, tokens: u64, cost_usd: f64) {
        self.tokens += tokens;
        self.cost_usd += cost_usd;
    }
}

/// Rolling per-day-per-command usage ledger, serialized as a flat JSON
/// document (`cost.json`-shaped) for atomic read/write by the caller.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CostTracker {
    days: HashMap<NaiveDate, HashMap<String, UsageRecord>>,
}

impl CostTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record usage for `command` on `date`, pricing it via `registry`.
    pub fn record(
        &mut self,
        date: NaiveDate,
        command: &str,
        provider: Provider,
        model: &str,
        input_tokens: u32,
        output_tokens: u32,
        registry: &PricingRegistry,
    ) {
        let pricing = registry.lookup(provider, model);
        let cost_usd = pricing.cost_usd(input_tokens, output_tokens);
        let tokens = (input_tokens + output_tokens) as u64;
        self.days
            .entry(date)
            .or_default()
            .entry(command.to_string())
            .or_default()
            .add(tokens, cost_usd);
    }

    pub fn for_day(&self, date: NaiveDate) -> HashMap<String, UsageRecord> {
        self.days.get(&date).cloned().unwrap_or_default()
    }

    pub fn total_for_day(&self, date: NaiveDate) -> UsageRecord {
        let mut total = UsageRecord::default();
        for record in self.for_day(date).values() {
            total.add(record.tokens, record.cost_usd);
        }
        total
    }
}

#[cfg(test)]
#[path = "cost_tests.rs"]
mod tests;
