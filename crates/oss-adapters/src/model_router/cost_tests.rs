use super::*;
use chrono::NaiveDate;

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 7, 28).unwrap()
}

#[test]
fn ollama_usage_is_free_even_without_a_registry_entry() {
    let registry = PricingRegistry::default();
    let mut tracker = CostTracker::new();

    tracker.record(day(), "test", Provider::Ollama, "llama3", 1000, 500, &registry);

    let total = tracker.total_for_day(day());
    assert_eq!(total.tokens, 1500);
    assert_eq!(total.cost_usd, 0.0);
}

#[test]
fn priced_model_accumulates_cost_across_multiple_records() {
    let mut registry = PricingRegistry::default();
    registry.set(Provider::Openai, "gpt-4", ModelPricing { input_per_1m: 10.0, output_per_1m: 30.0 });
    let mut tracker = CostTracker::new();

    tracker.record(day(), "review", Provider::Openai, "gpt-4", 1_000_000, 0, &registry);
    tracker.record(day(), "review", Provider::Openai, "gpt-4", 0, 1_000_000, &registry);

    let by_command = tracker.for_day(day());
    let record = by_command.get("review").unwrap();
    assert_eq!(record.tokens, 2_000_000);
    assert!((record.cost_usd - 40.0).abs() < 1e-9);
}

#[test]
fn usage_for_different_commands_is_tracked_separately() {
    let mut registry = PricingRegistry::default();
    registry.set(Provider::Openai, "gpt-4", ModelPricing { input_per_1m: 10.0, output_per_1m: 30.0 });
    let mut tracker = CostTracker::new();

    tracker.record(day(), "review", Provider::Openai, "gpt-4", 100, 0, &registry);
    tracker.record(day(), "plan", Provider::Openai, "gpt-4", 200, 0, &registry);

    let by_command = tracker.for_day(day());
    assert_eq!(by_command.len(), 2);
    assert_eq!(by_command["review"].tokens, 100);
    assert_eq!(by_command["plan"].tokens, 200);
}

#[test]
fn unpriced_provider_model_pair_defaults_to_free() {
    let registry = PricingRegistry::default();
    assert_eq!(registry.lookup(Provider::Openai, "unknown-model"), ModelPricing::FREE);
}
