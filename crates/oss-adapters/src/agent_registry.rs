// SPDX-License-Identifier: MIT

//! Agent Registry: a capability contract plus per-agent runtime state held
//! outside the agent (spec.md section 4.6, and section 9 "Pluggable agents").

use crate::error::AdapterError;
use async_trait::async_trait;
use oss_core::{AgentConfig, AgentMetadata, AgentStatus, UNHEALTHY_THRESHOLD};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

/// Uniform lifecycle every background agent implements.
#[async_trait]
pub trait BackgroundAgent: Send + Sync {
    fn metadata(&self) -> AgentMetadata;
    async fn initialize(&self) -> Result<(), AdapterError>;
    async fn start(&self) -> Result<(), AdapterError>;
    async fn stop(&self) -> Result<(), AdapterError>;
    async fn poll(&self) -> Result<(), AdapterError>;
}

/// Registry-level events emitted on health transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryEvent {
    AgentHealthy { name: String },
    AgentUnhealthy { name: String },
}

struct RegisteredAgent {
    agent: Arc<dyn BackgroundAgent>,
    config: AgentConfig,
    status: Mutex<AgentStatus>,
}

/// Holds registered agents and their runtime state. Agents never see each
/// other's status; only the registry schedules and observes them.
#[derive(Default)]
pub struct AgentRegistry {
    agents: HashMap<String, RegisteredAgent>,
}

impl AgentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, agent: Arc<dyn BackgroundAgent>, config: AgentConfig) {
        let name = agent.metadata().name;
        self.agents.insert(name, RegisteredAgent { agent, config, status: Mutex::new(AgentStatus::default()) });
    }

    pub fn status_of(&self, name: &str) -> Option<AgentStatus> {
        self.agents.get(name).map(|a| a.status.lock().clone())
    }

    /// Names of every registered agent, for callers that poll each on a schedule.
    pub fn agent_names(&self) -> Vec<String> {
        self.agents.keys().cloned().collect()
    }

    pub async fn start_agent(&self, name: &str) -> Result<(), AdapterError> {
        let entry = self.agents.get(name).ok_or_else(|| AdapterError::AgentInit(format!("unknown agent '{name}'")))?;
        if !entry.config.enabled {
            return Ok(());
        }
        entry.agent.initialize().await?;
        entry.agent.start().await?;
        entry.status.lock().is_running = true;
        Ok(())
    }

    pub async fn stop_agent(&self, name: &str) -> Result<(), AdapterError> {
        let entry = self.agents.get(name).ok_or_else(|| AdapterError::AgentInit(format!("unknown agent '{name}'")))?;
        entry.agent.stop().await?;
        entry.status.lock().is_running = false;
        Ok(())
    }

    pub async fn restart_agent(&self, name: &str) -> Result<(), AdapterError> {
        self.stop_agent(name).await?;
        self.start_agent(name).await
    }

    pub async fn start_all(&self) -> Vec<(String, Result<(), AdapterError>)> {
        let mut results = Vec::new();
        for name in self.agents.keys() {
            results.push((name.clone(), self.start_agent(name).await));
        }
        results
    }

    pub async fn stop_all(&self) -> Vec<(String, Result<(), AdapterError>)> {
        let mut results = Vec::new();
        for name in self.agents.keys() {
            results.push((name.clone(), self.stop_agent(name).await));
        }
        results
    }

    /// Run one poll for `name`, updating its runtime status and returning a
    /// registry event on any health-state transition (spec.md section 4.6).
    pub async fn poll_agent(&self, name: &str, now: chrono::DateTime<chrono::Utc>) -> Option<RegistryEvent> {
        let entry = self.agents.get(name)?;
        let result = entry.agent.poll().await;
        let mut status = entry.status.lock();
        status.last_poll_time = Some(now);

        match result {
            Ok(()) => {
                let was_unhealthy = status.error_count >= UNHEALTHY_THRESHOLD;
                status.error_count = 0;
                status.last_error = None;
                if was_unhealthy {
                    return Some(RegistryEvent::AgentHealthy { name: name.to_string() });
                }
                None
            }
            Err(e) => {
                status.error_count += 1;
                status.last_error = Some(e.to_string());
                if status.error_count == UNHEALTHY_THRESHOLD {
                    return Some(RegistryEvent::AgentUnhealthy { name: name.to_string() });
                }
                None
            }
        }
    }
}

#[cfg(test)]
#[path = "agent_registry_tests.rs"]
mod tests;
