//! In-memory usage gate for testing and single-server deployments.
//!
//! Fixed-window counters per user and action. Not suitable for multi-server
//! deployments; production wires the real limits collaborator instead.

use async_trait::async_trait;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, UserId};
use crate::ports::{LimitedAction, UsageGate};

/// Per-action quota configuration.
#[derive(Debug, Clone)]
pub struct UsageLimits {
    pub per_window: HashMap<LimitedAction, u32>,
    pub window: Duration,
}

impl Default for UsageLimits {
    fn default() -> Self {
        let mut per_window = HashMap::new();
        per_window.insert(LimitedAction::CreateDecision, 25);
        per_window.insert(LimitedAction::GenerateScenarios, 50);
        per_window.insert(LimitedAction::RegenerateVerdict, 50);
        Self {
            per_window,
            window: Duration::from_secs(24 * 60 * 60),
        }
    }
}

/// State for one counter window.
#[derive(Debug, Clone)]
struct WindowState {
    count: u32,
    window_start: Instant,
}

/// In-memory usage gate with fixed-window counters.
#[derive(Debug)]
pub struct InMemoryUsageGate {
    limits: UsageLimits,
    windows: RwLock<HashMap<(String, LimitedAction), WindowState>>,
}

impl InMemoryUsageGate {
    /// Creates a gate with the given limits.
    pub fn new(limits: UsageLimits) -> Self {
        Self {
            limits,
            windows: RwLock::new(HashMap::new()),
        }
    }

    /// Creates a gate with default limits.
    pub fn with_defaults() -> Self {
        Self::new(UsageLimits::default())
    }

    /// Creates a gate that never denies (for tests).
    pub fn unlimited() -> Self {
        let mut per_window = HashMap::new();
        for action in [
            LimitedAction::CreateDecision,
            LimitedAction::GenerateScenarios,
            LimitedAction::RegenerateVerdict,
        ] {
            per_window.insert(action, u32::MAX);
        }
        Self::new(UsageLimits {
            per_window,
            window: Duration::from_secs(60),
        })
    }

    fn limit_for(&self, action: LimitedAction) -> u32 {
        self.limits.per_window.get(&action).copied().unwrap_or(0)
    }
}

#[async_trait]
impl UsageGate for InMemoryUsageGate {
    async fn check(&self, user_id: &UserId, action: LimitedAction) -> Result<(), DomainError> {
        let limit = self.limit_for(action);
        let key = (user_id.as_str().to_string(), action);
        let now = Instant::now();

        let mut windows = self.windows.write().await;
        let state = windows.entry(key).or_insert(WindowState {
            count: 0,
            window_start: now,
        });

        if now.duration_since(state.window_start) >= self.limits.window {
            state.count = 0;
            state.window_start = now;
        }

        if state.count >= limit {
            return Err(DomainError::limit_exceeded(format!(
                "Plan limit reached for {}",
                action
            ))
            .with_detail("action", action.to_string())
            .with_detail("limit", limit.to_string()));
        }

        state.count += 1;
        Ok(())
    }
}
