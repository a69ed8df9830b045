// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Circuit breaker registry (C2, spec §4.2). In-memory, guarded by its own
//! lock (spec §5 "shared-resource policy").

use std::collections::HashMap;

use parking_lot::Mutex;
use warden_core::{BreakerConfig, BreakerState, CircuitBreakerState, Clock};

pub struct CircuitBreakerRegistry<C: Clock> {
    clock: C,
    default_config: BreakerConfig,
    breakers: Mutex<HashMap<String, CircuitBreakerState>>,
}

impl<C: Clock> CircuitBreakerRegistry<C> {
    pub fn new(clock: C, default_config: BreakerConfig) -> Self {
        Self { clock, default_config, breakers: Mutex::new(HashMap::new()) }
    }

    /// Unknown name implies closed (spec §4.2). If open and the cooldown
    /// elapsed, the query itself promotes the breaker to half-open.
    pub fn can_execute(&self, name: &str) -> bool {
        let mut breakers = self.breakers.lock();
        let Some(breaker) = breakers.get_mut(name) else {
            return true;
        };
        match breaker.state {
            BreakerState::Closed | BreakerState::HalfOpen => true,
            BreakerState::Open => {
                let opened_at = breaker.opened_at_ms.unwrap_or(0);
                if self.clock.epoch_ms().saturating_sub(opened_at) >= breaker.cooldown_ms {
                    breaker.state = BreakerState::HalfOpen;
                    true
                } else {
                    false
                }
            }
        }
    }

    pub fn record_success(&self, name: &str) {
        let mut breakers = self.breakers.lock();
        let breaker = self.entry(&mut breakers, name);
        breaker.failure_count = 0;
        if breaker.state == BreakerState::HalfOpen {
            breaker.state = BreakerState::Closed;
            breaker.opened_at_ms = None;
        }
    }

    pub fn record_failure(&self, name: &str) {
        let now = self.clock.epoch_ms();
        let mut breakers = self.breakers.lock();
        let threshold = self.default_config.failure_threshold;
        let breaker = self.entry(&mut breakers, name);
        breaker.failure_count += 1;
        breaker.last_failure_at_ms = Some(now);
        match breaker.state {
            BreakerState::Closed if breaker.failure_count >= threshold => {
                breaker.state = BreakerState::Open;
                breaker.opened_at_ms = Some(now);
            }
            BreakerState::HalfOpen => {
                breaker.state = BreakerState::Open;
                breaker.opened_at_ms = Some(now);
            }
            _ => {}
        }
    }

    pub fn reset(&self, name: &str) {
        let mut breakers = self.breakers.lock();
        breakers.insert(
            name.to_string(),
            CircuitBreakerState::closed(name, self.default_config.cooldown_ms),
        );
    }

    /// Walks all breakers promoting elapsed-cooldown open → half-open,
    /// returning the set that changed (spec §4.2 `evaluate`).
    pub fn evaluate(&self) -> Vec<CircuitBreakerState> {
        let now = self.clock.epoch_ms();
        let mut breakers = self.breakers.lock();
        let mut changed = Vec::new();
        for breaker in breakers.values_mut() {
            if breaker.state == BreakerState::Open {
                let opened_at = breaker.opened_at_ms.unwrap_or(0);
                if now.saturating_sub(opened_at) >= breaker.cooldown_ms {
                    breaker.state = BreakerState::HalfOpen;
                    changed.push(breaker.clone());
                }
            }
        }
        changed
    }

    pub fn get_state(&self) -> Vec<CircuitBreakerState> {
        self.breakers.lock().values().cloned().collect()
    }

    fn entry<'a>(
        &self,
        breakers: &'a mut HashMap<String, CircuitBreakerState>,
        name: &str,
    ) -> &'a mut CircuitBreakerState {
        breakers
            .entry(name.to_string())
            .or_insert_with(|| CircuitBreakerState::closed(name, self.default_config.cooldown_ms))
    }
}

#[cfg(test)]
#[path = "breaker_tests.rs"]
mod tests;
