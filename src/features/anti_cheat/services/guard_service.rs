use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};

use crate::features::anti_cheat::models::{
    ActionKey, ActionRecord, ActionUsage, Decision, LedgerKey, RateLimitPolicy, Window,
};

use super::clock::{Clock, SystemClock};
use super::ledger::{ActionLedger, InMemoryActionLedger};

/// Sliding-window rate limiter for state-mutating player actions.
///
/// The ledger and clock are injected so tests run against an isolated store
/// and a controlled time source.
#[derive(Clone)]
pub struct AntiCheatGuard {
    ledger: Arc<dyn ActionLedger>,
    clock: Arc<dyn Clock>,
    enabled: bool,
}

impl AntiCheatGuard {
    pub fn new(ledger: Arc<dyn ActionLedger>, clock: Arc<dyn Clock>, enabled: bool) -> Self {
        Self {
            ledger,
            clock,
            enabled,
        }
    }

    /// Guard backed by a process-local ledger and the system clock
    pub fn in_memory(enabled: bool) -> Self {
        Self::new(
            Arc::new(InMemoryActionLedger::new()),
            Arc::new(SystemClock),
            enabled,
        )
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Check a call by `user_id` for `action` and record it when allowed.
    ///
    /// The clock is read after the per-key lock is taken, so calls serialized
    /// behind each other observe increasing instants.
    pub async fn check(
        &self,
        user_id: &str,
        action: &ActionKey,
        policy: &RateLimitPolicy,
    ) -> Decision {
        if !self.enabled || policy.is_unlimited() {
            return Decision::Allow;
        }

        let key = LedgerKey::new(user_id, action.clone());
        let mut record = self.ledger.acquire(&key).await;
        let now = self.clock.now();
        decide(&mut record, policy, now)
    }

    /// Current usage of one (user, action) under `policy`. Does not record anything
    pub async fn usage(
        &self,
        user_id: &str,
        action: &ActionKey,
        policy: &RateLimitPolicy,
    ) -> ActionUsage {
        let now = self.clock.now();
        let key = LedgerKey::new(user_id, action.clone());

        match self.ledger.snapshot(&key).await {
            Some(record) => usage_of(&record, policy, now),
            None => ActionUsage {
                used_last_minute: 0,
                used_last_hour: 0,
                last_attempt_at: None,
                next_allowed_at: None,
            },
        }
    }

    /// Forget all recorded calls of a user. Returns the number of records dropped
    pub async fn reset_user(&self, user_id: &str) -> usize {
        let removed = self.ledger.remove_user(user_id).await;
        tracing::info!(user_id = %user_id, removed, "Anti-cheat ledger reset");
        removed
    }

    /// Drop records with no call in the last `idle_ttl`
    pub async fn evict_idle(&self, idle_ttl: Duration) -> usize {
        let ttl = TimeDelta::from_std(idle_ttl).unwrap_or(TimeDelta::MAX);
        let idle_before = self
            .clock
            .now()
            .checked_sub_signed(ttl)
            .unwrap_or(DateTime::<Utc>::MIN_UTC);
        self.ledger.evict_idle(idle_before).await
    }

    pub fn tracked_records(&self) -> usize {
        self.ledger.tracked_records()
    }
}

fn decide(record: &mut ActionRecord, policy: &RateLimitPolicy, now: DateTime<Utc>) -> Decision {
    record.prune_before(now - RateLimitPolicy::retention());

    if let Some(reason) = policy.evaluate(record, now) {
        tracing::warn!(
            user_id = %record.key().user_id,
            action = %record.key().action,
            reason = reason.kind(),
            retry_after_ms = reason.retry_after().as_millis() as u64,
            "Anti-cheat guard denied action"
        );
        return Decision::Deny(reason);
    }

    let stored = record.push(now);
    tracing::debug!(
        user_id = %record.key().user_id,
        action = %record.key().action,
        at = %stored,
        "Anti-cheat guard recorded action"
    );
    Decision::Allow
}

fn usage_of(record: &ActionRecord, policy: &RateLimitPolicy, now: DateTime<Utc>) -> ActionUsage {
    let next_allowed_at = policy.evaluate(record, now).map(|reason| {
        now + TimeDelta::from_std(reason.retry_after()).unwrap_or(TimeDelta::zero())
    });

    ActionUsage {
        used_last_minute: record.count_since(now - Window::Minute.length()),
        used_last_hour: record.count_since(now - Window::Hour.length()),
        last_attempt_at: record.latest(),
        next_allowed_at,
    }
}
