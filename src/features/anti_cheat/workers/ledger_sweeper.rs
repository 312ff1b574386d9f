use std::time::Duration;

use tokio::time::interval;

use crate::core::config::AntiCheatConfig;
use crate::features::anti_cheat::services::AntiCheatGuard;

/// Records must outlive the hour window or hour limits could be bypassed by idling
const MIN_IDLE_TTL: Duration = Duration::from_secs(3600);

/// Background worker that drops ledger records of players gone idle
pub struct LedgerSweeper {
    guard: AntiCheatGuard,
    interval: Duration,
    idle_ttl: Duration,
}

impl LedgerSweeper {
    pub fn new(guard: AntiCheatGuard, interval: Duration, idle_ttl: Duration) -> Self {
        Self {
            guard,
            interval: interval.max(Duration::from_secs(1)),
            idle_ttl: idle_ttl.max(MIN_IDLE_TTL),
        }
    }

    pub fn from_config(guard: AntiCheatGuard, config: &AntiCheatConfig) -> Self {
        Self::new(guard, config.sweep_interval, config.idle_ttl)
    }

    /// Run the sweeper in a background loop
    pub async fn run(&self) {
        tracing::info!(
            "Starting anti-cheat ledger sweeper (every {:?}, idle ttl {:?})",
            self.interval,
            self.idle_ttl
        );

        let mut interval = interval(self.interval);

        loop {
            interval.tick().await;
            self.sweep_once().await;
        }
    }

    /// Evict idle records once. Returns how many were dropped
    pub async fn sweep_once(&self) -> usize {
        let evicted = self.guard.evict_idle(self.idle_ttl).await;
        if evicted > 0 {
            tracing::debug!(
                "Evicted {} idle anti-cheat records ({} remaining)",
                evicted,
                self.guard.tracked_records()
            );
        }
        evicted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::anti_cheat::models::{ActionKey, RateLimitPolicy};
    use crate::features::anti_cheat::services::clock::ManualClock;
    use crate::features::anti_cheat::services::InMemoryActionLedger;
    use chrono::{TimeZone, Utc};
    use std::sync::Arc;

    #[test]
    fn test_idle_ttl_never_shorter_than_hour_window() {
        let sweeper = LedgerSweeper::new(
            AntiCheatGuard::in_memory(true),
            Duration::ZERO,
            Duration::from_secs(60),
        );

        assert_eq!(sweeper.idle_ttl, MIN_IDLE_TTL);
        assert_eq!(sweeper.interval, Duration::from_secs(1));
    }

    #[tokio::test]
    async fn test_sweep_once_drops_idle_records() {
        let clock = Arc::new(ManualClock::new(
            Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
        ));
        let guard = AntiCheatGuard::new(Arc::new(InMemoryActionLedger::new()), clock.clone(), true);
        let policy = RateLimitPolicy::new().max_per_hour(100);

        guard
            .check("player-1", &ActionKey::from_static("open_booster"), &policy)
            .await;
        let sweeper = LedgerSweeper::new(guard.clone(), Duration::from_secs(60), MIN_IDLE_TTL);

        assert_eq!(sweeper.sweep_once().await, 0);

        clock.advance_ms(2 * 3600 * 1000);
        assert_eq!(sweeper.sweep_once().await, 1);
        assert_eq!(guard.tracked_records(), 0);
    }
}
