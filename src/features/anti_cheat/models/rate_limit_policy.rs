use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};

use super::action_record::ActionRecord;
use super::decision::{DenyReason, Window};

/// Per-action limits. Every dimension is optional; `None` means unlimited.
///
/// Built once as a literal and never mutated afterwards:
///
/// ```ignore
/// const OPEN_BOOSTER: RateLimitPolicy = RateLimitPolicy::new()
///     .max_per_minute(10)
///     .min_delay_ms(1000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RateLimitPolicy {
    pub max_per_minute: Option<u32>,
    pub max_per_hour: Option<u32>,
    pub min_delay_ms: Option<u64>,
}

impl RateLimitPolicy {
    pub const fn new() -> Self {
        Self {
            max_per_minute: None,
            max_per_hour: None,
            min_delay_ms: None,
        }
    }

    pub const fn max_per_minute(self, limit: u32) -> Self {
        Self {
            max_per_minute: Some(limit),
            ..self
        }
    }

    pub const fn max_per_hour(self, limit: u32) -> Self {
        Self {
            max_per_hour: Some(limit),
            ..self
        }
    }

    pub const fn min_delay_ms(self, millis: u64) -> Self {
        Self {
            min_delay_ms: Some(millis),
            ..self
        }
    }

    pub fn is_unlimited(&self) -> bool {
        self.max_per_minute.is_none() && self.max_per_hour.is_none() && self.min_delay_ms.is_none()
    }

    /// How far back a ledger record must remember calls for this evaluation
    pub fn retention() -> TimeDelta {
        Window::Hour.length()
    }

    /// Decide whether a call at `now` may proceed given the calls already in `record`.
    /// Checks run in order: minimum delay, minute window, hour window.
    pub fn evaluate(&self, record: &ActionRecord, now: DateTime<Utc>) -> Option<DenyReason> {
        if let (Some(min_delay_ms), Some(latest)) = (self.min_delay_ms, record.latest()) {
            let min_delay = millis_delta(min_delay_ms);
            let elapsed = now - latest;
            if elapsed < min_delay {
                return Some(DenyReason::TooFrequent {
                    min_delay: Duration::from_millis(min_delay_ms),
                    retry_after: to_std(min_delay.checked_sub(&elapsed).unwrap_or(TimeDelta::MAX)),
                });
            }
        }

        let windows = [
            (Window::Minute, self.max_per_minute),
            (Window::Hour, self.max_per_hour),
        ];
        for (window, limit) in windows {
            let Some(limit) = limit else { continue };
            if let Some(retry_after) = window_retry_after(record, window, limit, now) {
                return Some(DenyReason::RateLimitExceeded {
                    window,
                    limit,
                    retry_after,
                });
            }
        }

        None
    }
}

/// `Some(wait)` when the window already holds `limit` calls; the wait is the
/// time until enough of them slide out for one more call to fit.
fn window_retry_after(
    record: &ActionRecord,
    window: Window,
    limit: u32,
    now: DateTime<Utc>,
) -> Option<Duration> {
    let cutoff = now - window.length();
    let count = record.count_since(cutoff);
    let limit = limit as usize;

    if count < limit {
        return None;
    }
    if limit == 0 {
        return Some(to_std(window.length()));
    }

    let wait = record
        .nth_since(cutoff, count - limit)
        .map(|blocking| blocking + window.length() - now)
        .unwrap_or_else(|| window.length());

    Some(to_std(wait))
}

fn millis_delta(millis: u64) -> TimeDelta {
    i64::try_from(millis)
        .ok()
        .and_then(TimeDelta::try_milliseconds)
        .unwrap_or(TimeDelta::MAX)
}

fn to_std(delta: TimeDelta) -> Duration {
    delta.to_std().unwrap_or(Duration::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::anti_cheat::models::{ActionKey, LedgerKey};
    use chrono::TimeZone;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap()
    }

    fn record_with(offsets_ms: &[i64]) -> ActionRecord {
        let mut rec = ActionRecord::new(LedgerKey::new("u", ActionKey::from_static("a")));
        for ms in offsets_ms {
            rec.push(t0() + TimeDelta::milliseconds(*ms));
        }
        rec
    }

    #[test]
    fn test_unlimited_policy_always_allows() {
        let policy = RateLimitPolicy::new();
        assert!(policy.is_unlimited());

        let rec = record_with(&[0, 1, 2, 3]);
        assert!(policy.evaluate(&rec, t0() + TimeDelta::milliseconds(3)).is_none());
    }

    #[test]
    fn test_min_delay_reports_remaining_wait() {
        let policy = RateLimitPolicy::new().min_delay_ms(1000);
        let rec = record_with(&[0]);

        let reason = policy
            .evaluate(&rec, t0() + TimeDelta::milliseconds(400))
            .unwrap();

        assert_eq!(
            reason,
            DenyReason::TooFrequent {
                min_delay: Duration::from_millis(1000),
                retry_after: Duration::from_millis(600),
            }
        );
        assert!(policy
            .evaluate(&rec, t0() + TimeDelta::milliseconds(1000))
            .is_none());
    }

    #[test]
    fn test_minute_window_retry_after_points_at_oldest_blocking_call() {
        let policy = RateLimitPolicy::new().max_per_minute(3);
        let rec = record_with(&[0, 10_000, 20_000]);
        let now = t0() + TimeDelta::seconds(30);

        let reason = policy.evaluate(&rec, now).unwrap();

        // the call at t=0 leaves the window at t=60s
        assert_eq!(reason.retry_after(), Duration::from_secs(30));
        assert!(matches!(
            reason,
            DenyReason::RateLimitExceeded {
                window: Window::Minute,
                limit: 3,
                ..
            }
        ));
    }

    #[test]
    fn test_minute_checked_before_hour() {
        let policy = RateLimitPolicy::new().max_per_minute(1).max_per_hour(1);
        let rec = record_with(&[0]);

        let reason = policy.evaluate(&rec, t0() + TimeDelta::seconds(1)).unwrap();

        assert_eq!(reason.kind(), "minute_limit");
    }

    #[test]
    fn test_hour_window_counts_calls_older_than_a_minute() {
        let policy = RateLimitPolicy::new().max_per_minute(10).max_per_hour(2);
        let rec = record_with(&[0, 120_000]);

        let reason = policy
            .evaluate(&rec, t0() + TimeDelta::seconds(600))
            .unwrap();

        assert_eq!(reason.kind(), "hour_limit");
        assert_eq!(reason.retry_after(), Duration::from_secs(3000));
    }

    #[test]
    fn test_zero_limit_denies_for_a_full_window() {
        let policy = RateLimitPolicy::new().max_per_minute(0);
        let rec = record_with(&[]);

        let reason = policy.evaluate(&rec, t0()).unwrap();

        assert_eq!(reason.retry_after(), Duration::from_secs(60));
    }
}
