use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};

use crate::core::config::AntiCheatConfig;
use crate::core::error::{AppError, Result};

/// Reject a request whose declared prior balance disagrees with the stored one
/// by more than `tolerance`
pub fn verify_resource(declared: i64, stored: i64, tolerance: i64) -> Result<()> {
    let drift = declared.abs_diff(stored);
    if drift > tolerance.unsigned_abs() {
        return Err(AppError::StaleState(format!(
            "Stale state: declared balance {} does not match current balance {}",
            declared, stored
        )));
    }
    Ok(())
}

/// Reject a cooldown-gated request whose declared instant precedes the stored
/// cooldown expiry, or lies implausibly far in the future.
///
/// The expiry is enforced against server time as well, so the skew allowance
/// never shortens a running cooldown.
pub fn verify_cooldown(
    declared_at: DateTime<Utc>,
    available_at: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
    max_skew: Duration,
) -> Result<()> {
    let skew = TimeDelta::from_std(max_skew).unwrap_or(TimeDelta::MAX);
    if declared_at - now > skew {
        return Err(AppError::StaleState(format!(
            "Stale state: requested_at {} is ahead of server time",
            declared_at.to_rfc3339()
        )));
    }

    match available_at {
        Some(available_at) if declared_at < available_at || now < available_at => {
            Err(AppError::CooldownActive {
                message: format!(
                    "Action not yet available: cooldown ends at {}",
                    available_at.to_rfc3339()
                ),
                available_at,
                retry_after: (available_at - now).to_std().unwrap_or(Duration::ZERO),
            })
        }
        _ => Ok(()),
    }
}

/// Consistency gates configured from the anti-cheat settings
#[derive(Debug, Clone, Copy)]
pub struct ConsistencyChecker {
    balance_tolerance: i64,
    clock_skew: Duration,
}

impl ConsistencyChecker {
    pub fn new(balance_tolerance: i64, clock_skew: Duration) -> Self {
        Self {
            balance_tolerance,
            clock_skew,
        }
    }

    pub fn from_config(config: &AntiCheatConfig) -> Self {
        Self::new(config.balance_tolerance, config.clock_skew)
    }

    /// No-op when the client did not declare a balance
    pub fn check_balance(&self, declared: Option<i64>, stored: i64) -> Result<()> {
        match declared {
            Some(declared) => verify_resource(declared, stored, self.balance_tolerance),
            None => Ok(()),
        }
    }

    /// Falls back to `now` when the client did not declare an instant
    pub fn check_cooldown(
        &self,
        declared_at: Option<DateTime<Utc>>,
        available_at: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> Result<()> {
        verify_cooldown(
            declared_at.unwrap_or(now),
            available_at,
            now,
            self.clock_skew,
        )
    }
}

impl Default for ConsistencyChecker {
    fn default() -> Self {
        Self::from_config(&AntiCheatConfig::default())
    }
}
