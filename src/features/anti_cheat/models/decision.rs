use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::core::error::{AppError, Result};

/// Trailing window a call count is bounded over
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Window {
    Minute,
    Hour,
}

impl Window {
    pub fn length(&self) -> chrono::Duration {
        match self {
            Window::Minute => chrono::Duration::seconds(60),
            Window::Hour => chrono::Duration::seconds(3600),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Window::Minute => "minute",
            Window::Hour => "hour",
        }
    }
}

/// Why the guard refused a call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DenyReason {
    TooFrequent {
        min_delay: Duration,
        retry_after: Duration,
    },
    RateLimitExceeded {
        window: Window,
        limit: u32,
        retry_after: Duration,
    },
}

impl DenyReason {
    pub fn retry_after(&self) -> Duration {
        match self {
            DenyReason::TooFrequent { retry_after, .. }
            | DenyReason::RateLimitExceeded { retry_after, .. } => *retry_after,
        }
    }

    /// Short machine-friendly label, used in logs
    pub fn kind(&self) -> &'static str {
        match self {
            DenyReason::TooFrequent { .. } => "too_frequent",
            DenyReason::RateLimitExceeded {
                window: Window::Minute,
                ..
            } => "minute_limit",
            DenyReason::RateLimitExceeded {
                window: Window::Hour,
                ..
            } => "hour_limit",
        }
    }
}

impl fmt::Display for DenyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DenyReason::TooFrequent { min_delay, .. } => write!(
                f,
                "Too frequent: wait at least {} ms between attempts",
                min_delay.as_millis()
            ),
            DenyReason::RateLimitExceeded { window, limit, .. } => write!(
                f,
                "Rate limit exceeded: at most {} per {}",
                limit,
                window.as_str()
            ),
        }
    }
}

impl From<DenyReason> for AppError {
    fn from(reason: DenyReason) -> Self {
        let message = reason.to_string();
        match reason {
            DenyReason::TooFrequent { retry_after, .. } => AppError::TooFrequent {
                message,
                retry_after,
            },
            DenyReason::RateLimitExceeded { retry_after, .. } => AppError::RateLimitExceeded {
                message,
                retry_after,
            },
        }
    }
}

/// Outcome of a guard check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny(DenyReason),
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allow)
    }

    pub fn into_result(self) -> Result<()> {
        match self {
            Decision::Allow => Ok(()),
            Decision::Deny(reason) => Err(reason.into()),
        }
    }
}

/// Read-only view of one (user, action) ledger record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionUsage {
    pub used_last_minute: usize,
    pub used_last_hour: usize,
    pub last_attempt_at: Option<DateTime<Utc>>,
    /// `None` when a call would be allowed right now
    pub next_allowed_at: Option<DateTime<Utc>>,
}
