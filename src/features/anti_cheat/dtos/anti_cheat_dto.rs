use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::features::anti_cheat::models::ActionUsage;
use crate::features::anti_cheat::policies::GuardedAction;

/// Literal limits attached to one guarded route
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PolicyDto {
    pub action: String,
    pub description: String,
    /// Absent means unlimited
    pub max_per_minute: Option<u32>,
    pub max_per_hour: Option<u32>,
    pub min_delay_ms: Option<u64>,
}

impl From<&GuardedAction> for PolicyDto {
    fn from(guarded: &GuardedAction) -> Self {
        Self {
            action: guarded.action.to_string(),
            description: guarded.description.to_string(),
            max_per_minute: guarded.policy.max_per_minute,
            max_per_hour: guarded.policy.max_per_hour,
            min_delay_ms: guarded.policy.min_delay_ms,
        }
    }
}

/// Caller's usage of one guarded action
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ActionStatusDto {
    pub policy: PolicyDto,
    pub used_last_minute: usize,
    pub used_last_hour: usize,
    pub last_attempt_at: Option<DateTime<Utc>>,
    /// Earliest instant the next call would be allowed; absent when allowed now
    pub next_allowed_at: Option<DateTime<Utc>>,
}

impl ActionStatusDto {
    pub fn new(guarded: &GuardedAction, usage: ActionUsage) -> Self {
        Self {
            policy: guarded.into(),
            used_last_minute: usage.used_last_minute,
            used_last_hour: usage.used_last_hour,
            last_attempt_at: usage.last_attempt_at,
            next_allowed_at: usage.next_allowed_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AntiCheatStatusDto {
    pub enabled: bool,
    pub actions: Vec<ActionStatusDto>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PolicyListDto {
    pub enabled: bool,
    /// Number of (user, action) records currently held by the ledger
    pub tracked_records: usize,
    pub policies: Vec<PolicyDto>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LedgerResetDto {
    pub user_id: String,
    pub records_removed: usize,
}
