use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::features::players::models::{LeaderboardEntry, PlayerCooldown};

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CooldownDto {
    pub action: String,
    pub available_at: DateTime<Utc>,
}

impl From<PlayerCooldown> for CooldownDto {
    fn from(cooldown: PlayerCooldown) -> Self {
        Self {
            action: cooldown.action,
            available_at: cooldown.available_at,
        }
    }
}

/// Response DTO for the caller's wallet and collection summary
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PlayerProfileDto {
    pub player_id: String,
    pub berrys: i64,
    pub card_count: i64,
    /// Cooldowns still running; expired ones are omitted
    pub cooldowns: Vec<CooldownDto>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LeaderboardEntryDto {
    /// 1-based position across all pages
    pub rank: i64,
    pub player_id: String,
    pub berrys: i64,
    pub card_count: i64,
}

impl LeaderboardEntryDto {
    pub fn new(rank: i64, entry: LeaderboardEntry) -> Self {
        Self {
            rank,
            player_id: entry.player_id,
            berrys: entry.berrys,
            card_count: entry.card_count,
        }
    }
}
