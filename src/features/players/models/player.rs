use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// Player wallet row, keyed by the authenticated account id
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Player {
    pub id: String,
    pub berrys: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Stored expiry of one cooldown-gated action
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PlayerCooldown {
    pub action: String,
    pub available_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct LeaderboardEntry {
    pub player_id: String,
    pub berrys: i64,
    pub card_count: i64,
}
