use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::features::quests::models::Quest;

/// Catalog entry with the caller's availability
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct QuestDto {
    pub id: String,
    pub name: String,
    pub location: String,
    pub reward_berrys: i64,
    pub cooldown_secs: u64,
    pub available: bool,
    /// End of the running cooldown; absent when the quest is available
    pub available_at: Option<DateTime<Utc>>,
}

impl QuestDto {
    pub fn new(quest: &Quest, available_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> Self {
        let available_at = available_at.filter(|at| *at > now);
        Self {
            id: quest.id.to_string(),
            name: quest.name.to_string(),
            location: quest.location.to_string(),
            reward_berrys: quest.reward_berrys,
            cooldown_secs: quest.cooldown.as_secs(),
            available: available_at.is_none(),
            available_at,
        }
    }
}

/// Request DTO for completing a quest
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct CompleteQuestDto {
    /// Client-side completion instant; checked against the stored cooldown
    pub requested_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CompleteQuestResponseDto {
    pub quest_id: String,
    pub reward_berrys: i64,
    /// Balance after the reward
    pub berrys: i64,
    pub next_available_at: DateTime<Utc>,
}
