use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};

use crate::core::error::{AppError, Result};
use crate::features::anti_cheat::services::Clock;
use crate::features::anti_cheat::ConsistencyChecker;
use crate::features::players::PlayerService;
use crate::features::quests::dtos::{CompleteQuestResponseDto, QuestDto};
use crate::features::quests::models::{Quest, QUESTS};
use crate::shared::validation::SLUG_REGEX;

/// Service running the quest cooldown cycle: available -> completed -> cooling down -> available
pub struct QuestService {
    players: Arc<PlayerService>,
    consistency: ConsistencyChecker,
    clock: Arc<dyn Clock>,
}

impl QuestService {
    pub fn new(
        players: Arc<PlayerService>,
        consistency: ConsistencyChecker,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            players,
            consistency,
            clock,
        }
    }

    pub async fn list(&self, player_id: &str) -> Result<Vec<QuestDto>> {
        let now = self.clock.now();
        let cooldowns: HashMap<String, DateTime<Utc>> = self
            .players
            .cooldowns(player_id)
            .await?
            .into_iter()
            .map(|cooldown| (cooldown.action, cooldown.available_at))
            .collect();

        Ok(QUESTS
            .iter()
            .map(|quest| {
                let available_at = cooldowns.get(&quest.cooldown_key()).copied();
                QuestDto::new(quest, available_at, now)
            })
            .collect())
    }

    /// Complete a quest: verify the cooldown, pay the reward and start the next cooldown
    pub async fn complete(
        &self,
        player_id: &str,
        quest_id: &str,
        requested_at: Option<DateTime<Utc>>,
    ) -> Result<CompleteQuestResponseDto> {
        if !SLUG_REGEX.is_match(quest_id) {
            return Err(AppError::Validation(format!(
                "Invalid quest id '{}'",
                quest_id
            )));
        }
        let quest = Quest::find(quest_id)
            .ok_or_else(|| AppError::NotFound(format!("Quest '{}' not found", quest_id)))?;
        let cooldown_key = quest.cooldown_key();

        let mut tx = self.players.pool().begin().await.map_err(|e| {
            tracing::error!("Failed to begin quest transaction: {:?}", e);
            AppError::Database(e)
        })?;

        self.players.ensure_player_in(&mut tx, player_id).await?;
        let available_at = self
            .players
            .cooldown_in(&mut tx, player_id, &cooldown_key)
            .await?;

        let now = self.clock.now();
        self.consistency
            .check_cooldown(requested_at, available_at, now)?;

        let berrys = self
            .players
            .credit_in(&mut tx, player_id, quest.reward_berrys)
            .await?;

        let next_available_at =
            now + TimeDelta::from_std(quest.cooldown).unwrap_or(TimeDelta::zero());
        self.players
            .set_cooldown_in(&mut tx, player_id, &cooldown_key, next_available_at)
            .await?;

        tx.commit().await?;

        tracing::info!(
            "Player {} completed quest {} (+{} berrys)",
            player_id,
            quest.id,
            quest.reward_berrys
        );

        Ok(CompleteQuestResponseDto {
            quest_id: quest.id.to_string(),
            reward_berrys: quest.reward_berrys,
            berrys,
            next_available_at,
        })
    }
}
