use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::anti_cheat::ConsistencyChecker;
use crate::features::boosters::dtos::{BoosterDto, OpenBoosterDto, OpenBoosterResponseDto};
use crate::features::boosters::models::{DrawnCard, CATALOG};
use crate::features::boosters::services::draw::draw_pack;
use crate::features::players::PlayerService;

/// Service for buying and opening boosters
pub struct BoosterService {
    players: Arc<PlayerService>,
    consistency: ConsistencyChecker,
}

impl BoosterService {
    pub fn new(players: Arc<PlayerService>, consistency: ConsistencyChecker) -> Self {
        Self {
            players,
            consistency,
        }
    }

    pub fn catalog(&self) -> Vec<BoosterDto> {
        CATALOG.iter().map(BoosterDto::from).collect()
    }

    /// Pay for a booster, draw its cards and add them to the collection.
    /// Everything happens in one transaction; a failure leaves the wallet untouched
    pub async fn open(&self, player_id: &str, dto: &OpenBoosterDto) -> Result<OpenBoosterResponseDto> {
        let booster = dto.booster_type.definition();

        let mut tx = self.players.pool().begin().await.map_err(|e| {
            tracing::error!("Failed to begin booster transaction: {:?}", e);
            AppError::Database(e)
        })?;

        let player = self.players.ensure_player_in(&mut tx, player_id).await?;
        self.consistency
            .check_balance(dto.expected_berrys, player.berrys)?;

        let berrys = self
            .players
            .debit_in(&mut tx, player_id, booster.price)
            .await?;

        let cards: Vec<DrawnCard> = {
            let mut rng = rand::rng();
            draw_pack(&mut rng, booster)
        };

        let obtained_at = Utc::now();
        for card in &cards {
            sqlx::query(
                r#"
                INSERT INTO player_cards (id, player_id, card_code, rarity, booster_type, obtained_at)
                VALUES (?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(Uuid::now_v7().to_string())
            .bind(player_id)
            .bind(&card.code)
            .bind(card.rarity.as_str())
            .bind(booster.booster_type.as_str())
            .bind(obtained_at)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        tracing::info!(
            "Player {} opened a {} booster ({} berrys left)",
            player_id,
            booster.booster_type.as_str(),
            berrys
        );

        Ok(OpenBoosterResponseDto {
            booster_type: booster.booster_type,
            cards,
            berrys,
        })
    }
}
