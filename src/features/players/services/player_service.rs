use chrono::{DateTime, Utc};
use sqlx::{SqliteConnection, SqlitePool};

use crate::core::config::EconomyConfig;
use crate::core::error::{AppError, Result};
use crate::features::players::dtos::{LeaderboardEntryDto, PlayerProfileDto};
use crate::features::players::models::{LeaderboardEntry, Player, PlayerCooldown};
use crate::shared::types::PaginationQuery;

/// Service owning player wallets and cooldown expiries.
///
/// The `*_in` methods run on a caller-provided connection so feature services
/// can compose them inside one transaction.
pub struct PlayerService {
    pool: SqlitePool,
    starting_berrys: i64,
}

impl PlayerService {
    pub fn new(pool: SqlitePool, economy: &EconomyConfig) -> Self {
        Self {
            pool,
            starting_berrys: economy.starting_berrys,
        }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Fetch a player, creating the wallet with the starting balance on first access
    pub async fn ensure_player_in(
        &self,
        conn: &mut SqliteConnection,
        player_id: &str,
    ) -> Result<Player> {
        let now = Utc::now();

        sqlx::query(
            r#"
            INSERT INTO players (id, berrys, created_at, updated_at)
            VALUES (?, ?, ?, ?)
            ON CONFLICT (id) DO NOTHING
            "#,
        )
        .bind(player_id)
        .bind(self.starting_berrys)
        .bind(now)
        .bind(now)
        .execute(&mut *conn)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create player {}: {:?}", player_id, e);
            AppError::Database(e)
        })?;

        let player = sqlx::query_as::<_, Player>(
            "SELECT id, berrys, created_at, updated_at FROM players WHERE id = ?",
        )
        .bind(player_id)
        .fetch_one(&mut *conn)
        .await?;

        Ok(player)
    }

    /// Subtract `amount` from the balance. Fails without touching the row when
    /// the balance is too low. Returns the new balance
    pub async fn debit_in(
        &self,
        conn: &mut SqliteConnection,
        player_id: &str,
        amount: i64,
    ) -> Result<i64> {
        let balance: Option<i64> = sqlx::query_scalar(
            r#"
            UPDATE players
            SET berrys = berrys - ?, updated_at = ?
            WHERE id = ? AND berrys >= ?
            RETURNING berrys
            "#,
        )
        .bind(amount)
        .bind(Utc::now())
        .bind(player_id)
        .bind(amount)
        .fetch_optional(&mut *conn)
        .await?;

        balance.ok_or_else(|| {
            AppError::BadRequest(format!("Insufficient berrys: {} required", amount))
        })
    }

    /// Add `amount` to the balance. Returns the new balance
    pub async fn credit_in(
        &self,
        conn: &mut SqliteConnection,
        player_id: &str,
        amount: i64,
    ) -> Result<i64> {
        sqlx::query_scalar::<_, i64>(
            r#"
            UPDATE players
            SET berrys = berrys + ?, updated_at = ?
            WHERE id = ?
            RETURNING berrys
            "#,
        )
        .bind(amount)
        .bind(Utc::now())
        .bind(player_id)
        .fetch_optional(&mut *conn)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Player '{}' not found", player_id)))
    }

    /// Stored expiry of a cooldown-gated action, if one was ever set
    pub async fn cooldown_in(
        &self,
        conn: &mut SqliteConnection,
        player_id: &str,
        action: &str,
    ) -> Result<Option<DateTime<Utc>>> {
        let available_at = sqlx::query_scalar(
            "SELECT available_at FROM player_cooldowns WHERE player_id = ? AND action = ?",
        )
        .bind(player_id)
        .bind(action)
        .fetch_optional(&mut *conn)
        .await?;

        Ok(available_at)
    }

    pub async fn set_cooldown_in(
        &self,
        conn: &mut SqliteConnection,
        player_id: &str,
        action: &str,
        available_at: DateTime<Utc>,
    ) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO player_cooldowns (player_id, action, available_at)
            VALUES (?, ?, ?)
            ON CONFLICT (player_id, action) DO UPDATE SET available_at = excluded.available_at
            "#,
        )
        .bind(player_id)
        .bind(action)
        .bind(available_at)
        .execute(&mut *conn)
        .await?;

        Ok(())
    }

    /// All stored cooldowns of a player, including expired ones
    pub async fn cooldowns(&self, player_id: &str) -> Result<Vec<PlayerCooldown>> {
        let cooldowns = sqlx::query_as::<_, PlayerCooldown>(
            r#"
            SELECT action, available_at
            FROM player_cooldowns
            WHERE player_id = ?
            ORDER BY action ASC
            "#,
        )
        .bind(player_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch cooldowns of {}: {:?}", player_id, e);
            AppError::Database(e)
        })?;

        Ok(cooldowns)
    }

    pub async fn get_profile(&self, player_id: &str) -> Result<PlayerProfileDto> {
        let mut conn = self.pool.acquire().await?;
        let player = self.ensure_player_in(&mut conn, player_id).await?;

        let card_count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM player_cards WHERE player_id = ?")
                .bind(player_id)
                .fetch_one(&mut *conn)
                .await?;
        drop(conn);

        let now = Utc::now();
        let cooldowns = self
            .cooldowns(player_id)
            .await?
            .into_iter()
            .filter(|cooldown| cooldown.available_at > now)
            .map(Into::into)
            .collect();

        Ok(PlayerProfileDto {
            player_id: player.id,
            berrys: player.berrys,
            card_count,
            cooldowns,
            created_at: player.created_at,
        })
    }

    /// Players ranked by collection size, then balance. Returns the page and the total count
    pub async fn leaderboard(
        &self,
        query: &PaginationQuery,
    ) -> Result<(Vec<LeaderboardEntryDto>, i64)> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM players")
            .fetch_one(&self.pool)
            .await?;

        let entries = sqlx::query_as::<_, LeaderboardEntry>(
            r#"
            SELECT p.id AS player_id, p.berrys AS berrys, COUNT(c.id) AS card_count
            FROM players p
            LEFT JOIN player_cards c ON c.player_id = p.id
            GROUP BY p.id, p.berrys
            ORDER BY card_count DESC, berrys DESC, player_id ASC
            LIMIT ? OFFSET ?
            "#,
        )
        .bind(query.limit())
        .bind(query.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch leaderboard: {:?}", e);
            AppError::Database(e)
        })?;

        let first_rank = query.offset() + 1;
        let ranked = entries
            .into_iter()
            .zip(first_rank..)
            .map(|(entry, rank)| LeaderboardEntryDto::new(rank, entry))
            .collect();

        Ok((ranked, total))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::test_pool;
    use chrono::TimeDelta;

    async fn service() -> PlayerService {
        PlayerService::new(test_pool().await, &EconomyConfig::default())
    }

    #[tokio::test]
    async fn test_player_created_lazily_with_starting_balance() {
        let service = service().await;
        let mut conn = service.pool().acquire().await.unwrap();

        let player = service.ensure_player_in(&mut conn, "p1").await.unwrap();
        assert_eq!(player.berrys, EconomyConfig::default().starting_berrys);

        // second call must not reset the wallet
        service.debit_in(&mut conn, "p1", 30).await.unwrap();
        let again = service.ensure_player_in(&mut conn, "p1").await.unwrap();
        assert_eq!(again.berrys, player.berrys - 30);
    }

    #[tokio::test]
    async fn test_debit_refuses_overdraft() {
        let service = service().await;
        let mut conn = service.pool().acquire().await.unwrap();
        let player = service.ensure_player_in(&mut conn, "p1").await.unwrap();

        let err = service
            .debit_in(&mut conn, "p1", player.berrys + 1)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));

        let balance = service.debit_in(&mut conn, "p1", player.berrys).await.unwrap();
        assert_eq!(balance, 0);
    }

    #[tokio::test]
    async fn test_credit_unknown_player_is_not_found() {
        let service = service().await;
        let mut conn = service.pool().acquire().await.unwrap();

        let err = service.credit_in(&mut conn, "ghost", 5).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_cooldown_upsert() {
        let service = service().await;
        let mut conn = service.pool().acquire().await.unwrap();
        service.ensure_player_in(&mut conn, "p1").await.unwrap();

        assert!(service
            .cooldown_in(&mut conn, "p1", "quest:forest-patrol")
            .await
            .unwrap()
            .is_none());

        let first = Utc::now() + TimeDelta::minutes(5);
        let second = first + TimeDelta::minutes(5);
        service
            .set_cooldown_in(&mut conn, "p1", "quest:forest-patrol", first)
            .await
            .unwrap();
        service
            .set_cooldown_in(&mut conn, "p1", "quest:forest-patrol", second)
            .await
            .unwrap();

        let stored = service
            .cooldown_in(&mut conn, "p1", "quest:forest-patrol")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored, second);
    }

    #[tokio::test]
    async fn test_profile_hides_expired_cooldowns() {
        let service = service().await;
        {
            let mut conn = service.pool().acquire().await.unwrap();
            service.ensure_player_in(&mut conn, "p1").await.unwrap();
            service
                .set_cooldown_in(&mut conn, "p1", "quest:a", Utc::now() - TimeDelta::minutes(1))
                .await
                .unwrap();
            service
                .set_cooldown_in(&mut conn, "p1", "quest:b", Utc::now() + TimeDelta::minutes(1))
                .await
                .unwrap();
        }

        let profile = service.get_profile("p1").await.unwrap();

        assert_eq!(profile.card_count, 0);
        assert_eq!(profile.cooldowns.len(), 1);
        assert_eq!(profile.cooldowns[0].action, "quest:b");
    }

    #[tokio::test]
    async fn test_leaderboard_ranks_across_pages() {
        let service = service().await;
        {
            let mut conn = service.pool().acquire().await.unwrap();
            for (id, spend) in [("a", 0), ("b", 50), ("c", 20)] {
                service.ensure_player_in(&mut conn, id).await.unwrap();
                service.debit_in(&mut conn, id, spend).await.unwrap();
            }
        }

        let first_page = PaginationQuery {
            page: 1,
            page_size: 2,
        };
        let (entries, total) = service.leaderboard(&first_page).await.unwrap();
        assert_eq!(total, 3);
        assert_eq!(entries[0].player_id, "a");
        assert_eq!(entries[1].player_id, "c");

        let second_page = PaginationQuery {
            page: 2,
            page_size: 2,
        };
        let (entries, _) = service.leaderboard(&second_page).await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].rank, 3);
        assert_eq!(entries[0].player_id, "b");
    }
}
