use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};

use crate::core::error::Result;
use crate::core::extractor::AppJson;
use crate::features::auth::guards::RequirePlayer;
use crate::features::quests::dtos::{CompleteQuestDto, CompleteQuestResponseDto, QuestDto};
use crate::features::quests::services::QuestService;
use crate::shared::types::ApiResponse;

/// List quests with the caller's availability
#[utoipa::path(
    get,
    path = "/api/quests",
    responses(
        (status = 200, description = "Quest catalog", body = ApiResponse<Vec<QuestDto>>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "quests",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_quests(
    RequirePlayer(user): RequirePlayer,
    State(service): State<Arc<QuestService>>,
) -> Result<Json<ApiResponse<Vec<QuestDto>>>> {
    let quests = service.list(&user.account_id).await?;
    Ok(Json(ApiResponse::success(Some(quests), None, None)))
}

/// Complete a quest and collect its reward
#[utoipa::path(
    post,
    path = "/api/quests/{quest_id}/complete",
    params(
        ("quest_id" = String, Path, description = "Quest slug")
    ),
    request_body(content = Option<CompleteQuestDto>, description = "Optional declared request time"),
    responses(
        (status = 200, description = "Quest completed", body = ApiResponse<CompleteQuestResponseDto>),
        (status = 400, description = "Invalid quest id or implausible timestamp"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Quest not found"),
        (status = 429, description = "Cooldown running or completed too frequently")
    ),
    tag = "quests",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn complete_quest(
    RequirePlayer(user): RequirePlayer,
    State(service): State<Arc<QuestService>>,
    Path(quest_id): Path<String>,
    body: Option<AppJson<CompleteQuestDto>>,
) -> Result<Json<ApiResponse<CompleteQuestResponseDto>>> {
    let requested_at = body.and_then(|AppJson(dto)| dto.requested_at);
    let completed = service
        .complete(&user.account_id, &quest_id, requested_at)
        .await?;

    Ok(Json(ApiResponse::success(
        Some(completed),
        Some("Quest completed".to_string()),
        None,
    )))
}

#[cfg(test)]
mod tests {
    use crate::core::config::EconomyConfig;
    use crate::features::anti_cheat::services::clock::ManualClock;
    use crate::features::anti_cheat::services::{AntiCheatGuard, InMemoryActionLedger};
    use crate::features::anti_cheat::ConsistencyChecker;
    use crate::features::players::PlayerService;
    use crate::features::quests::routes;
    use crate::features::quests::services::QuestService;
    use crate::shared::test_helpers::{assert_error_body, create_player_user, test_pool, with_user};
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use chrono::{TimeZone, Utc};
    use serde_json::{json, Value};
    use std::sync::Arc;

    async fn server() -> (TestServer, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(
            Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap(),
        ));
        let guard = AntiCheatGuard::new(Arc::new(InMemoryActionLedger::new()), clock.clone(), true);
        let players = Arc::new(PlayerService::new(
            test_pool().await,
            &EconomyConfig::default(),
        ));
        let service = Arc::new(QuestService::new(
            players,
            ConsistencyChecker::default(),
            clock.clone(),
        ));

        let app = with_user(routes::routes(service, guard), create_player_user("player-1"));
        (TestServer::new(app).unwrap(), clock)
    }

    #[tokio::test]
    async fn test_complete_then_cooldown_gets_retry_after() {
        let (server, clock) = server().await;

        let response = server
            .post("/api/quests/forest-patrol/complete")
            .json(&json!({}))
            .await;
        response.assert_status_ok();
        assert_eq!(response.json::<Value>()["data"]["reward_berrys"], 15);

        // past the route min delay, still inside the 5 minute quest cooldown
        clock.advance_ms(3_000);
        let response = server
            .post("/api/quests/forest-patrol/complete")
            .json(&json!({}))
            .await;

        response.assert_status(StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(response.header("retry-after"), "297");
        let body = response.json::<Value>();
        assert!(assert_error_body(&body).starts_with("Action not yet available"));
    }

    #[tokio::test]
    async fn test_complete_accepts_empty_body() {
        let (server, _clock) = server().await;

        let response = server.post("/api/quests/forest-patrol/complete").await;

        response.assert_status_ok();
        assert_eq!(response.json::<Value>()["data"]["berrys"], 115);
    }

    #[tokio::test]
    async fn test_route_guard_runs_before_quest_lookup() {
        let (server, _clock) = server().await;

        server
            .post("/api/quests/forest-patrol/complete")
            .json(&json!({}))
            .await
            .assert_status_ok();

        let response = server
            .post("/api/quests/harbor-delivery/complete")
            .json(&json!({}))
            .await;

        response.assert_status(StatusCode::TOO_MANY_REQUESTS);
        let body = response.json::<Value>();
        assert!(assert_error_body(&body).starts_with("Too frequent"));
    }

    #[tokio::test]
    async fn test_unknown_quest_is_not_found() {
        let (server, _clock) = server().await;

        server
            .post("/api/quests/dragon-slaying/complete")
            .json(&json!({}))
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_list_shows_running_cooldown() {
        let (server, _clock) = server().await;
        server
            .post("/api/quests/forest-patrol/complete")
            .json(&json!({}))
            .await
            .assert_status_ok();

        let body = server.get("/api/quests").await.json::<Value>();

        let forest = body["data"]
            .as_array()
            .unwrap()
            .iter()
            .find(|q| q["id"] == "forest-patrol")
            .unwrap()
            .clone();
        assert_eq!(forest["available"], false);
        assert!(forest["available_at"].is_string());
    }
}
