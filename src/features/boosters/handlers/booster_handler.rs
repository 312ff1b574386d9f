use std::sync::Arc;

use axum::{extract::State, Json};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::guards::RequirePlayer;
use crate::features::boosters::dtos::{BoosterDto, OpenBoosterDto, OpenBoosterResponseDto};
use crate::features::boosters::services::BoosterService;
use crate::shared::types::ApiResponse;

/// List the booster catalog
#[utoipa::path(
    get,
    path = "/api/boosters",
    responses(
        (status = 200, description = "Booster catalog", body = ApiResponse<Vec<BoosterDto>>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "boosters",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_boosters(
    RequirePlayer(_user): RequirePlayer,
    State(service): State<Arc<BoosterService>>,
) -> Result<Json<ApiResponse<Vec<BoosterDto>>>> {
    Ok(Json(ApiResponse::success(Some(service.catalog()), None, None)))
}

/// Buy and open a booster
#[utoipa::path(
    post,
    path = "/api/boosters/open",
    request_body = OpenBoosterDto,
    responses(
        (status = 200, description = "Booster opened", body = ApiResponse<OpenBoosterResponseDto>),
        (status = 400, description = "Insufficient berrys, stale balance or validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Player access required"),
        (status = 429, description = "Opened too frequently")
    ),
    tag = "boosters",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn open_booster(
    RequirePlayer(user): RequirePlayer,
    State(service): State<Arc<BoosterService>>,
    AppJson(dto): AppJson<OpenBoosterDto>,
) -> Result<Json<ApiResponse<OpenBoosterResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let opened = service.open(&user.account_id, &dto).await?;

    Ok(Json(ApiResponse::success(
        Some(opened),
        Some("Booster opened".to_string()),
        None,
    )))
}

#[cfg(test)]
mod tests {
    use crate::core::config::EconomyConfig;
    use crate::features::anti_cheat::services::clock::ManualClock;
    use crate::features::anti_cheat::services::{AntiCheatGuard, InMemoryActionLedger};
    use crate::features::anti_cheat::ConsistencyChecker;
    use crate::features::boosters::routes;
    use crate::features::boosters::services::BoosterService;
    use crate::features::players::PlayerService;
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
        let service = Arc::new(BoosterService::new(players, ConsistencyChecker::default()));

        let app = with_user(routes::routes(service, guard), create_player_user("player-1"));
        (TestServer::new(app).unwrap(), clock)
    }

    #[tokio::test]
    async fn test_open_booster_returns_cards_and_balance() {
        let (server, _clock) = server().await;

        let response = server
            .post("/api/boosters/open")
            .json(&json!({ "booster_type": "standard", "expected_berrys": 100 }))
            .await;

        response.assert_status_ok();
        let body = response.json::<Value>();
        assert_eq!(body["data"]["berrys"], 90);
        assert_eq!(body["data"]["cards"].as_array().unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_rapid_reopen_is_throttled() {
        let (server, clock) = server().await;
        let request = json!({ "booster_type": "standard" });

        server
            .post("/api/boosters/open")
            .json(&request)
            .await
            .assert_status_ok();

        clock.advance_ms(500);
        let response = server.post("/api/boosters/open").json(&request).await;

        response.assert_status(StatusCode::TOO_MANY_REQUESTS);
        let body = response.json::<Value>();
        assert!(assert_error_body(&body).starts_with("Too frequent"));

        clock.advance_ms(500);
        server
            .post("/api/boosters/open")
            .json(&request)
            .await
            .assert_status_ok();
    }

    #[tokio::test]
    async fn test_stale_balance_is_a_bad_request() {
        let (server, _clock) = server().await;

        let response = server
            .post("/api/boosters/open")
            .json(&json!({ "booster_type": "standard", "expected_berrys": 50 }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body = response.json::<Value>();
        assert!(assert_error_body(&body).contains("declared balance 50"));
    }

    #[tokio::test]
    async fn test_unknown_booster_type_is_rejected() {
        let (server, _clock) = server().await;

        server
            .post("/api/boosters/open")
            .json(&json!({ "booster_type": "mythic" }))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_catalog_is_not_throttled() {
        let (server, _clock) = server().await;

        for _ in 0..20 {
            server.get("/api/boosters").await.assert_status_ok();
        }
    }
}
