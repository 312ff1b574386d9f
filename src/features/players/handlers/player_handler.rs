use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};

use crate::core::error::Result;
use crate::features::auth::guards::RequirePlayer;
use crate::features::players::dtos::{LeaderboardEntryDto, PlayerProfileDto};
use crate::features::players::services::PlayerService;
use crate::shared::types::{ApiResponse, Meta, PaginationQuery};

#[utoipa::path(
    get,
    path = "/api/players/me",
    responses(
        (status = 200, description = "Wallet and collection summary", body = ApiResponse<PlayerProfileDto>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Player access required")
    ),
    tag = "players",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_my_profile(
    RequirePlayer(user): RequirePlayer,
    State(service): State<Arc<PlayerService>>,
) -> Result<Json<ApiResponse<PlayerProfileDto>>> {
    let profile = service.get_profile(&user.account_id).await?;
    Ok(Json(ApiResponse::success(Some(profile), None, None)))
}

#[utoipa::path(
    get,
    path = "/api/players/leaderboard",
    params(PaginationQuery),
    responses(
        (status = 200, description = "Players ranked by collection size", body = ApiResponse<Vec<LeaderboardEntryDto>>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "players",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_leaderboard(
    RequirePlayer(_user): RequirePlayer,
    State(service): State<Arc<PlayerService>>,
    Query(query): Query<PaginationQuery>,
) -> Result<Json<ApiResponse<Vec<LeaderboardEntryDto>>>> {
    let (entries, total) = service.leaderboard(&query).await?;
    Ok(Json(ApiResponse::success(
        Some(entries),
        None,
        Some(Meta { total }),
    )))
}
