use axum::{
    extract::{Path, State},
    Json,
};

use crate::core::error::{AppError, Result};
use crate::features::anti_cheat::dtos::{
    ActionStatusDto, AntiCheatStatusDto, LedgerResetDto, PolicyDto, PolicyListDto,
};
use crate::features::anti_cheat::policies::GUARDED_ACTIONS;
use crate::features::anti_cheat::services::AntiCheatGuard;
use crate::features::auth::guards::{RequirePlayer, RequireSuperAdmin};
use crate::shared::types::ApiResponse;

/// Get the caller's usage of every guarded action
#[utoipa::path(
    get,
    path = "/api/anti-cheat/status",
    responses(
        (status = 200, description = "Usage per guarded action", body = ApiResponse<AntiCheatStatusDto>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Player access required")
    ),
    tag = "anti-cheat",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_anti_cheat_status(
    RequirePlayer(user): RequirePlayer,
    State(guard): State<AntiCheatGuard>,
) -> Result<Json<ApiResponse<AntiCheatStatusDto>>> {
    let mut actions = Vec::with_capacity(GUARDED_ACTIONS.len());
    for guarded in &GUARDED_ACTIONS {
        let usage = guard
            .usage(&user.account_id, &guarded.key(), &guarded.policy)
            .await;
        actions.push(ActionStatusDto::new(guarded, usage));
    }

    let status = AntiCheatStatusDto {
        enabled: guard.is_enabled(),
        actions,
    };

    Ok(Json(ApiResponse::success(Some(status), None, None)))
}

/// List every guarded route policy
#[utoipa::path(
    get,
    path = "/api/admin/anti-cheat/policies",
    responses(
        (status = 200, description = "Guarded actions and their limits", body = ApiResponse<PolicyListDto>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Super admin access required")
    ),
    tag = "anti-cheat",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_policies(
    RequireSuperAdmin(_user): RequireSuperAdmin,
    State(guard): State<AntiCheatGuard>,
) -> Result<Json<ApiResponse<PolicyListDto>>> {
    let response = PolicyListDto {
        enabled: guard.is_enabled(),
        tracked_records: guard.tracked_records(),
        policies: GUARDED_ACTIONS.iter().map(PolicyDto::from).collect(),
    };

    Ok(Json(ApiResponse::success(Some(response), None, None)))
}

/// Clear every ledger record of a user
#[utoipa::path(
    delete,
    path = "/api/admin/anti-cheat/users/{user_id}",
    params(
        ("user_id" = String, Path, description = "Account id of the player")
    ),
    responses(
        (status = 200, description = "Ledger cleared", body = ApiResponse<LedgerResetDto>),
        (status = 400, description = "Invalid user id"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Super admin access required")
    ),
    tag = "anti-cheat",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn reset_user_ledger(
    RequireSuperAdmin(admin): RequireSuperAdmin,
    State(guard): State<AntiCheatGuard>,
    Path(user_id): Path<String>,
) -> Result<Json<ApiResponse<LedgerResetDto>>> {
    let user_id = user_id.trim().to_string();
    if user_id.is_empty() {
        return Err(AppError::Validation("User id must not be empty".to_string()));
    }

    let records_removed = guard.reset_user(&user_id).await;

    tracing::info!(
        "Anti-cheat ledger of '{}' reset by {} ({} records)",
        user_id,
        admin.account_id,
        records_removed
    );

    Ok(Json(ApiResponse::success(
        Some(LedgerResetDto {
            user_id,
            records_removed,
        }),
        Some("Anti-cheat ledger cleared".to_string()),
        None,
    )))
}
