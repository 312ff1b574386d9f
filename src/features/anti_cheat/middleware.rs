use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::core::error::AppError;
use crate::features::anti_cheat::models::{ActionKey, RateLimitPolicy};
use crate::features::anti_cheat::policies::GuardedAction;
use crate::features::anti_cheat::services::AntiCheatGuard;
use crate::features::auth::guards::RequirePlayer;

/// State for one guarded route: the shared guard plus that route's literal policy
#[derive(Clone)]
pub struct ActionGuardState {
    guard: AntiCheatGuard,
    action: ActionKey,
    policy: RateLimitPolicy,
}

impl ActionGuardState {
    pub fn new(guard: AntiCheatGuard, guarded: &GuardedAction) -> Self {
        Self {
            guard,
            action: guarded.key(),
            policy: guarded.policy,
        }
    }
}

/// Anti-cheat middleware, mounted after `auth_middleware` on state-mutating routes.
///
/// Callers without player access are rejected before anything is recorded.
///
/// # Example
/// ```ignore
/// Router::new()
///     .route("/api/boosters/open", post(open_booster))
///     .route_layer(from_fn_with_state(
///         ActionGuardState::new(guard, &OPEN_BOOSTER),
///         anti_cheat_middleware,
///     ))
/// ```
pub async fn anti_cheat_middleware(
    State(state): State<ActionGuardState>,
    RequirePlayer(user): RequirePlayer,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    state
        .guard
        .check(&user.account_id, &state.action, &state.policy)
        .await
        .into_result()?;

    Ok(next.run(req).await)
}
