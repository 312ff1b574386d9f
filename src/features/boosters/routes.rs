use std::sync::Arc;

use axum::{
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};

use super::handlers::{list_boosters, open_booster};
use super::services::BoosterService;
use crate::features::anti_cheat::policies::OPEN_BOOSTER;
use crate::features::anti_cheat::{anti_cheat_middleware, ActionGuardState, AntiCheatGuard};

pub fn routes(service: Arc<BoosterService>, guard: AntiCheatGuard) -> Router {
    let guarded = Router::new()
        .route("/api/boosters/open", post(open_booster))
        .route_layer(from_fn_with_state(
            ActionGuardState::new(guard, &OPEN_BOOSTER),
            anti_cheat_middleware,
        ));

    Router::new()
        .route("/api/boosters", get(list_boosters))
        .merge(guarded)
        .with_state(service)
}
