use std::sync::Arc;

use axum::{
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};

use super::handlers::{complete_quest, list_quests};
use super::services::QuestService;
use crate::features::anti_cheat::policies::COMPLETE_QUEST;
use crate::features::anti_cheat::{anti_cheat_middleware, ActionGuardState, AntiCheatGuard};

pub fn routes(service: Arc<QuestService>, guard: AntiCheatGuard) -> Router {
    let guarded = Router::new()
        .route("/api/quests/{quest_id}/complete", post(complete_quest))
        .route_layer(from_fn_with_state(
            ActionGuardState::new(guard, &COMPLETE_QUEST),
            anti_cheat_middleware,
        ));

    Router::new()
        .route("/api/quests", get(list_quests))
        .merge(guarded)
        .with_state(service)
}
