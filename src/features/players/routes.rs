use std::sync::Arc;

use axum::{routing::get, Router};

use super::handlers::player_handler;
use super::services::PlayerService;

pub fn routes(service: Arc<PlayerService>) -> Router {
    Router::new()
        .route("/api/players/me", get(player_handler::get_my_profile))
        .route(
            "/api/players/leaderboard",
            get(player_handler::get_leaderboard),
        )
        .with_state(service)
}
