use axum::{
    routing::{delete, get},
    Router,
};

use super::handlers::{get_anti_cheat_status, list_policies, reset_user_ledger};
use super::services::AntiCheatGuard;

/// Player routes for inspecting their own anti-cheat usage
pub fn routes(guard: AntiCheatGuard) -> Router {
    Router::new()
        .route("/api/anti-cheat/status", get(get_anti_cheat_status))
        .with_state(guard)
}

/// Create admin routes for the anti-cheat ledger (super admin only)
pub fn admin_routes(guard: AntiCheatGuard) -> Router {
    Router::new()
        .route("/api/admin/anti-cheat/policies", get(list_policies))
        .route(
            "/api/admin/anti-cheat/users/{user_id}",
            delete(reset_user_ledger),
        )
        .with_state(guard)
}
