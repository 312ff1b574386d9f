//! Anti-cheat guard for state-mutating player actions.
//!
//! | Route | Access |
//! |-------|--------|
//! | `GET /api/anti-cheat/status` | player |
//! | `GET /api/admin/anti-cheat/policies` | super admin |
//! | `DELETE /api/admin/anti-cheat/users/{user_id}` | super admin |
//!
//! Guarded routes in other features mount [`middleware::anti_cheat_middleware`]
//! with one of the literal policies from [`policies`].

pub mod dtos;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod policies;
pub mod routes;
pub mod services;
pub mod workers;

pub use middleware::{anti_cheat_middleware, ActionGuardState};
pub use services::{AntiCheatGuard, ConsistencyChecker};
pub use workers::LedgerSweeper;
