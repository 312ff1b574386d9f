//! Map quests with per-player cooldowns.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/quests` | Quest catalog with the caller's availability |
//! | POST | `/api/quests/{quest_id}/complete` | Collect the reward and start the cooldown (anti-cheat guarded) |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::QuestService;
