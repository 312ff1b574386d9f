//! Player wallets and the leaderboard.
//!
//! Wallets are created lazily on first access with the configured starting balance.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/players/me` | Balance, card count and running cooldowns |
//! | GET | `/api/players/leaderboard` | Players ranked by card count then berrys |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::PlayerService;
