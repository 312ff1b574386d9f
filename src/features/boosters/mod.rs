//! Booster catalog and opening.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/boosters` | Catalog with prices and rarity odds |
//! | POST | `/api/boosters/open` | Pay, draw and store a booster (anti-cheat guarded) |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::BoosterService;
