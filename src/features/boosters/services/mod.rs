pub mod booster_service;
pub mod draw;

pub use booster_service::BoosterService;
