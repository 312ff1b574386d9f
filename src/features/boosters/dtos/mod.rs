pub mod booster_dto;

pub use booster_dto::*;
