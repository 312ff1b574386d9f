pub mod player_dto;

pub use player_dto::*;
