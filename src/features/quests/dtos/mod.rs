pub mod quest_dto;

pub use quest_dto::*;
