pub mod anti_cheat_dto;

pub use anti_cheat_dto::*;
