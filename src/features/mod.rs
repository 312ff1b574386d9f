pub mod anti_cheat;
pub mod auth;
pub mod boosters;
pub mod players;
pub mod quests;
