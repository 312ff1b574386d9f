mod player;

pub use player::{LeaderboardEntry, Player, PlayerCooldown};
