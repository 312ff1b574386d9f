mod quest;

pub use quest::{Quest, QUESTS};
