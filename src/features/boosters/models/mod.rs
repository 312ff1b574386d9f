mod booster;

pub use booster::{BoosterDefinition, BoosterType, DrawnCard, Rarity, RarityWeights, CATALOG};
