use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Legendary,
}

impl Rarity {
    /// Lowest first
    pub const ALL: [Rarity; 4] = [
        Rarity::Common,
        Rarity::Uncommon,
        Rarity::Rare,
        Rarity::Legendary,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Rarity::Common => "common",
            Rarity::Uncommon => "uncommon",
            Rarity::Rare => "rare",
            Rarity::Legendary => "legendary",
        }
    }

    /// Number of distinct cards of this rarity
    pub fn pool_size(&self) -> u16 {
        match self {
            Rarity::Common => 60,
            Rarity::Uncommon => 30,
            Rarity::Rare => 15,
            Rarity::Legendary => 5,
        }
    }

    fn code_prefix(&self) -> char {
        match self {
            Rarity::Common => 'C',
            Rarity::Uncommon => 'U',
            Rarity::Rare => 'R',
            Rarity::Legendary => 'L',
        }
    }

    /// Card code of the `number`-th card of this rarity, e.g. `C-017`
    pub fn card_code(&self, number: u16) -> String {
        format!("{}-{:03}", self.code_prefix(), number)
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum BoosterType {
    Standard,
    Premium,
}

impl BoosterType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BoosterType::Standard => "standard",
            BoosterType::Premium => "premium",
        }
    }

    pub fn definition(&self) -> &'static BoosterDefinition {
        match self {
            BoosterType::Standard => &CATALOG[0],
            BoosterType::Premium => &CATALOG[1],
        }
    }
}

/// Relative odds of each rarity for one card slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct RarityWeights {
    pub common: u32,
    pub uncommon: u32,
    pub rare: u32,
    pub legendary: u32,
}

impl RarityWeights {
    pub fn of(&self, rarity: Rarity) -> u32 {
        match rarity {
            Rarity::Common => self.common,
            Rarity::Uncommon => self.uncommon,
            Rarity::Rare => self.rare,
            Rarity::Legendary => self.legendary,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoosterDefinition {
    pub booster_type: BoosterType,
    pub name: &'static str,
    pub price: i64,
    pub card_count: usize,
    pub weights: RarityWeights,
    /// Minimum rarity of the last card, if the booster guarantees one
    pub last_slot_floor: Option<Rarity>,
}

pub static CATALOG: [BoosterDefinition; 2] = [
    BoosterDefinition {
        booster_type: BoosterType::Standard,
        name: "Standard booster",
        price: 10,
        card_count: 5,
        weights: RarityWeights {
            common: 70,
            uncommon: 22,
            rare: 7,
            legendary: 1,
        },
        last_slot_floor: None,
    },
    BoosterDefinition {
        booster_type: BoosterType::Premium,
        name: "Premium booster",
        price: 50,
        card_count: 5,
        weights: RarityWeights {
            common: 50,
            uncommon: 30,
            rare: 15,
            legendary: 5,
        },
        last_slot_floor: Some(Rarity::Rare),
    },
];

/// One card pulled from a booster
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct DrawnCard {
    pub code: String,
    pub rarity: Rarity,
}
