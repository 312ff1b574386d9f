use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::boosters::models::{BoosterDefinition, BoosterType, DrawnCard, Rarity, RarityWeights};

/// Catalog entry
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BoosterDto {
    pub booster_type: BoosterType,
    pub name: String,
    pub price: i64,
    pub card_count: usize,
    pub weights: RarityWeights,
    pub last_slot_floor: Option<Rarity>,
}

impl From<&BoosterDefinition> for BoosterDto {
    fn from(definition: &BoosterDefinition) -> Self {
        Self {
            booster_type: definition.booster_type,
            name: definition.name.to_string(),
            price: definition.price,
            card_count: definition.card_count,
            weights: definition.weights,
            last_slot_floor: definition.last_slot_floor,
        }
    }
}

/// Request DTO for opening a booster
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct OpenBoosterDto {
    pub booster_type: BoosterType,
    /// Balance the client believes it holds before paying; checked against the stored one
    #[validate(range(min = 0, message = "Expected berrys cannot be negative"))]
    pub expected_berrys: Option<i64>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct OpenBoosterResponseDto {
    pub booster_type: BoosterType,
    pub cards: Vec<DrawnCard>,
    /// Balance after paying for the booster
    pub berrys: i64,
}
