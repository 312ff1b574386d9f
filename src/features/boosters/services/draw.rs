//! Booster probability engine.
//!
//! Draw functions take the RNG as a parameter so callers pick the source:
//! `rand::rng()` in the service, a seeded `StdRng` in tests.

use rand::Rng;

use crate::features::boosters::models::{BoosterDefinition, DrawnCard, Rarity, RarityWeights};

/// Pick a rarity according to `weights`, ignoring rarities below `floor`
pub fn draw_rarity<R: Rng + ?Sized>(rng: &mut R, weights: &RarityWeights, floor: Rarity) -> Rarity {
    let eligible = Rarity::ALL.into_iter().filter(|rarity| *rarity >= floor);
    let total: u32 = eligible.clone().map(|rarity| weights.of(rarity)).sum();
    if total == 0 {
        return floor;
    }

    let mut roll = rng.random_range(0..total);
    for rarity in eligible {
        let weight = weights.of(rarity);
        if roll < weight {
            return rarity;
        }
        roll -= weight;
    }

    floor
}

/// Pick a uniformly random card of `rarity`
pub fn draw_card<R: Rng + ?Sized>(rng: &mut R, rarity: Rarity) -> DrawnCard {
    let number = rng.random_range(1..=rarity.pool_size());
    DrawnCard {
        code: rarity.card_code(number),
        rarity,
    }
}

/// Draw every card of one booster
pub fn draw_pack<R: Rng + ?Sized>(rng: &mut R, booster: &BoosterDefinition) -> Vec<DrawnCard> {
    (0..booster.card_count)
        .map(|slot| {
            let floor = match booster.last_slot_floor {
                Some(floor) if slot + 1 == booster.card_count => floor,
                _ => Rarity::Common,
            };
            let rarity = draw_rarity(rng, &booster.weights, floor);
            draw_card(rng, rarity)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::boosters::models::BoosterType;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_pack_has_declared_size() {
        let mut rng = StdRng::seed_from_u64(7);

        for booster_type in [BoosterType::Standard, BoosterType::Premium] {
            let definition = booster_type.definition();
            let pack = draw_pack(&mut rng, definition);
            assert_eq!(pack.len(), definition.card_count);
        }
    }

    #[test]
    fn test_premium_last_slot_is_rare_or_better() {
        let mut rng = StdRng::seed_from_u64(42);
        let premium = BoosterType::Premium.definition();

        for _ in 0..500 {
            let pack = draw_pack(&mut rng, premium);
            assert!(pack.last().unwrap().rarity >= Rarity::Rare);
        }
    }

    #[test]
    fn test_rarity_distribution_follows_weights() {
        let mut rng = StdRng::seed_from_u64(1234);
        let weights = BoosterType::Standard.definition().weights;
        let draws = 20_000;

        let commons = (0..draws)
            .filter(|_| draw_rarity(&mut rng, &weights, Rarity::Common) == Rarity::Common)
            .count();

        let share = commons as f64 / draws as f64;
        assert!((0.67..0.73).contains(&share), "common share was {}", share);
    }

    #[test]
    fn test_zero_weights_fall_back_to_floor() {
        let mut rng = StdRng::seed_from_u64(0);
        let weights = RarityWeights {
            common: 10,
            uncommon: 0,
            rare: 0,
            legendary: 0,
        };

        assert_eq!(draw_rarity(&mut rng, &weights, Rarity::Rare), Rarity::Rare);
    }

    #[test]
    fn test_card_codes_stay_inside_pool() {
        let mut rng = StdRng::seed_from_u64(99);

        for _ in 0..200 {
            let card = draw_card(&mut rng, Rarity::Legendary);
            let number: u16 = card.code[2..].parse().unwrap();
            assert!((1..=Rarity::Legendary.pool_size()).contains(&number));
            assert!(card.code.starts_with("L-"));
        }
    }
}
