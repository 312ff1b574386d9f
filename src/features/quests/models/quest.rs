use std::time::Duration;

/// A map quest that can be repeated once its cooldown ends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quest {
    /// Slug, e.g. `forest-patrol`
    pub id: &'static str,
    pub name: &'static str,
    pub location: &'static str,
    pub reward_berrys: i64,
    pub cooldown: Duration,
}

impl Quest {
    pub fn find(id: &str) -> Option<&'static Quest> {
        QUESTS.iter().find(|quest| quest.id == id)
    }

    /// Key of this quest's row in `player_cooldowns`
    pub fn cooldown_key(&self) -> String {
        format!("quest:{}", self.id)
    }
}

pub static QUESTS: [Quest; 4] = [
    Quest {
        id: "forest-patrol",
        name: "Forest patrol",
        location: "Whispering Woods",
        reward_berrys: 15,
        cooldown: Duration::from_secs(5 * 60),
    },
    Quest {
        id: "harbor-delivery",
        name: "Harbor delivery",
        location: "Port Azure",
        reward_berrys: 25,
        cooldown: Duration::from_secs(15 * 60),
    },
    Quest {
        id: "mountain-expedition",
        name: "Mountain expedition",
        location: "Frostpeak",
        reward_berrys: 60,
        cooldown: Duration::from_secs(60 * 60),
    },
    Quest {
        id: "ruins-survey",
        name: "Ruins survey",
        location: "Sunken Ruins",
        reward_berrys: 120,
        cooldown: Duration::from_secs(4 * 60 * 60),
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::validation::SLUG_REGEX;

    #[test]
    fn test_quest_ids_are_slugs() {
        for quest in QUESTS {
            assert!(SLUG_REGEX.is_match(quest.id), "{}", quest.id);
        }
    }

    #[test]
    fn test_find_and_cooldown_key() {
        let quest = Quest::find("harbor-delivery").unwrap();
        assert_eq!(quest.cooldown_key(), "quest:harbor-delivery");
        assert!(Quest::find("dragon-slaying").is_none());
    }
}
