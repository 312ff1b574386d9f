use crate::features::anti_cheat::models::{ActionKey, RateLimitPolicy};

/// A rate-limited route action together with its literal policy
#[derive(Debug, Clone, Copy)]
pub struct GuardedAction {
    pub action: &'static str,
    pub description: &'static str,
    pub policy: RateLimitPolicy,
}

impl GuardedAction {
    pub fn key(&self) -> ActionKey {
        ActionKey::from_static(self.action)
    }
}

pub const OPEN_BOOSTER: GuardedAction = GuardedAction {
    action: "open_booster",
    description: "Open a booster pack",
    policy: RateLimitPolicy::new()
        .max_per_minute(10)
        .max_per_hour(200)
        .min_delay_ms(1000),
};

pub const COMPLETE_QUEST: GuardedAction = GuardedAction {
    action: "complete_quest",
    description: "Complete a map quest",
    policy: RateLimitPolicy::new()
        .max_per_minute(6)
        .max_per_hour(60)
        .min_delay_ms(2000),
};

/// Every guarded action, in the order they are reported by the status endpoints
pub const GUARDED_ACTIONS: [GuardedAction; 2] = [OPEN_BOOSTER, COMPLETE_QUEST];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guarded_action_keys_are_valid() {
        for guarded in GUARDED_ACTIONS {
            assert!(ActionKey::parse(guarded.action).is_ok(), "{}", guarded.action);
            assert!(!guarded.policy.is_unlimited());
        }
    }

    #[test]
    fn test_guarded_action_keys_are_unique() {
        let mut keys: Vec<_> = GUARDED_ACTIONS.iter().map(|g| g.action).collect();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), GUARDED_ACTIONS.len());
    }
}
