use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Regex for validating anti-cheat action keys
    /// Must be lowercase snake case starting with a letter
    /// - Valid: "open_booster", "complete_quest", "trade2"
    /// - Invalid: "_open", "Open_Booster", "open-booster", "2fast", ""
    pub static ref ACTION_KEY_REGEX: Regex = Regex::new(r"^[a-z][a-z0-9]*(?:_[a-z0-9]+)*$").unwrap();

    /// Regex for validating catalog slugs (booster types, quest ids)
    /// - Valid: "standard", "forest-patrol", "zone3"
    /// - Invalid: "-forest", "forest-", "Forest", "forest_patrol"
    pub static ref SLUG_REGEX: Regex = Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_key_regex_valid() {
        assert!(ACTION_KEY_REGEX.is_match("open_booster"));
        assert!(ACTION_KEY_REGEX.is_match("complete_quest"));
        assert!(ACTION_KEY_REGEX.is_match("trade2"));
        assert!(ACTION_KEY_REGEX.is_match("a"));
    }

    #[test]
    fn test_action_key_regex_invalid() {
        assert!(!ACTION_KEY_REGEX.is_match("_open")); // leading underscore
        assert!(!ACTION_KEY_REGEX.is_match("open_")); // trailing underscore
        assert!(!ACTION_KEY_REGEX.is_match("open__booster")); // double underscore
        assert!(!ACTION_KEY_REGEX.is_match("Open_Booster")); // uppercase
        assert!(!ACTION_KEY_REGEX.is_match("open-booster")); // hyphen
        assert!(!ACTION_KEY_REGEX.is_match("2fast")); // leading digit
        assert!(!ACTION_KEY_REGEX.is_match("")); // empty
    }

    #[test]
    fn test_slug_regex() {
        assert!(SLUG_REGEX.is_match("standard"));
        assert!(SLUG_REGEX.is_match("forest-patrol"));
        assert!(!SLUG_REGEX.is_match("-forest"));
        assert!(!SLUG_REGEX.is_match("forest_patrol"));
        assert!(!SLUG_REGEX.is_match("Forest"));
    }
}
