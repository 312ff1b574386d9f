/// Default page size for pagination
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Maximum page size allowed
pub const MAX_PAGE_SIZE: i64 = 100;

// =============================================================================
// ROLE CONSTANTS
// =============================================================================

/// Super admin role - can inspect policies and reset anti-cheat ledgers
pub const ROLE_SUPER_ADMIN: &str = "super_admin";

/// Player role - can open boosters and run quests
pub const ROLE_PLAYER: &str = "player";
