pub mod action_record;
pub mod decision;
pub mod rate_limit_policy;

pub use action_record::{ActionKey, ActionRecord, LedgerKey};
pub use decision::{ActionUsage, Decision, DenyReason, Window};
pub use rate_limit_policy::RateLimitPolicy;
