pub mod clock;
pub mod consistency;
pub mod guard_service;
pub mod ledger;

pub use clock::{Clock, SystemClock};
pub use consistency::ConsistencyChecker;
pub use guard_service::AntiCheatGuard;
pub use ledger::{ActionLedger, InMemoryActionLedger};
