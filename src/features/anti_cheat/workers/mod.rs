pub mod ledger_sweeper;

pub use ledger_sweeper::LedgerSweeper;
