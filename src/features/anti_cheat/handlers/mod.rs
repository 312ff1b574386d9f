pub mod anti_cheat_handler;

pub use anti_cheat_handler::*;
