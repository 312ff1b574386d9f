pub mod quest_handler;

pub use quest_handler::*;
