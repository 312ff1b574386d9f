pub mod booster_handler;

pub use booster_handler::*;
