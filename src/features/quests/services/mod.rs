pub mod quest_service;

pub use quest_service::QuestService;
