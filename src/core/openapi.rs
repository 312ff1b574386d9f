use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::anti_cheat::{dtos as anti_cheat_dtos, handlers as anti_cheat_handlers};
use crate::features::auth;
use crate::features::boosters::{
    dtos as boosters_dtos, handlers as boosters_handlers, models as boosters_models,
};
use crate::features::players::{dtos as players_dtos, handlers::player_handler};
use crate::features::quests::{dtos as quests_dtos, handlers as quests_handlers};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Auth
        auth::handler::get_me,
        // Players
        player_handler::get_my_profile,
        player_handler::get_leaderboard,
        // Boosters (open is anti-cheat guarded)
        boosters_handlers::list_boosters,
        boosters_handlers::open_booster,
        // Quests (complete is anti-cheat guarded)
        quests_handlers::list_quests,
        quests_handlers::complete_quest,
        // Anti-cheat
        anti_cheat_handlers::get_anti_cheat_status,
        anti_cheat_handlers::list_policies,
        anti_cheat_handlers::reset_user_ledger,
    ),
    components(
        schemas(
            // Shared
            Meta,
            // Auth
            auth::dto::MeResponseDto,
            auth::model::AuthenticatedUser,
            ApiResponse<auth::dto::MeResponseDto>,
            // Players
            players_dtos::PlayerProfileDto,
            players_dtos::CooldownDto,
            players_dtos::LeaderboardEntryDto,
            ApiResponse<players_dtos::PlayerProfileDto>,
            ApiResponse<Vec<players_dtos::LeaderboardEntryDto>>,
            // Boosters
            boosters_models::Rarity,
            boosters_models::BoosterType,
            boosters_models::RarityWeights,
            boosters_models::DrawnCard,
            boosters_dtos::BoosterDto,
            boosters_dtos::OpenBoosterDto,
            boosters_dtos::OpenBoosterResponseDto,
            ApiResponse<Vec<boosters_dtos::BoosterDto>>,
            ApiResponse<boosters_dtos::OpenBoosterResponseDto>,
            // Quests
            quests_dtos::QuestDto,
            quests_dtos::CompleteQuestDto,
            quests_dtos::CompleteQuestResponseDto,
            ApiResponse<Vec<quests_dtos::QuestDto>>,
            ApiResponse<quests_dtos::CompleteQuestResponseDto>,
            // Anti-cheat
            anti_cheat_dtos::PolicyDto,
            anti_cheat_dtos::ActionStatusDto,
            anti_cheat_dtos::AntiCheatStatusDto,
            anti_cheat_dtos::PolicyListDto,
            anti_cheat_dtos::LedgerResetDto,
            ApiResponse<anti_cheat_dtos::AntiCheatStatusDto>,
            ApiResponse<anti_cheat_dtos::PolicyListDto>,
            ApiResponse<anti_cheat_dtos::LedgerResetDto>,
        )
    ),
    tags(
        (name = "auth", description = "Authentication endpoints"),
        (name = "players", description = "Player wallets and leaderboard"),
        (name = "boosters", description = "Booster catalog and opening"),
        (name = "quests", description = "Map quests and cooldowns"),
        (name = "anti-cheat", description = "Anti-cheat usage and administration"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "Cardgame API",
        version = "0.1.0",
        description = "API documentation for the card game backend",
    )
)]
pub struct ApiDoc;

/// Adds Bearer JWT security scheme to OpenAPI spec
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_guarded_routes() {
        let doc = ApiDoc::openapi();

        assert!(doc.paths.paths.contains_key("/api/boosters/open"));
        assert!(doc.paths.paths.contains_key("/api/quests/{quest_id}/complete"));
        assert!(doc
            .components
            .as_ref()
            .is_some_and(|c| c.security_schemes.contains_key("bearer_auth")));
    }
}
