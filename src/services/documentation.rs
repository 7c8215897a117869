use utoipa::OpenApi;

#[derive(OpenApi)]
/// Aggregated OpenAPI specification for the RPG state backend.
#[openapi(
    paths(
        crate::routes::root::index,
        crate::routes::health::healthcheck,
        crate::routes::players::list_players,
        crate::routes::players::get_player,
        crate::routes::players::update_player,
        crate::routes::leaderboard::submit_score,
        crate::routes::leaderboard::top_scores,
        crate::routes::leaderboard::distribute_weekly,
        crate::routes::leaderboard::list_payouts,
        crate::routes::nfts::mint_nft,
        crate::routes::nfts::equip_nft,
        crate::routes::nfts::get_inventory,
    ),
    components(
        schemas(
            crate::error::ErrorBody,
            crate::dto::health::HealthResponse,
            crate::dto::player::PlayerDocument,
            crate::dto::player::PlayerUpdateResponse,
            crate::dto::leaderboard::ScoreSubmission,
            crate::dto::leaderboard::SuccessResponse,
            crate::dto::leaderboard::LeaderboardEntryDto,
            crate::dto::leaderboard::WeeklyWinnerDto,
            crate::dto::leaderboard::WeeklyDistributionResponse,
            crate::dto::leaderboard::PayoutDto,
            crate::dto::inventory::MintNftRequest,
            crate::dto::inventory::MintNftResponse,
            crate::dto::inventory::EquipNftRequest,
            crate::dto::inventory::EquipNftResponse,
            crate::dto::inventory::InventoryResponse,
        )
    ),
    tags(
        (name = "health", description = "Liveness and storage health"),
        (name = "players", description = "Schemaless player documents"),
        (name = "leaderboard", description = "Scores, rankings and weekly prizes"),
        (name = "nfts", description = "NFT inventory and equipment"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_route() {
        let doc = ApiDoc::openapi();
        for path in [
            "/",
            "/healthcheck",
            "/players",
            "/players/{id}",
            "/leaderboard",
            "/leaderboard/top",
            "/leaderboard/distribute-weekly",
            "/leaderboard/payouts",
            "/nfts/mint",
            "/nfts/equip",
            "/nfts/{player_id}",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
