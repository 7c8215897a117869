use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post},
};

use crate::{
    dto::inventory::{
        EquipNftRequest, EquipNftResponse, InventoryResponse, MintNftRequest, MintNftResponse,
    },
    error::{AppError, ErrorBody},
    routes::json::JsonBody,
    services::inventory_service,
    state::SharedState,
};

/// NFT inventory endpoints.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/nfts/mint", post(mint_nft))
        .route("/nfts/equip", post(equip_nft))
        .route("/nfts/{player_id}", get(get_inventory))
}

/// Append an NFT to a player's inventory.
#[utoipa::path(
    post,
    path = "/nfts/mint",
    tag = "nfts",
    request_body = MintNftRequest,
    responses(
        (status = 200, description = "NFT appended", body = MintNftResponse),
        (status = 400, description = "playerId or nft missing", body = ErrorBody),
        (status = 500, description = "Storage failure", body = ErrorBody)
    )
)]
pub async fn mint_nft(
    State(state): State<SharedState>,
    JsonBody(request): JsonBody<MintNftRequest>,
) -> Result<Json<MintNftResponse>, AppError> {
    Ok(Json(inventory_service::mint_nft(&state, request).await?))
}

/// Equip an owned NFT by id.
#[utoipa::path(
    post,
    path = "/nfts/equip",
    tag = "nfts",
    request_body = EquipNftRequest,
    responses(
        (status = 200, description = "NFT equipped", body = EquipNftResponse),
        (status = 400, description = "playerId or nftId missing", body = ErrorBody),
        (status = 404, description = "Player or NFT not found", body = ErrorBody),
        (status = 500, description = "Storage failure", body = ErrorBody)
    )
)]
pub async fn equip_nft(
    State(state): State<SharedState>,
    JsonBody(request): JsonBody<EquipNftRequest>,
) -> Result<Json<EquipNftResponse>, AppError> {
    Ok(Json(inventory_service::equip_nft(&state, request).await?))
}

/// Inventory and equipped NFT of an existing player.
#[utoipa::path(
    get,
    path = "/nfts/{player_id}",
    tag = "nfts",
    params(("player_id" = String, Path, description = "Player identifier")),
    responses(
        (status = 200, description = "Inventory and equipped NFT", body = InventoryResponse),
        (status = 404, description = "Player not found", body = ErrorBody),
        (status = 500, description = "Storage failure", body = ErrorBody)
    )
)]
pub async fn get_inventory(
    State(state): State<SharedState>,
    Path(player_id): Path<String>,
) -> Result<Json<InventoryResponse>, AppError> {
    Ok(Json(
        inventory_service::get_inventory(&state, player_id).await?,
    ))
}
