//! Inventory (NFT) Store. Minting appends blindly; equipping copies the first
//! inventory entry with a matching id into `equippedNFT`.

use tracing::debug;
use validator::Validate;

use crate::{
    dto::{
        inventory::{
            EquipNftRequest, EquipNftResponse, InventoryResponse, MintNftRequest,
            MintNftResponse,
        },
        validation::identifier_text,
    },
    error::ServiceError,
    state::SharedState,
};

/// Append the NFT verbatim to the player's inventory. Neither the player nor
/// the NFT id is checked for existence or uniqueness.
pub async fn mint_nft(
    state: &SharedState,
    request: MintNftRequest,
) -> Result<MintNftResponse, ServiceError> {
    request.validate()?;
    let player_id = identifier_text(request.player_id.as_ref());
    let nft = request.nft.unwrap_or_default();

    debug!(%player_id, "minting NFT");
    state
        .game_store()
        .push_nft(player_id, nft.clone())
        .await?;

    Ok(MintNftResponse { success: true, nft })
}

/// Equip the first NFT of the player's inventory whose string `id` matches.
pub async fn equip_nft(
    state: &SharedState,
    request: EquipNftRequest,
) -> Result<EquipNftResponse, ServiceError> {
    request.validate()?;
    let player_id = identifier_text(request.player_id.as_ref());
    let nft_id = identifier_text(request.nft_id.as_ref());

    let store = state.game_store();
    let Some(player) = store.find_player(player_id.clone()).await? else {
        return Err(ServiceError::NotFound(format!(
            "player `{player_id}` not found"
        )));
    };

    if player.nfts().is_empty() {
        return Err(ServiceError::NotFound(format!(
            "player `{player_id}` owns no NFTs"
        )));
    }

    let Some(nft) = player.find_nft(&nft_id).cloned() else {
        return Err(ServiceError::NotFound(format!(
            "NFT `{nft_id}` not found in inventory of `{player_id}`"
        )));
    };

    store.set_equipped(player_id, nft.clone()).await?;

    Ok(EquipNftResponse {
        success: true,
        equipped: nft,
    })
}

/// Inventory of an existing player, returned as stored.
pub async fn get_inventory(
    state: &SharedState,
    player_id: String,
) -> Result<InventoryResponse, ServiceError> {
    let Some(player) = state.game_store().find_player(player_id.clone()).await? else {
        return Err(ServiceError::NotFound(format!(
            "player `{player_id}` not found"
        )));
    };

    Ok(InventoryResponse {
        nfts: player.nfts().to_vec(),
        equipped: player.equipped().cloned(),
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::{Value, json};

    use super::*;
    use crate::{
        config::GameConfig,
        dao::game_store::{GameStore, memory::MemoryGameStore},
        state::AppState,
    };

    fn state_with(store: MemoryGameStore) -> SharedState {
        AppState::new(Arc::new(store), GameConfig::default())
    }

    fn mint(player_id: &str, nft: Value) -> MintNftRequest {
        MintNftRequest {
            player_id: Some(json!(player_id)),
            nft: Some(nft),
        }
    }

    fn equip(player_id: &str, nft_id: &str) -> EquipNftRequest {
        EquipNftRequest {
            player_id: Some(json!(player_id)),
            nft_id: Some(json!(nft_id)),
        }
    }

    #[tokio::test]
    async fn mint_requires_both_fields() {
        let state = state_with(MemoryGameStore::new());

        let err = mint_nft(&state, MintNftRequest::default()).await.unwrap_err();
        assert!(matches!(err, ServiceError::InvalidArgument(_)));

        let err = mint_nft(
            &state,
            MintNftRequest {
                player_id: Some(json!("p1")),
                nft: None,
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ServiceError::InvalidArgument(message) if message == "nft is required"));
    }

    #[tokio::test]
    async fn mint_for_unknown_player_leaves_inventory_only_document() {
        let store = MemoryGameStore::new();
        let state = state_with(store.clone());
        mint_nft(&state, mint("ghost", json!({ "id": "orb" }))).await.unwrap();

        let player = store.find_player("ghost".into()).await.unwrap().unwrap();
        assert_eq!(player.fields.keys().collect::<Vec<_>>(), ["nfts"]);

        let inventory = get_inventory(&state, "ghost".into()).await.unwrap();
        assert_eq!(inventory.nfts, [json!({ "id": "orb" })]);
        assert_eq!(inventory.equipped, None);
    }

    #[tokio::test]
    async fn duplicate_ids_are_kept_and_equip_picks_the_first() {
        let store = MemoryGameStore::new();
        let state = state_with(store.clone());
        store.get_or_create_player("p1".into()).await.unwrap();
        mint_nft(&state, mint("p1", json!({ "id": "ring", "level": 1 })))
            .await
            .unwrap();
        mint_nft(&state, mint("p1", json!({ "id": "ring", "level": 2 })))
            .await
            .unwrap();

        let response = equip_nft(&state, equip("p1", "ring")).await.unwrap();
        assert_eq!(response.equipped, json!({ "id": "ring", "level": 1 }));

        let inventory = get_inventory(&state, "p1".into()).await.unwrap();
        assert_eq!(inventory.nfts.len(), 2);
        assert_eq!(inventory.equipped, Some(json!({ "id": "ring", "level": 1 })));
    }

    #[tokio::test]
    async fn equip_failures_are_not_found_and_leave_state_untouched() {
        let store = MemoryGameStore::new();
        let state = state_with(store.clone());

        let err = equip_nft(&state, equip("nobody", "x")).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));

        store.get_or_create_player("p1".into()).await.unwrap();
        let err = equip_nft(&state, equip("p1", "x")).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));

        mint_nft(&state, mint("p1", json!({ "id": "bow" }))).await.unwrap();
        equip_nft(&state, equip("p1", "bow")).await.unwrap();
        let err = equip_nft(&state, equip("p1", "axe")).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));

        let inventory = get_inventory(&state, "p1".into()).await.unwrap();
        assert_eq!(inventory.equipped, Some(json!({ "id": "bow" })));
    }

    #[tokio::test]
    async fn equipped_copy_survives_list_changes() {
        let store = MemoryGameStore::new();
        let state = state_with(store.clone());
        mint_nft(&state, mint("p1", json!({ "id": "gem", "shine": 1 })))
            .await
            .unwrap();
        equip_nft(&state, equip("p1", "gem")).await.unwrap();

        let mut nfts = serde_json::Map::new();
        nfts.insert("nfts".into(), json!([{ "id": "gem", "shine": 9 }]));
        store.merge_player("p1".into(), nfts).await.unwrap();

        let inventory = get_inventory(&state, "p1".into()).await.unwrap();
        assert_eq!(inventory.equipped, Some(json!({ "id": "gem", "shine": 1 })));
    }

    #[tokio::test]
    async fn mint_stores_nft_without_id_verbatim() {
        let store = MemoryGameStore::new();
        let state = state_with(store.clone());
        let response = mint_nft(&state, mint("p1", json!({ "type": "shield" })))
            .await
            .unwrap();
        assert_eq!(response.nft, json!({ "type": "shield" }));

        let inventory = get_inventory(&state, "p1".into()).await.unwrap();
        assert_eq!(inventory.nfts, [json!({ "type": "shield" })]);
    }

    #[tokio::test]
    async fn merged_schemaless_inventory_is_readable_and_equippable() {
        let store = MemoryGameStore::new();
        let state = state_with(store.clone());

        let mut fields = serde_json::Map::new();
        fields.insert("nfts".into(), json!([{ "type": "shield" }, { "id": 7 }]));
        fields.insert("equippedNFT".into(), json!("shield"));
        store.merge_player("p1".into(), fields).await.unwrap();

        let inventory = get_inventory(&state, "p1".into()).await.unwrap();
        assert_eq!(inventory.nfts.len(), 2);
        assert_eq!(inventory.equipped, Some(json!("shield")));

        let err = equip_nft(&state, equip("p1", "7")).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));

        mint_nft(&state, mint("p1", json!({ "id": "a", "rank": 2 })))
            .await
            .unwrap();
        let response = equip_nft(&state, equip("p1", "a")).await.unwrap();
        assert_eq!(response.equipped, json!({ "id": "a", "rank": 2 }));
    }

    #[tokio::test]
    async fn non_array_inventory_reads_as_empty() {
        let store = MemoryGameStore::new();
        let state = state_with(store.clone());
        let mut fields = serde_json::Map::new();
        fields.insert("nfts".into(), json!("broken"));
        store.merge_player("p1".into(), fields).await.unwrap();

        let inventory = get_inventory(&state, "p1".into()).await.unwrap();
        assert!(inventory.nfts.is_empty());
        let err = equip_nft(&state, equip("p1", "a")).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn inventory_of_unknown_player_is_not_found() {
        let state = state_with(MemoryGameStore::new());
        let err = get_inventory(&state, "nobody".into()).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }
}
