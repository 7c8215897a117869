//! Player Store operations. Reads create the document on first access; writes
//! merge fields into it. Field names and values are never validated.

use serde_json::{Map, Value};
use tracing::debug;

use crate::{
    dao::models::IDENTITY_FIELDS,
    dto::player::{PlayerDocument, PlayerUpdateResponse},
    error::ServiceError,
    state::SharedState,
};

/// Return the player, creating it from the defaults table when unknown.
pub async fn get_or_create_player(
    state: &SharedState,
    id: String,
) -> Result<PlayerDocument, ServiceError> {
    let player = state.game_store().get_or_create_player(id).await?;
    Ok(player.into())
}

/// Every player document, unfiltered and unpaginated.
pub async fn list_players(state: &SharedState) -> Result<Vec<PlayerDocument>, ServiceError> {
    let players = state.game_store().list_players().await?;
    Ok(players.into_iter().map(Into::into).collect())
}

/// Merge `fields` into the player, creating it when absent.
pub async fn upsert_player(
    state: &SharedState,
    id: String,
    mut fields: Map<String, Value>,
) -> Result<PlayerUpdateResponse, ServiceError> {
    for key in IDENTITY_FIELDS {
        if fields.remove(key).is_some() {
            debug!(player_id = %id, key, "ignoring identity key in player update");
        }
    }

    let player = state.game_store().merge_player(id, fields).await?;
    Ok(PlayerUpdateResponse {
        success: true,
        updated: player.into(),
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use super::*;
    use crate::{config::GameConfig, dao::game_store::memory::MemoryGameStore, state::AppState};

    fn state() -> SharedState {
        AppState::new(Arc::new(MemoryGameStore::new()), GameConfig::default())
    }

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn unknown_player_is_created_with_defaults() {
        let state = state();
        let PlayerDocument(player) = get_or_create_player(&state, "p1".into()).await.unwrap();

        assert_eq!(player["id"], json!("p1"));
        assert_eq!(player["tokens"], json!(1000));
        assert_eq!(player["hp"], json!(200));
        assert_eq!(player["mp"], json!(50));
        assert_eq!(player["attackUpgrade"], json!(0));
        assert_eq!(player["specialUpgrade"], json!(0));

        let listed = list_players(&state).await.unwrap();
        assert_eq!(listed.len(), 1);
    }

    #[tokio::test]
    async fn merge_keeps_untouched_fields_and_extra_keys() {
        let state = state();
        upsert_player(&state, "p1".into(), object(json!({ "enemyIQ": 3, "guild": "owls" })))
            .await
            .unwrap();
        let response = upsert_player(&state, "p1".into(), object(json!({ "hp": 5 })))
            .await
            .unwrap();

        assert!(response.success);
        let PlayerDocument(player) = response.updated;
        assert_eq!(player["hp"], json!(5));
        assert_eq!(player["enemyIQ"], json!(3));
        assert_eq!(player["guild"], json!("owls"));
        assert_eq!(player["tokens"], json!(1000));
    }

    #[tokio::test]
    async fn identity_keys_in_body_are_ignored() {
        let state = state();
        let response = upsert_player(
            &state,
            "p1".into(),
            object(json!({ "id": "other", "_id": "x", "mp": 1 })),
        )
        .await
        .unwrap();

        let PlayerDocument(player) = response.updated;
        assert_eq!(player["id"], json!("p1"));
        assert!(!player.contains_key("_id"));
        assert_eq!(player["mp"], json!(1));
    }
}
