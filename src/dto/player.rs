use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

use crate::dao::models::PlayerEntity;

/// Player document as exchanged over HTTP: `id` plus every stored field.
///
/// Known keys are `tokens`, `hp`, `mp`, `enemyHp`, `enemyMp`, `enemyMaxHP`,
/// `enemyMaxMP`, `enemyIQ`, `attackUpgrade`, `specialUpgrade`, `nfts` and
/// `equippedNFT`; any other key is kept verbatim.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
#[schema(value_type = Object)]
pub struct PlayerDocument(pub Map<String, Value>);

impl From<PlayerEntity> for PlayerDocument {
    fn from(entity: PlayerEntity) -> Self {
        Self(entity.into_document())
    }
}

/// Acknowledgement of a merge, echoing the document after the update.
#[derive(Debug, Serialize, ToSchema)]
pub struct PlayerUpdateResponse {
    pub success: bool,
    pub updated: PlayerDocument,
}
