use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use validator::{Validate, ValidationErrors};

use crate::dto::validation::{validate_identifier, validate_present};

/// Mint request. The NFT is stored verbatim; only its presence is checked.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MintNftRequest {
    #[serde(default)]
    #[schema(value_type = String)]
    pub player_id: Option<Value>,
    #[serde(default)]
    #[schema(value_type = Object)]
    pub nft: Option<Value>,
}

impl Validate for MintNftRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if let Err(e) = validate_identifier("playerId", self.player_id.as_ref()) {
            errors.add("playerId", e);
        }
        if let Err(e) = validate_present("nft", self.nft.as_ref()) {
            errors.add("nft", e);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Equip request referencing an NFT already in the player's inventory.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EquipNftRequest {
    #[serde(default)]
    #[schema(value_type = String)]
    pub player_id: Option<Value>,
    #[serde(default)]
    #[schema(value_type = String)]
    pub nft_id: Option<Value>,
}

impl Validate for EquipNftRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if let Err(e) = validate_identifier("playerId", self.player_id.as_ref()) {
            errors.add("playerId", e);
        }
        if let Err(e) = validate_identifier("nftId", self.nft_id.as_ref()) {
            errors.add("nftId", e);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MintNftResponse {
    pub success: bool,
    #[schema(value_type = Object)]
    pub nft: Value,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct EquipNftResponse {
    pub success: bool,
    /// Copy of the inventory entry, detached from later list changes.
    #[schema(value_type = Object)]
    pub equipped: Value,
}

/// Inventory view, both values as stored; `equipped` is null when nothing is equipped.
#[derive(Debug, Serialize, ToSchema)]
pub struct InventoryResponse {
    #[schema(value_type = Vec<Object>)]
    pub nfts: Vec<Value>,
    #[schema(value_type = Option<Object>)]
    pub equipped: Option<Value>,
}
