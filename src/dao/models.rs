use serde_json::{Map, Value};
use std::time::SystemTime;
use uuid::Uuid;

/// Free-form key/value content of a player document.
pub type PlayerFields = Map<String, Value>;

/// Key holding the ordered NFT inventory of a player.
pub const NFTS_FIELD: &str = "nfts";
/// Key holding the currently equipped NFT (or null).
pub const EQUIPPED_FIELD: &str = "equippedNFT";
/// Key holding the token balance credited by weekly payouts.
pub const TOKENS_FIELD: &str = "tokens";
/// Keys that identify a player and can never be overwritten by a merge.
pub const IDENTITY_FIELDS: [&str; 2] = ["id", "_id"];

/// Starting values applied when a player document is created lazily.
pub const PLAYER_DEFAULTS: &[(&str, i64)] = &[
    (TOKENS_FIELD, 1000),
    ("hp", 200),
    ("mp", 50),
    ("attackUpgrade", 0),
    ("specialUpgrade", 0),
];

/// Field set written on first creation of a player document.
pub fn default_player_fields() -> PlayerFields {
    let mut fields: PlayerFields = PLAYER_DEFAULTS
        .iter()
        .map(|(key, value)| ((*key).to_owned(), Value::from(*value)))
        .collect();
    fields.insert(NFTS_FIELD.to_owned(), Value::Array(Vec::new()));
    fields.insert(EQUIPPED_FIELD.to_owned(), Value::Null);
    fields
}

/// Player document as persisted: a stable identifier plus schemaless fields.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerEntity {
    /// Opaque primary key chosen by the client.
    pub id: String,
    /// Every other key of the document, stored verbatim.
    pub fields: PlayerFields,
}

impl PlayerEntity {
    /// Build a freshly created player carrying the default field set.
    pub fn with_defaults(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            fields: default_player_fields(),
        }
    }

    /// Inventory as stored. Anything other than an array reads as empty.
    pub fn nfts(&self) -> &[Value] {
        match self.fields.get(NFTS_FIELD) {
            Some(Value::Array(items)) => items,
            _ => &[],
        }
    }

    /// Equipped value exactly as stored; `None` when absent or null.
    pub fn equipped(&self) -> Option<&Value> {
        self.fields
            .get(EQUIPPED_FIELD)
            .filter(|value| !value.is_null())
    }

    /// First inventory entry whose `id` is the string `nft_id`. Entries
    /// without a string id are skipped.
    pub fn find_nft(&self, nft_id: &str) -> Option<&Value> {
        self.nfts()
            .iter()
            .find(|item| item.get("id").and_then(Value::as_str) == Some(nft_id))
    }

    /// Flatten into the JSON shape returned to clients (`id` alongside every field).
    pub fn into_document(self) -> Map<String, Value> {
        let mut document = self.fields;
        document.insert("id".to_owned(), Value::String(self.id));
        document
    }
}

/// Leaderboard row keyed by player identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderboardEntryEntity {
    /// Player owning the row (unique).
    pub player_id: String,
    /// Display name shown on the board.
    pub name: String,
    /// Latest submitted score, never negative.
    pub score: i64,
    /// Latest submitted token count, never negative.
    pub tokens: i64,
    /// Time of the last submission.
    pub updated_at: SystemTime,
}

/// One prize paid during a weekly distribution sweep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayoutEntity {
    /// Identifier shared by every payout of the same sweep.
    pub distribution_id: Uuid,
    /// ISO week label (`2026-W42`) the sweep ran in.
    pub week: String,
    /// Player credited with the prize.
    pub player_id: String,
    /// 1-based rank of the player in the sweep.
    pub position: u32,
    /// Tokens credited to the player document.
    pub amount: i64,
    /// Time the credit was applied.
    pub paid_at: SystemTime,
}
