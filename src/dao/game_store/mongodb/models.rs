use mongodb::bson::{Bson, DateTime, Document};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use uuid::Uuid;

use super::error::MongoDaoError;
use crate::dao::models::{LeaderboardEntryEntity, PayoutEntity, PlayerEntity};

/// Leaderboard row keyed by the player identifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MongoLeaderboardDocument {
    #[serde(rename = "_id")]
    player_id: String,
    name: String,
    score: i64,
    tokens: i64,
    #[serde(rename = "updatedAt")]
    updated_at: DateTime,
}

impl MongoLeaderboardDocument {
    pub fn player_id(&self) -> &str {
        &self.player_id
    }
}

impl From<LeaderboardEntryEntity> for MongoLeaderboardDocument {
    fn from(value: LeaderboardEntryEntity) -> Self {
        Self {
            player_id: value.player_id,
            name: value.name,
            score: value.score,
            tokens: value.tokens,
            updated_at: DateTime::from_system_time(value.updated_at),
        }
    }
}

impl From<MongoLeaderboardDocument> for LeaderboardEntryEntity {
    fn from(value: MongoLeaderboardDocument) -> Self {
        Self {
            player_id: value.player_id,
            name: value.name,
            score: value.score,
            tokens: value.tokens,
            updated_at: value.updated_at.to_system_time(),
        }
    }
}

/// Ledger row written after each weekly prize credit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MongoPayoutDocument {
    #[serde(rename = "distributionId")]
    distribution_id: String,
    week: String,
    #[serde(rename = "playerId")]
    player_id: String,
    position: i32,
    amount: i64,
    #[serde(rename = "paidAt")]
    paid_at: DateTime,
}

impl From<PayoutEntity> for MongoPayoutDocument {
    fn from(value: PayoutEntity) -> Self {
        Self {
            distribution_id: value.distribution_id.to_string(),
            week: value.week,
            player_id: value.player_id,
            position: i32::try_from(value.position).unwrap_or(i32::MAX),
            amount: value.amount,
            paid_at: DateTime::from_system_time(value.paid_at),
        }
    }
}

impl TryFrom<MongoPayoutDocument> for PayoutEntity {
    type Error = MongoDaoError;

    fn try_from(value: MongoPayoutDocument) -> Result<Self, Self::Error> {
        let malformed = |message: String| MongoDaoError::MalformedPayout {
            player_id: value.player_id.clone(),
            message,
        };
        let distribution_id = Uuid::parse_str(&value.distribution_id)
            .map_err(|err| malformed(format!("distributionId: {err}")))?;
        let position = u32::try_from(value.position)
            .map_err(|_| malformed(format!("position {} is negative", value.position)))?;

        Ok(Self {
            distribution_id,
            week: value.week,
            player_id: value.player_id,
            position,
            amount: value.amount,
            paid_at: value.paid_at.to_system_time(),
        })
    }
}

/// Split a raw player document into its identifier and JSON fields.
pub fn player_from_document(mut document: Document) -> PlayerEntity {
    let id = match document.remove("_id") {
        Some(Bson::String(id)) => id,
        Some(Bson::ObjectId(oid)) => oid.to_hex(),
        Some(other) => other.to_string(),
        None => String::new(),
    };
    let fields = document
        .into_iter()
        .map(|(key, value)| (key, bson_to_json(value)))
        .collect();
    PlayerEntity { id, fields }
}

/// Convert caller supplied JSON fields into a BSON document, key for key.
pub fn fields_to_document(fields: Map<String, Value>) -> Document {
    fields
        .into_iter()
        .map(|(key, value)| (key, json_to_bson(value)))
        .collect()
}

pub fn json_to_bson(value: Value) -> Bson {
    match value {
        Value::Null => Bson::Null,
        Value::Bool(flag) => Bson::Boolean(flag),
        Value::Number(number) => match number.as_i64() {
            Some(integer) => Bson::Int64(integer),
            None => Bson::Double(number.as_f64().unwrap_or_default()),
        },
        Value::String(text) => Bson::String(text),
        Value::Array(items) => Bson::Array(items.into_iter().map(json_to_bson).collect()),
        Value::Object(map) => Bson::Document(fields_to_document(map)),
    }
}

pub fn bson_to_json(value: Bson) -> Value {
    match value {
        Bson::Null | Bson::Undefined => Value::Null,
        Bson::Boolean(flag) => Value::Bool(flag),
        Bson::Int32(integer) => Value::from(integer),
        Bson::Int64(integer) => Value::from(integer),
        Bson::Double(float) => Number::from_f64(float)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        Bson::String(text) => Value::String(text),
        Bson::Array(items) => Value::Array(items.into_iter().map(bson_to_json).collect()),
        Bson::Document(document) => Value::Object(
            document
                .into_iter()
                .map(|(key, value)| (key, bson_to_json(value)))
                .collect(),
        ),
        Bson::ObjectId(oid) => Value::String(oid.to_hex()),
        Bson::DateTime(date) => Value::from(date.timestamp_millis()),
        other => Value::String(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use mongodb::bson::{doc, oid::ObjectId};
    use serde_json::json;

    use super::*;
    use crate::dao::storage::StorageError;

    #[test]
    fn player_document_round_trips_nested_values() {
        let fields = json!({
            "hp": 5,
            "ratio": 0.5,
            "nfts": [{ "id": "sword", "stats": { "atk": 3 } }],
            "equippedNFT": null,
        });
        let Value::Object(fields) = fields else {
            unreachable!()
        };

        let mut document = fields_to_document(fields.clone());
        document.insert("_id", "p1");
        let player = player_from_document(document);

        assert_eq!(player.id, "p1");
        assert_eq!(player.fields, fields);
    }

    #[test]
    fn foreign_object_ids_become_hex_strings() {
        let oid = ObjectId::new();
        let player = player_from_document(doc! { "_id": oid, "hp": 3_i32 });
        assert_eq!(player.id, oid.to_hex());
        assert_eq!(player.fields["hp"], json!(3));
    }

    fn payout_document(distribution_id: &str, position: i32) -> MongoPayoutDocument {
        MongoPayoutDocument {
            distribution_id: distribution_id.into(),
            week: "2026-W42".into(),
            player_id: "p1".into(),
            position,
            amount: 500,
            paid_at: DateTime::now(),
        }
    }

    #[test]
    fn stored_payout_converts_back_to_entity() {
        let id = Uuid::new_v4();
        let payout = PayoutEntity::try_from(payout_document(&id.to_string(), 2)).unwrap();
        assert_eq!(payout.distribution_id, id);
        assert_eq!(payout.position, 2);
        assert_eq!(payout.amount, 500);
    }

    #[test]
    fn corrupt_payout_rows_are_malformed_not_defaulted() {
        let id = Uuid::new_v4().to_string();
        for document in [payout_document("not-a-uuid", 1), payout_document(&id, -3)] {
            let err = PayoutEntity::try_from(document).unwrap_err();
            assert!(matches!(err, MongoDaoError::MalformedPayout { ref player_id, .. } if player_id == "p1"));
            assert!(matches!(
                StorageError::from(err),
                StorageError::MalformedDocument { .. }
            ));
        }
    }
}
