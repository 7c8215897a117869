use futures::{TryStreamExt, future::BoxFuture};
use mongodb::{
    Client, Collection, Database, IndexModel,
    bson::{Document, doc},
    options::{IndexOptions, ReturnDocument},
};
use serde_json::Value;
use tracing::info;

use super::{
    config::MongoConfig,
    connection::establish_connection,
    error::{MongoDaoError, MongoResult},
    models::{
        MongoLeaderboardDocument, MongoPayoutDocument, fields_to_document, json_to_bson,
        player_from_document,
    },
};
use crate::dao::{
    game_store::GameStore,
    models::{
        EQUIPPED_FIELD, LeaderboardEntryEntity, NFTS_FIELD, PayoutEntity,
        PlayerEntity, PlayerFields, TOKENS_FIELD, default_player_fields,
    },
    storage::StorageResult,
};

const PLAYER_COLLECTION_NAME: &str = "players";
const LEADERBOARD_COLLECTION_NAME: &str = "leaderboard";
const PAYOUT_COLLECTION_NAME: &str = "payouts";

/// MongoDB-backed [`GameStore`] implementation sharing one client for the process lifetime.
#[derive(Clone)]
pub struct MongoGameStore {
    client: Client,
    database: Database,
}

impl MongoGameStore {
    /// Establish a connection to MongoDB and ensure indexes are present.
    pub async fn connect(config: MongoConfig) -> MongoResult<Self> {
        let (client, database) = establish_connection(&config).await?;
        info!(database = %config.database_name, "connected to MongoDB");

        let store = Self { client, database };
        store.ensure_indexes().await?;
        Ok(store)
    }

    async fn ensure_indexes(&self) -> MongoResult<()> {
        let leaderboard_index = IndexModel::builder()
            .keys(doc! {"score": -1, "updatedAt": -1})
            .options(
                IndexOptions::builder()
                    .name(Some("leaderboard_rank_idx".to_owned()))
                    .build(),
            )
            .build();

        self.database
            .collection::<Document>(LEADERBOARD_COLLECTION_NAME)
            .create_index(leaderboard_index)
            .await
            .map_err(|source| MongoDaoError::EnsureIndex {
                collection: LEADERBOARD_COLLECTION_NAME,
                index: "score,updatedAt",
                source,
            })?;

        let payout_index = IndexModel::builder()
            .keys(doc! {"week": 1, "paidAt": 1})
            .options(
                IndexOptions::builder()
                    .name(Some("payout_week_idx".to_owned()))
                    .build(),
            )
            .build();

        self.database
            .collection::<Document>(PAYOUT_COLLECTION_NAME)
            .create_index(payout_index)
            .await
            .map_err(|source| MongoDaoError::EnsureIndex {
                collection: PAYOUT_COLLECTION_NAME,
                index: "week,paidAt",
                source,
            })?;

        Ok(())
    }

    fn player_collection(&self) -> Collection<Document> {
        self.database.collection::<Document>(PLAYER_COLLECTION_NAME)
    }

    fn leaderboard_collection(&self) -> Collection<MongoLeaderboardDocument> {
        self.database
            .collection::<MongoLeaderboardDocument>(LEADERBOARD_COLLECTION_NAME)
    }

    fn payout_collection(&self) -> Collection<MongoPayoutDocument> {
        self.database
            .collection::<MongoPayoutDocument>(PAYOUT_COLLECTION_NAME)
    }

    async fn ping(&self) -> MongoResult<()> {
        self.database
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|source| MongoDaoError::HealthPing { source })?;
        Ok(())
    }

    /// Upsert the player with `$set` for `fields` and `$setOnInsert` for every
    /// default the caller did not supply, returning the post-image.
    async fn upsert_player(&self, id: String, fields: PlayerFields) -> MongoResult<PlayerEntity> {
        let defaults: PlayerFields = default_player_fields()
            .into_iter()
            .filter(|(key, _)| !fields.contains_key(key))
            .collect();

        let mut update = Document::new();
        if !fields.is_empty() {
            update.insert("$set", fields_to_document(fields));
        }
        if !defaults.is_empty() {
            update.insert("$setOnInsert", fields_to_document(defaults));
        }

        let document = self
            .player_collection()
            .find_one_and_update(doc! {"_id": id.as_str()}, update)
            .upsert(true)
            .return_document(ReturnDocument::After)
            .await
            .map_err(|source| MongoDaoError::SavePlayer {
                id: id.clone(),
                source,
            })?
            .ok_or_else(|| MongoDaoError::MissingUpsertResult { id })?;

        Ok(player_from_document(document))
    }

    async fn find_player(&self, id: String) -> MongoResult<Option<PlayerEntity>> {
        let document = self
            .player_collection()
            .find_one(doc! {"_id": id.as_str()})
            .await
            .map_err(|source| MongoDaoError::LoadPlayer { id, source })?;
        Ok(document.map(player_from_document))
    }

    async fn list_players(&self) -> MongoResult<Vec<PlayerEntity>> {
        let documents: Vec<Document> = self
            .player_collection()
            .find(doc! {})
            .await
            .map_err(|source| MongoDaoError::ListPlayers { source })?
            .try_collect()
            .await
            .map_err(|source| MongoDaoError::ListPlayers { source })?;

        Ok(documents.into_iter().map(player_from_document).collect())
    }

    async fn update_player(&self, id: String, update: Document, upsert: bool) -> MongoResult<()> {
        self.player_collection()
            .update_one(doc! {"_id": id.as_str()}, update)
            .upsert(upsert)
            .await
            .map_err(|source| MongoDaoError::SavePlayer { id, source })?;
        Ok(())
    }

    async fn save_score(&self, entry: LeaderboardEntryEntity) -> MongoResult<()> {
        let document: MongoLeaderboardDocument = entry.into();
        let player_id = document.player_id().to_owned();

        self.leaderboard_collection()
            .replace_one(doc! {"_id": player_id.as_str()}, &document)
            .upsert(true)
            .await
            .map_err(|source| MongoDaoError::SaveScore { player_id, source })?;

        Ok(())
    }

    async fn sorted_leaderboard(
        &self,
        sort: Document,
        limit: usize,
    ) -> MongoResult<Vec<LeaderboardEntryEntity>> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let documents: Vec<MongoLeaderboardDocument> = self
            .leaderboard_collection()
            .find(doc! {})
            .sort(sort)
            .limit(limit)
            .await
            .map_err(|source| MongoDaoError::LoadLeaderboard { source })?
            .try_collect()
            .await
            .map_err(|source| MongoDaoError::LoadLeaderboard { source })?;

        Ok(documents.into_iter().map(Into::into).collect())
    }

    async fn record_payout(&self, payout: PayoutEntity) -> MongoResult<()> {
        let player_id = payout.player_id.clone();
        let document: MongoPayoutDocument = payout.into();

        self.payout_collection()
            .insert_one(&document)
            .await
            .map_err(|source| MongoDaoError::SavePayout { player_id, source })?;

        Ok(())
    }

    async fn list_payouts(&self, week: Option<String>) -> MongoResult<Vec<PayoutEntity>> {
        let filter = match week {
            Some(week) => doc! {"week": week},
            None => doc! {},
        };

        let documents: Vec<MongoPayoutDocument> = self
            .payout_collection()
            .find(filter)
            .sort(doc! {"paidAt": 1, "position": 1})
            .await
            .map_err(|source| MongoDaoError::ListPayouts { source })?
            .try_collect()
            .await
            .map_err(|source| MongoDaoError::ListPayouts { source })?;

        documents
            .into_iter()
            .map(PayoutEntity::try_from)
            .collect::<MongoResult<Vec<_>>>()
    }
}

impl GameStore for MongoGameStore {
    fn get_or_create_player(&self, id: String) -> BoxFuture<'static, StorageResult<PlayerEntity>> {
        let store = self.clone();
        Box::pin(async move {
            store
                .upsert_player(id, PlayerFields::new())
                .await
                .map_err(Into::into)
        })
    }

    fn find_player(&self, id: String) -> BoxFuture<'static, StorageResult<Option<PlayerEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.find_player(id).await.map_err(Into::into) })
    }

    fn list_players(&self) -> BoxFuture<'static, StorageResult<Vec<PlayerEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.list_players().await.map_err(Into::into) })
    }

    fn merge_player(
        &self,
        id: String,
        fields: PlayerFields,
    ) -> BoxFuture<'static, StorageResult<PlayerEntity>> {
        let store = self.clone();
        Box::pin(async move { store.upsert_player(id, fields).await.map_err(Into::into) })
    }

    fn push_nft(&self, player_id: String, nft: Value) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move {
            // Upsert on purpose: minting for an unknown player leaves a document
            // holding only the inventory.
            let update = doc! {"$push": {NFTS_FIELD: json_to_bson(nft)}};
            store
                .update_player(player_id, update, true)
                .await
                .map_err(Into::into)
        })
    }

    fn set_equipped(
        &self,
        player_id: String,
        nft: Value,
    ) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move {
            let update = doc! {"$set": {EQUIPPED_FIELD: json_to_bson(nft)}};
            store
                .update_player(player_id, update, false)
                .await
                .map_err(Into::into)
        })
    }

    fn increment_tokens(
        &self,
        player_id: String,
        amount: i64,
    ) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move {
            let update = doc! {"$inc": {TOKENS_FIELD: amount}};
            store
                .update_player(player_id, update, true)
                .await
                .map_err(Into::into)
        })
    }

    fn save_score(&self, entry: LeaderboardEntryEntity) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.save_score(entry).await.map_err(Into::into) })
    }

    fn top_scores(
        &self,
        limit: usize,
    ) -> BoxFuture<'static, StorageResult<Vec<LeaderboardEntryEntity>>> {
        let store = self.clone();
        Box::pin(async move {
            store
                .sorted_leaderboard(doc! {"score": -1, "updatedAt": -1}, limit)
                .await
                .map_err(Into::into)
        })
    }

    fn weekly_winners(
        &self,
        count: usize,
    ) -> BoxFuture<'static, StorageResult<Vec<LeaderboardEntryEntity>>> {
        let store = self.clone();
        Box::pin(async move {
            store
                .sorted_leaderboard(doc! {"score": -1, "_id": 1}, count)
                .await
                .map_err(Into::into)
        })
    }

    fn record_payout(&self, payout: PayoutEntity) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.record_payout(payout).await.map_err(Into::into) })
    }

    fn list_payouts(
        &self,
        week: Option<String>,
    ) -> BoxFuture<'static, StorageResult<Vec<PayoutEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.list_payouts(week).await.map_err(Into::into) })
    }

    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.ping().await.map_err(Into::into) })
    }

    fn close(&self) -> BoxFuture<'static, ()> {
        let client = self.client.clone();
        Box::pin(async move {
            client.shutdown().await;
            info!("MongoDB client shut down");
        })
    }
}
