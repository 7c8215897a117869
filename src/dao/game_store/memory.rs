//! In-process [`GameStore`] used by tests and local experiments.
//!
//! Mirrors the document semantics of the MongoDB backend: merges are field
//! level, inventory pushes upsert a bare document, and every write touches a
//! single player only.

use std::{cmp::Ordering, io, sync::Arc};

use dashmap::{DashMap, DashSet};
use futures::future::BoxFuture;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::debug;

use crate::dao::{
    game_store::GameStore,
    models::{
        EQUIPPED_FIELD, LeaderboardEntryEntity, NFTS_FIELD, PayoutEntity, PlayerEntity,
        PlayerFields, TOKENS_FIELD, default_player_fields,
    },
    storage::{StorageError, StorageResult},
};

/// Thread-safe store keeping every collection in memory.
#[derive(Clone, Default)]
pub struct MemoryGameStore {
    inner: Arc<MemoryInner>,
}

#[derive(Default)]
struct MemoryInner {
    players: DashMap<String, PlayerFields>,
    leaderboard: DashMap<String, LeaderboardEntryEntity>,
    payouts: RwLock<Vec<PayoutEntity>>,
    failing_players: DashSet<String>,
}

impl MemoryGameStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every write against `player_id` fail as if the backend were
    /// unreachable. Lazy creation counts as a write; reading an existing
    /// document does not.
    pub fn fail_writes_for(&self, player_id: impl Into<String>) {
        self.inner.failing_players.insert(player_id.into());
    }

    /// Undo [`MemoryGameStore::fail_writes_for`].
    pub fn restore_writes_for(&self, player_id: &str) {
        self.inner.failing_players.remove(player_id);
    }
}

impl MemoryInner {
    fn ensure_writable(&self, player_id: &str) -> StorageResult<()> {
        if self.failing_players.contains(player_id) {
            debug!(player_id, "rejecting write for player marked as failing");
            return Err(StorageError::unavailable(
                format!("write rejected for player `{player_id}`"),
                io::Error::other("injected storage failure"),
            ));
        }
        Ok(())
    }

    fn get_or_create_player(&self, id: String) -> StorageResult<PlayerEntity> {
        if let Some(fields) = self.players.get(&id) {
            return Ok(PlayerEntity {
                id: id.clone(),
                fields: fields.clone(),
            });
        }

        self.ensure_writable(&id)?;
        let fields = self
            .players
            .entry(id.clone())
            .or_insert_with(default_player_fields)
            .clone();
        Ok(PlayerEntity { id, fields })
    }

    fn merge_player(&self, id: String, fields: PlayerFields) -> StorageResult<PlayerEntity> {
        self.ensure_writable(&id)?;
        let mut document = self
            .players
            .entry(id.clone())
            .or_insert_with(default_player_fields);
        document.extend(fields);
        Ok(PlayerEntity {
            id,
            fields: document.clone(),
        })
    }

    fn push_nft(&self, player_id: String, nft: Value) -> StorageResult<()> {
        self.ensure_writable(&player_id)?;
        let mut document = self.players.entry(player_id.clone()).or_default();
        match document
            .entry(NFTS_FIELD)
            .or_insert_with(|| Value::Array(Vec::new()))
        {
            Value::Array(items) => items.push(nft),
            _ => {
                return Err(StorageError::malformed(
                    player_id,
                    "cannot push onto a non-array nfts field",
                ));
            }
        }
        Ok(())
    }

    fn set_equipped(&self, player_id: String, nft: Value) -> StorageResult<()> {
        self.ensure_writable(&player_id)?;
        if let Some(mut document) = self.players.get_mut(&player_id) {
            document.insert(EQUIPPED_FIELD.to_owned(), nft);
        }
        Ok(())
    }

    fn increment_tokens(&self, player_id: String, amount: i64) -> StorageResult<()> {
        self.ensure_writable(&player_id)?;
        let mut document = self.players.entry(player_id.clone()).or_default();
        let next = match document.get(TOKENS_FIELD) {
            None => Value::from(amount),
            Some(Value::Number(current)) => match current.as_i64() {
                Some(current) => Value::from(current.saturating_add(amount)),
                None => Value::from(current.as_f64().unwrap_or_default() + amount as f64),
            },
            Some(_) => {
                return Err(StorageError::malformed(
                    player_id,
                    "cannot increment a non-numeric tokens field",
                ));
            }
        };
        document.insert(TOKENS_FIELD.to_owned(), next);
        Ok(())
    }

    fn sorted_leaderboard<F>(&self, limit: usize, order: F) -> Vec<LeaderboardEntryEntity>
    where
        F: Fn(&LeaderboardEntryEntity, &LeaderboardEntryEntity) -> Ordering,
    {
        let mut entries: Vec<_> = self
            .leaderboard
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        entries.sort_by(order);
        entries.truncate(limit);
        entries
    }
}

impl GameStore for MemoryGameStore {
    fn get_or_create_player(&self, id: String) -> BoxFuture<'static, StorageResult<PlayerEntity>> {
        let inner = self.inner.clone();
        Box::pin(async move { inner.get_or_create_player(id) })
    }

    fn find_player(&self, id: String) -> BoxFuture<'static, StorageResult<Option<PlayerEntity>>> {
        let inner = self.inner.clone();
        Box::pin(async move {
            Ok(inner.players.get(&id).map(|fields| PlayerEntity {
                id: id.clone(),
                fields: fields.clone(),
            }))
        })
    }

    fn list_players(&self) -> BoxFuture<'static, StorageResult<Vec<PlayerEntity>>> {
        let inner = self.inner.clone();
        Box::pin(async move {
            let mut players: Vec<_> = inner
                .players
                .iter()
                .map(|entry| PlayerEntity {
                    id: entry.key().clone(),
                    fields: entry.value().clone(),
                })
                .collect();
            players.sort_by(|a, b| a.id.cmp(&b.id));
            Ok(players)
        })
    }

    fn merge_player(
        &self,
        id: String,
        fields: PlayerFields,
    ) -> BoxFuture<'static, StorageResult<PlayerEntity>> {
        let inner = self.inner.clone();
        Box::pin(async move { inner.merge_player(id, fields) })
    }

    fn push_nft(&self, player_id: String, nft: Value) -> BoxFuture<'static, StorageResult<()>> {
        let inner = self.inner.clone();
        Box::pin(async move { inner.push_nft(player_id, nft) })
    }

    fn set_equipped(
        &self,
        player_id: String,
        nft: Value,
    ) -> BoxFuture<'static, StorageResult<()>> {
        let inner = self.inner.clone();
        Box::pin(async move { inner.set_equipped(player_id, nft) })
    }

    fn increment_tokens(
        &self,
        player_id: String,
        amount: i64,
    ) -> BoxFuture<'static, StorageResult<()>> {
        let inner = self.inner.clone();
        Box::pin(async move { inner.increment_tokens(player_id, amount) })
    }

    fn save_score(&self, entry: LeaderboardEntryEntity) -> BoxFuture<'static, StorageResult<()>> {
        let inner = self.inner.clone();
        Box::pin(async move {
            inner.leaderboard.insert(entry.player_id.clone(), entry);
            Ok(())
        })
    }

    fn top_scores(
        &self,
        limit: usize,
    ) -> BoxFuture<'static, StorageResult<Vec<LeaderboardEntryEntity>>> {
        let inner = self.inner.clone();
        Box::pin(async move {
            Ok(inner.sorted_leaderboard(limit, |a, b| {
                b.score
                    .cmp(&a.score)
                    .then_with(|| b.updated_at.cmp(&a.updated_at))
            }))
        })
    }

    fn weekly_winners(
        &self,
        count: usize,
    ) -> BoxFuture<'static, StorageResult<Vec<LeaderboardEntryEntity>>> {
        let inner = self.inner.clone();
        Box::pin(async move {
            Ok(inner.sorted_leaderboard(count, |a, b| {
                b.score
                    .cmp(&a.score)
                    .then_with(|| a.player_id.cmp(&b.player_id))
            }))
        })
    }

    fn record_payout(&self, payout: PayoutEntity) -> BoxFuture<'static, StorageResult<()>> {
        let inner = self.inner.clone();
        Box::pin(async move {
            inner.payouts.write().await.push(payout);
            Ok(())
        })
    }

    fn list_payouts(
        &self,
        week: Option<String>,
    ) -> BoxFuture<'static, StorageResult<Vec<PayoutEntity>>> {
        let inner = self.inner.clone();
        Box::pin(async move {
            let guard = inner.payouts.read().await;
            let mut payouts: Vec<_> = guard
                .iter()
                .filter(|payout| week.as_deref().is_none_or(|week| payout.week == week))
                .cloned()
                .collect();
            payouts.sort_by(|a, b| {
                a.paid_at
                    .cmp(&b.paid_at)
                    .then_with(|| a.position.cmp(&b.position))
            });
            Ok(payouts)
        })
    }

    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
        Box::pin(async { Ok(()) })
    }

    fn close(&self) -> BoxFuture<'static, ()> {
        Box::pin(async {})
    }
}
