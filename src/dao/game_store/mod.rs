pub mod memory;
pub mod mongodb;

use crate::dao::models::{LeaderboardEntryEntity, PayoutEntity, PlayerEntity, PlayerFields};
use crate::dao::storage::StorageResult;
use futures::future::BoxFuture;
use serde_json::Value;

/// Abstraction over the persistence layer for players, leaderboard rows and payouts.
///
/// Every call is a single-document operation except the listing queries; no
/// method spans several documents atomically.
pub trait GameStore: Send + Sync {
    /// Return the player, inserting the default field set first when absent.
    fn get_or_create_player(&self, id: String) -> BoxFuture<'static, StorageResult<PlayerEntity>>;
    fn find_player(&self, id: String) -> BoxFuture<'static, StorageResult<Option<PlayerEntity>>>;
    fn list_players(&self) -> BoxFuture<'static, StorageResult<Vec<PlayerEntity>>>;
    /// Merge `fields` into the player (defaults fill the gaps on creation) and
    /// return the resulting document. `fields` must not carry identity keys.
    fn merge_player(
        &self,
        id: String,
        fields: PlayerFields,
    ) -> BoxFuture<'static, StorageResult<PlayerEntity>>;
    /// Append to the inventory without any existence check on the player.
    fn push_nft(&self, player_id: String, nft: Value) -> BoxFuture<'static, StorageResult<()>>;
    fn set_equipped(
        &self,
        player_id: String,
        nft: Value,
    ) -> BoxFuture<'static, StorageResult<()>>;
    fn increment_tokens(
        &self,
        player_id: String,
        amount: i64,
    ) -> BoxFuture<'static, StorageResult<()>>;
    /// Replace the leaderboard row of `entry.player_id`, inserting it when missing.
    fn save_score(&self, entry: LeaderboardEntryEntity) -> BoxFuture<'static, StorageResult<()>>;
    /// Rows ordered by score then recency, both descending.
    fn top_scores(
        &self,
        limit: usize,
    ) -> BoxFuture<'static, StorageResult<Vec<LeaderboardEntryEntity>>>;
    /// Rows ordered by score descending then player id ascending.
    fn weekly_winners(
        &self,
        count: usize,
    ) -> BoxFuture<'static, StorageResult<Vec<LeaderboardEntryEntity>>>;
    fn record_payout(&self, payout: PayoutEntity) -> BoxFuture<'static, StorageResult<()>>;
    fn list_payouts(
        &self,
        week: Option<String>,
    ) -> BoxFuture<'static, StorageResult<Vec<PayoutEntity>>>;
    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>>;
    /// Release the backend connection. Further calls may fail.
    fn close(&self) -> BoxFuture<'static, ()>;
}
