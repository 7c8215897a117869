use mongodb::error::Error as MongoError;
use thiserror::Error;

pub type MongoResult<T> = std::result::Result<T, MongoDaoError>;

#[derive(Debug, Error)]
pub enum MongoDaoError {
    #[error("failed to parse MongoDB connection URI")]
    InvalidUri {
        #[source]
        source: MongoError,
    },
    #[error("failed to build MongoDB client from options")]
    ClientConstruction {
        #[source]
        source: MongoError,
    },
    #[error("MongoDB ping failed during initial connection")]
    InitialPing {
        #[source]
        source: MongoError,
    },
    #[error("MongoDB did not answer the initial ping within {timeout_ms} ms")]
    InitialPingTimeout { timeout_ms: u128 },
    #[error("MongoDB ping health check failed")]
    HealthPing {
        #[source]
        source: MongoError,
    },
    #[error("failed to ensure index `{index}` on collection `{collection}`")]
    EnsureIndex {
        collection: &'static str,
        index: &'static str,
        #[source]
        source: MongoError,
    },
    #[error("failed to load player `{id}`")]
    LoadPlayer {
        id: String,
        #[source]
        source: MongoError,
    },
    #[error("upsert of player `{id}` returned no document")]
    MissingUpsertResult { id: String },
    #[error("failed to save player `{id}`")]
    SavePlayer {
        id: String,
        #[source]
        source: MongoError,
    },
    #[error("failed to list players")]
    ListPlayers {
        #[source]
        source: MongoError,
    },
    #[error("failed to save leaderboard entry of `{player_id}`")]
    SaveScore {
        player_id: String,
        #[source]
        source: MongoError,
    },
    #[error("failed to read leaderboard")]
    LoadLeaderboard {
        #[source]
        source: MongoError,
    },
    #[error("failed to record payout for `{player_id}`")]
    SavePayout {
        player_id: String,
        #[source]
        source: MongoError,
    },
    #[error("failed to list payouts")]
    ListPayouts {
        #[source]
        source: MongoError,
    },
    #[error("payout of `{player_id}` is malformed: {message}")]
    MalformedPayout { player_id: String, message: String },
}
