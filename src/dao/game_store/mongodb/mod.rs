mod config;
mod connection;
mod error;
mod models;
pub mod store;

pub use config::MongoConfig;
pub use error::MongoDaoError;
pub use store::MongoGameStore;

use crate::dao::storage::StorageError;

impl From<MongoDaoError> for StorageError {
    fn from(err: MongoDaoError) -> Self {
        match err {
            MongoDaoError::MalformedPayout { player_id, message } => {
                StorageError::malformed(player_id, message)
            }
            err => StorageError::unavailable(err.to_string(), err),
        }
    }
}
