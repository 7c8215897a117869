use mongodb::{Client, Database, bson::doc};
use tokio::time::timeout;

use super::{
    config::MongoConfig,
    error::{MongoDaoError, MongoResult},
};

/// Build the client and confirm the deployment answers a ping. No retries:
/// a failure here is reported to the caller, which treats it as fatal.
pub async fn establish_connection(config: &MongoConfig) -> MongoResult<(Client, Database)> {
    let client = Client::with_options(config.options.clone())
        .map_err(|source| MongoDaoError::ClientConstruction { source })?;
    let database = client.database(&config.database_name);

    let ping = database.run_command(doc! { "ping": 1 });
    let outcome = match config.connect_timeout {
        Some(limit) => timeout(limit, ping)
            .await
            .map_err(|_| MongoDaoError::InitialPingTimeout {
                timeout_ms: limit.as_millis(),
            })?,
        None => ping.await,
    };
    outcome.map_err(|source| MongoDaoError::InitialPing { source })?;

    Ok((client, database))
}
