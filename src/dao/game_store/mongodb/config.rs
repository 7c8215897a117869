use std::time::Duration;

use mongodb::options::ClientOptions;

use super::error::{MongoDaoError, MongoResult};

const APP_NAME: &str = "rpg-state-back";

#[derive(Clone)]
pub struct MongoConfig {
    pub options: ClientOptions,
    pub database_name: String,
    pub connect_timeout: Option<Duration>,
}

impl MongoConfig {
    /// Parse the connection string and apply the optional startup timeout.
    ///
    /// The timeout bounds socket connection and server selection so a dead
    /// deployment fails the first ping instead of hanging the process.
    pub async fn from_uri(
        uri: &str,
        database_name: &str,
        connect_timeout: Option<Duration>,
    ) -> MongoResult<Self> {
        let mut options = ClientOptions::parse(uri)
            .await
            .map_err(|source| MongoDaoError::InvalidUri { source })?;
        options.app_name.get_or_insert_with(|| APP_NAME.to_owned());
        if let Some(timeout) = connect_timeout {
            options.connect_timeout = Some(timeout);
            options.server_selection_timeout = Some(timeout);
        }

        Ok(Self {
            options,
            database_name: database_name.to_owned(),
            connect_timeout,
        })
    }
}
