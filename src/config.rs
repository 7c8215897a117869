//! Application-level configuration: storage connection settings read from the
//! environment, and game tuning (weekly prize table) read from a JSON file.

use std::{
    env,
    ffi::OsString,
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
    time::Duration,
};

use serde::Deserialize;
use thiserror::Error;
use tracing::{info, warn};

/// Default location on disk where the server looks for the JSON configuration.
const DEFAULT_CONFIG_PATH: &str = "config/app.json";
/// Environment variable that overrides [`DEFAULT_CONFIG_PATH`].
const CONFIG_PATH_ENV: &str = "RPG_BACK_CONFIG_PATH";
/// Tokens paid to the weekly top five, by position.
const DEFAULT_WEEKLY_PRIZES: [i64; 5] = [1000, 500, 300, 200, 100];

const MONGO_URI_ENV: &str = "MONGO_URI";
const MONGO_DB_ENV: &str = "MONGO_DB";
const CONNECT_TIMEOUT_ENV: &str = "MONGO_CONNECT_TIMEOUT_MS";
const DEFAULT_DATABASE: &str = "rpg";
const DEFAULT_PORT: u16 = 3000;

/// Problems that prevent the process from starting.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A mandatory environment variable is unset or empty.
    #[error("environment variable `{var}` is not set")]
    MissingEnvVar {
        /// Name of the missing variable.
        var: &'static str,
    },
}

/// Connection and listener settings resolved once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// MongoDB connection string.
    pub mongo_uri: String,
    /// Database holding the players, leaderboard and payouts collections.
    pub mongo_db: String,
    /// TCP port the HTTP server binds on every interface.
    pub port: u16,
    /// Upper bound for the startup connection attempt.
    pub connect_timeout: Option<Duration>,
}

impl ServerConfig {
    /// Read the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mongo_uri = lookup(MONGO_URI_ENV)
            .filter(|value| !value.trim().is_empty())
            .ok_or(ConfigError::MissingEnvVar { var: MONGO_URI_ENV })?;

        let mongo_db = lookup(MONGO_DB_ENV)
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_DATABASE.to_owned());

        let port = match lookup("PORT").or_else(|| lookup("SERVER_PORT")) {
            Some(raw) => raw.trim().parse::<u16>().unwrap_or_else(|_| {
                warn!(value = %raw, default = DEFAULT_PORT, "invalid port; using default");
                DEFAULT_PORT
            }),
            None => DEFAULT_PORT,
        };

        let connect_timeout = lookup(CONNECT_TIMEOUT_ENV).and_then(|raw| {
            match raw.trim().parse::<u64>() {
                Ok(millis) if millis > 0 => Some(Duration::from_millis(millis)),
                _ => {
                    warn!(value = %raw, "invalid connection timeout; ignoring it");
                    None
                }
            }
        });

        Ok(Self {
            mongo_uri,
            mongo_db,
            port,
            connect_timeout,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Immutable game tuning shared across the application.
pub struct GameConfig {
    weekly_prizes: Vec<i64>,
}

impl GameConfig {
    /// Load the game configuration from disk, falling back to the built-in prize table.
    pub fn load() -> Self {
        Self::load_from(&resolve_config_path(|var| env::var_os(var)))
    }

    fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str::<RawConfig>(&contents) {
                Ok(raw) => match Self::try_from(raw) {
                    Ok(config) => {
                        info!(
                            path = %path.display(),
                            winners = config.weekly_prizes.len(),
                            "loaded weekly prize table from config"
                        );
                        config
                    }
                    Err(reason) => {
                        warn!(
                            path = %path.display(),
                            reason,
                            "rejected config; falling back to defaults"
                        );
                        Self::default()
                    }
                },
                Err(err) => {
                    warn!(
                        path = %path.display(),
                        error = %err,
                        "failed to parse config; falling back to defaults"
                    );
                    Self::default()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    path = %path.display(),
                    "config file not found; using built-in defaults"
                );
                Self::default()
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to read config; falling back to defaults"
                );
                Self::default()
            }
        }
    }

    /// Build a configuration from an explicit prize table.
    ///
    /// The table must be non-empty and hold no negative amount.
    pub fn with_weekly_prizes(weekly_prizes: Vec<i64>) -> Result<Self, &'static str> {
        if weekly_prizes.is_empty() {
            return Err("weekly prize table is empty");
        }
        if weekly_prizes.iter().any(|amount| *amount < 0) {
            return Err("weekly prize table holds a negative amount");
        }
        Ok(Self { weekly_prizes })
    }

    /// Prize per leaderboard position; its length is the number of winners.
    pub fn weekly_prizes(&self) -> &[i64] {
        &self.weekly_prizes
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            weekly_prizes: DEFAULT_WEEKLY_PRIZES.to_vec(),
        }
    }
}

#[derive(Debug, Deserialize)]
/// JSON representation of the configuration file located at [`DEFAULT_CONFIG_PATH`].
struct RawConfig {
    weekly_prizes: Vec<i64>,
}

impl TryFrom<RawConfig> for GameConfig {
    type Error = &'static str;

    fn try_from(value: RawConfig) -> Result<Self, Self::Error> {
        Self::with_weekly_prizes(value.weekly_prizes)
    }
}

/// Resolve the configuration path taking the environment override into account.
fn resolve_config_path(lookup: impl Fn(&str) -> Option<OsString>) -> PathBuf {
    lookup(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .filter(|path| !path.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

#[cfg(test)]
mod tests {
    use std::{collections::HashMap, io::Write};

    use tempfile::NamedTempFile;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| ((*key).to_owned(), (*value).to_owned()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn missing_mongo_uri_is_fatal() {
        let err = ServerConfig::from_lookup(lookup_from(&[("PORT", "4000")])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvVar { var: "MONGO_URI" }));

        let err = ServerConfig::from_lookup(lookup_from(&[("MONGO_URI", "  ")])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvVar { .. }));
    }

    #[test]
    fn defaults_apply_when_optional_vars_are_absent() {
        let config =
            ServerConfig::from_lookup(lookup_from(&[("MONGO_URI", "mongodb://db:27017")]))
                .unwrap();
        assert_eq!(config.mongo_uri, "mongodb://db:27017");
        assert_eq!(config.mongo_db, "rpg");
        assert_eq!(config.port, 3000);
        assert_eq!(config.connect_timeout, None);
    }

    #[test]
    fn optional_vars_override_defaults() {
        let config = ServerConfig::from_lookup(lookup_from(&[
            ("MONGO_URI", "mongodb://db:27017"),
            ("MONGO_DB", "arena"),
            ("SERVER_PORT", "8081"),
            ("MONGO_CONNECT_TIMEOUT_MS", "2500"),
        ]))
        .unwrap();
        assert_eq!(config.mongo_db, "arena");
        assert_eq!(config.port, 8081);
        assert_eq!(config.connect_timeout, Some(Duration::from_millis(2500)));
    }

    #[test]
    fn invalid_port_falls_back_to_default() {
        let config = ServerConfig::from_lookup(lookup_from(&[
            ("MONGO_URI", "mongodb://db"),
            ("PORT", "http"),
        ]))
        .unwrap();
        assert_eq!(config.port, 3000);
    }

    #[test]
    fn prize_table_rejects_negative_or_empty() {
        assert!(GameConfig::with_weekly_prizes(vec![]).is_err());
        assert!(GameConfig::with_weekly_prizes(vec![10, -1]).is_err());
        assert_eq!(
            GameConfig::with_weekly_prizes(vec![7, 3]).unwrap().weekly_prizes(),
            [7, 3]
        );
        assert_eq!(
            GameConfig::default().weekly_prizes(),
            [1000, 500, 300, 200, 100]
        );
    }

    fn config_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn prize_table_is_read_from_file() {
        let file = config_file(r#"{ "weekly_prizes": [50, 20] }"#);
        assert_eq!(GameConfig::load_from(file.path()).weekly_prizes(), [50, 20]);
    }

    #[test]
    fn unusable_config_files_fall_back_to_defaults() {
        for contents in [
            "not json",
            "{}",
            r#"{ "weekly_prizes": [] }"#,
            r#"{ "weekly_prizes": [100, -5] }"#,
            r#"{ "weekly_prizes": "lots" }"#,
        ] {
            let file = config_file(contents);
            assert_eq!(
                GameConfig::load_from(file.path()),
                GameConfig::default(),
                "{contents}"
            );
        }
    }

    #[test]
    fn bundled_config_file_loads() {
        let config = GameConfig::load_from(Path::new(DEFAULT_CONFIG_PATH));
        assert_eq!(config.weekly_prizes(), [1000, 500, 300, 200, 100]);
    }

    #[test]
    fn config_path_env_overrides_default() {
        let path = resolve_config_path(|var| {
            (var == CONFIG_PATH_ENV).then(|| OsString::from("/etc/rpg/app.json"))
        });
        assert_eq!(path, PathBuf::from("/etc/rpg/app.json"));

        let path = resolve_config_path(|_| Some(OsString::new()));
        assert_eq!(path, PathBuf::from(DEFAULT_CONFIG_PATH));
        assert_eq!(resolve_config_path(|_| None), PathBuf::from(DEFAULT_CONFIG_PATH));
    }

    #[test]
    fn missing_config_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = GameConfig::load_from(&dir.path().join("absent.json"));
        assert_eq!(config, GameConfig::default());
    }
}
