use std::sync::Arc;

use log::{error, info, warn};
use mongodb::Client as MongoClient;
use rocket::{
    fairing::{Fairing, Info, Kind},
    Build, Rocket,
};
use serde::Deserialize;

use crate::model::mongodb::ensure_indexes_exist;
use crate::store::{DynNomineeStore, DynVoteStore, MemoryStore, MongoStore};

/// How strictly nominee records are checked before a bulk insert.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationMode {
    /// Insert records exactly as submitted.
    #[default]
    Lenient,
    /// Reject a batch containing a blank name or a negative vote count.
    Strict,
}

/// Application configuration, derived from `Rocket.toml` and `ROCKET_*`
/// environment variables. This struct becomes managed state and can be
/// inspected by any endpoint.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    nominee_validation: ValidationMode,
}

impl Config {
    pub fn new(nominee_validation: ValidationMode) -> Self {
        Self { nominee_validation }
    }

    /// Validation applied to bulk nominee creation.
    /// Configured via `nominee_validation` in `Rocket.toml` or `ROCKET_NOMINEE_VALIDATION`.
    pub fn nominee_validation(&self) -> ValidationMode {
        self.nominee_validation
    }
}

/// A fairing that loads the application config and puts it in managed state.
pub struct ConfigFairing;

#[rocket::async_trait]
impl Fairing for ConfigFairing {
    fn info(&self) -> Info {
        Info {
            name: "Config",
            kind: Kind::Ignite,
        }
    }

    async fn on_ignite(&self, mut rocket: Rocket<Build>) -> rocket::fairing::Result {
        // Load the config.
        let config = match rocket.figment().extract::<Config>() {
            Ok(config) => config,
            Err(e) => {
                error!("Failed to load application config");
                rocket::config::pretty_print_error(e);
                return Err(rocket);
            }
        };
        info!("Nominee validation mode: {:?}", config.nominee_validation());

        // Manage the state.
        rocket = rocket.manage(config);
        Ok(rocket)
    }
}

/// Which store implementation backs the server.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
enum DbBackend {
    #[default]
    Mongodb,
    /// Volatile in-process store; contents are lost on shutdown.
    Memory,
}

/// Configuration for the database.
#[derive(Deserialize)]
struct DbConfig {
    // non-secrets
    #[serde(default)]
    db_backend: DbBackend,
    #[serde(default = "default_database_name")]
    db_name: String,
    // secrets
    db_uri: Option<String>,
}

fn default_database_name() -> String {
    "nominations".to_string()
}

/// A fairing that loads the database config, connects to the database,
/// performs any setup necessary, and places the nominee and vote stores
/// into managed state.
pub struct DatabaseFairing;

#[rocket::async_trait]
impl Fairing for DatabaseFairing {
    fn info(&self) -> Info {
        Info {
            name: "Database",
            kind: Kind::Ignite,
        }
    }

    async fn on_ignite(&self, rocket: Rocket<Build>) -> rocket::fairing::Result {
        // Load the config.
        let config = match rocket.figment().extract::<DbConfig>() {
            Ok(config) => config,
            Err(e) => {
                error!("Failed to load database config");
                rocket::config::pretty_print_error(e);
                return Err(rocket);
            }
        };

        match config.db_backend {
            DbBackend::Memory => {
                warn!("Using the in-memory store; nothing will be persisted");
                let store = MemoryStore::default();
                Ok(manage_stores(rocket, Arc::new(store.clone()), Arc::new(store)))
            }
            DbBackend::Mongodb => {
                let Some(db_uri) = config.db_uri else {
                    error!("`db_uri` must be set when `db_backend` is \"mongodb\"");
                    return Err(rocket);
                };
                info!("Loaded database config, connecting...");
                // Construct the connection.
                let client = match MongoClient::with_uri_str(db_uri).await {
                    Ok(client) => client,
                    Err(e) => {
                        error!("Failed to connect to database: {e}");
                        return Err(rocket);
                    }
                };
                let db = client.database(&config.db_name);

                // Ensure the required indexes exist.
                if let Err(e) = ensure_indexes_exist(&db).await {
                    error!("Failed to connect to database: {e}");
                    return Err(rocket);
                }
                info!("...database connection online!");

                let store = MongoStore::from_db(&db);
                Ok(manage_stores(rocket, Arc::new(store.clone()), Arc::new(store)))
            }
        }
    }
}

/// Place the store handles into managed state, where the handlers pick them up.
pub fn manage_stores(
    rocket: Rocket<Build>,
    nominees: DynNomineeStore,
    votes: DynVoteStore,
) -> Rocket<Build> {
    rocket.manage(nominees).manage(votes)
}
