use std::sync::Arc;

use log::info;

use crate::auth::TokenIssuer;
use crate::config::{Config, StorageBackend};
use crate::services::{AuthService, TaskService};
use crate::store::{MemoryStore, PgStore, TaskStore, UserStore};

/// Shared application state registered with `web::Data`.
pub struct AppState {
    pub auth: AuthService,
    pub tasks: TaskService,
}

impl AppState {
    pub fn new(
        users: Arc<dyn UserStore>,
        tasks: Arc<dyn TaskStore>,
        tokens: TokenIssuer,
        bcrypt_cost: u32,
    ) -> Self {
        Self {
            auth: AuthService::new(users, tokens, bcrypt_cost),
            tasks: TaskService::new(tasks),
        }
    }

    /// State backed by a fresh `MemoryStore`.
    pub fn in_memory(jwt_secret: &str, jwt_expires_in: u64, bcrypt_cost: u32) -> Self {
        let store = Arc::new(MemoryStore::new());
        Self::new(
            store.clone(),
            store,
            TokenIssuer::new(jwt_secret, jwt_expires_in),
            bcrypt_cost,
        )
    }

    /// Connects the configured storage backend and wires the services.
    pub async fn from_config(config: &Config) -> anyhow::Result<Self> {
        let tokens = TokenIssuer::new(&config.jwt_secret, config.jwt_expires_in);
        match &config.storage {
            StorageBackend::Postgres {
                database_url,
                max_connections,
            } => {
                let store = Arc::new(PgStore::connect(database_url, *max_connections).await?);
                info!("Using Postgres storage");
                Ok(Self::new(store.clone(), store, tokens, config.bcrypt_cost))
            }
            StorageBackend::Memory => {
                info!("Using in-memory storage; data is lost on restart");
                let store = Arc::new(MemoryStore::new());
                Ok(Self::new(store.clone(), store, tokens, config.bcrypt_cost))
            }
        }
    }
}
