//! Shared application services, injected into handlers as an `Extension`.

use std::sync::Arc;

use chrono::Duration;

use stockroom_auth::{Hs256Jwt, NewStaffUser, Role};
use stockroom_infra::{InMemoryStore, PostgresStore, Store, StoreError};
use stockroom_observability::LogFiles;

use crate::config::ApiConfig;

pub struct AppServices {
    pub store: Arc<dyn Store>,
    pub jwt: Arc<Hs256Jwt>,
    pub logs: LogFiles,
    pub low_stock_threshold: i64,
}

impl AppServices {
    pub fn new(store: Arc<dyn Store>, jwt: Arc<Hs256Jwt>, logs: LogFiles, low_stock_threshold: i64) -> Self {
        Self {
            store,
            jwt,
            logs,
            low_stock_threshold,
        }
    }
}

/// Build services from configuration: pick the store, then seed the admin.
pub async fn build_services(config: &ApiConfig, logs: LogFiles) -> anyhow::Result<AppServices> {
    let store: Arc<dyn Store> = match &config.database_url {
        Some(url) => {
            let store = PostgresStore::connect(url, 10).await?;
            store.migrate().await?;
            tracing::info!("using postgres store");
            Arc::new(store)
        }
        None => {
            tracing::info!("using in-memory store");
            Arc::new(InMemoryStore::new())
        }
    };

    if let Some(password) = &config.admin_password {
        seed_admin(store.as_ref(), &config.admin_username, password).await?;
    }

    let jwt = Arc::new(Hs256Jwt::new(
        config.jwt_secret.as_bytes(),
        Duration::minutes(config.session_ttl_minutes),
    ));

    Ok(AppServices::new(store, jwt, logs, config.low_stock_threshold))
}

/// Create the bootstrap admin unless an account with that name already exists.
pub async fn seed_admin(store: &dyn Store, username: &str, password: &str) -> Result<(), StoreError> {
    if store.find_user_by_username(username).await?.is_some() {
        tracing::debug!(username, "bootstrap admin already present");
        return Ok(());
    }
    let new = NewStaffUser::new(username, password, Role::Admin).validated()?;
    store.create_user(new).await?;
    tracing::info!(username, "seeded bootstrap admin");
    Ok(())
}
