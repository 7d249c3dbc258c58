//! Process configuration, read once from the environment.

use std::net::SocketAddr;
use std::path::PathBuf;

use stockroom_products::DEFAULT_LOW_STOCK_THRESHOLD;

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub bind_addr: SocketAddr,
    pub jwt_secret: String,
    pub session_ttl_minutes: i64,
    /// Postgres URL; `None` selects the in-memory store.
    pub database_url: Option<String>,
    pub log_dir: PathBuf,
    pub admin_username: String,
    /// Bootstrap admin is only seeded when a password is configured.
    pub admin_password: Option<String>,
    pub low_stock_threshold: i64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            jwt_secret: "dev-secret".to_string(),
            session_ttl_minutes: 480,
            database_url: None,
            log_dir: PathBuf::from("logs"),
            admin_username: "admin".to_string(),
            admin_password: None,
            low_stock_threshold: DEFAULT_LOW_STOCK_THRESHOLD,
        }
    }
}

impl ApiConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let defaults = Self::default();

        let bind_addr = match std::env::var("BIND_ADDR") {
            Ok(raw) => raw
                .parse()
                .map_err(|e| anyhow::anyhow!("invalid BIND_ADDR {raw:?}: {e}"))?,
            Err(_) => defaults.bind_addr,
        };

        let jwt_secret = std::env::var("JWT_SECRET").unwrap_or_else(|_| {
            tracing::warn!("JWT_SECRET not set; using insecure dev default");
            defaults.jwt_secret.clone()
        });

        let use_persistent = std::env::var("USE_PERSISTENT_STORES")
            .unwrap_or_else(|_| "false".to_string())
            .parse::<bool>()
            .unwrap_or(false);
        let database_url = if use_persistent {
            Some(std::env::var("DATABASE_URL").map_err(|_| {
                anyhow::anyhow!("DATABASE_URL must be set when USE_PERSISTENT_STORES=true")
            })?)
        } else {
            None
        };

        let admin_password = std::env::var("ADMIN_PASSWORD").ok().filter(|p| !p.is_empty());
        if admin_password.is_none() {
            tracing::warn!("ADMIN_PASSWORD not set; no bootstrap admin will be seeded");
        }

        Ok(Self {
            bind_addr,
            jwt_secret,
            session_ttl_minutes: parse_or("SESSION_TTL_MINUTES", defaults.session_ttl_minutes),
            database_url,
            log_dir: log_dir_from_env(),
            admin_username: std::env::var("ADMIN_USERNAME").unwrap_or(defaults.admin_username),
            admin_password,
            low_stock_threshold: parse_or("LOW_STOCK_THRESHOLD", defaults.low_stock_threshold),
        })
    }
}

/// `LOG_DIR`, or `logs`. Read separately so logging can start before the rest
/// of the configuration is parsed.
pub fn log_dir_from_env() -> PathBuf {
    std::env::var("LOG_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("logs"))
}

fn parse_or(var: &str, default: i64) -> i64 {
    match std::env::var(var) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(var, value = %raw, default, "unparsable value; using default");
            default
        }),
        Err(_) => default,
    }
}
