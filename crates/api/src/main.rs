use std::net::SocketAddr;

use anyhow::Context;

use stockroom_api::config::{self, ApiConfig};
use stockroom_observability::LogConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let logs = stockroom_observability::init(&LogConfig {
        log_dir: config::log_dir_from_env(),
        ..LogConfig::default()
    })?;

    let config = ApiConfig::from_env()?;
    let app = stockroom_api::app::build_app(&config, logs).await?;

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>()).await?;
    Ok(())
}
