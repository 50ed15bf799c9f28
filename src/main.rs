use anyhow::Result;
use mt_gateway::config::Config;
use mt_gateway::server::{self, AppState};
use mt_gateway::{LibreTranslateClient, MachineTranslator};
use std::sync::Arc;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored in production)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("mt_gateway=info".parse()?),
        )
        .init();

    info!("Starting machine translation gateway");

    let config = Arc::new(Config::from_env()?);
    let client = LibreTranslateClient::from_config(&config);

    if client.is_available().await {
        info!("LibreTranslate reachable at {}", client.base_url());
    } else {
        warn!(
            "LibreTranslate not reachable at {}, continuing anyway",
            client.base_url()
        );
    }

    let state = AppState::new(config, Arc::new(client));
    server::serve(state).await
}
