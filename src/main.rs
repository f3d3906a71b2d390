use anyhow::Result;
use artifex::api::HttpGameApi;
use artifex::config::{self, ArtifexConfig};
use artifex::service::CharacterService;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "artifex=info".into()),
        )
        .init();

    info!("Artifex starting...");

    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "artifex.toml".to_string());
    let config = match config::load_config(&config_path) {
        Ok(config) => config,
        Err(err) => {
            info!(path = %config_path, error = %err, "No config file, using defaults");
            ArtifexConfig::default()
        }
    };

    let api = Arc::new(HttpGameApi::new(&config.api.base_url, &config.api.token));
    let service = CharacterService::new(api, config);
    service.initialize().await;

    info!(
        characters = service.character_names().len(),
        "Roster ready"
    );

    tokio::signal::ctrl_c().await?;
    info!("Shutting down");
    service.shutdown();

    Ok(())
}
