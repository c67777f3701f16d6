use card_composer::CardComposer;

use crate::app::SharedState;
use crate::config::AppConfig;

/// Load .env, read configuration and load the card assets (fatal on error).
pub fn init_foundation() -> Result<SharedState, anyhow::Error> {
    load_dotenv();
    let config = AppConfig::load();

    tracing::info!(
        asset_dir = %config.asset_dir.display(),
        "Loading card assets"
    );
    let composer = CardComposer::load(&config.card_config())?;

    tracing::info!("Settings loaded (port={})", config.server_port);
    Ok(SharedState::new(config, composer))
}

/// Load .env from multiple candidate paths.
fn load_dotenv() {
    let candidates = [".env", "../.env"];
    for path in &candidates {
        if dotenvy::from_filename(path).is_ok() {
            tracing::info!("Loaded .env from: {path}");
            return;
        }
    }
    tracing::info!("No .env file found, using system environment variables");
}
