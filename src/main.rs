//! Admin service binary.
//!
//! Reads configuration from TOML (`ADMIN_CONFIG` or
//! ~/.config/admin-service/config.toml) and serves the REST API until
//! SIGTERM / SIGINT.

use tracing::{error, info};

use admin_service::server::{init_tracing, ServerHandle, ServerOptions};
use admin_service::{resolve_config_path, AppConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = resolve_config_path();
    let (config, load_error) = match AppConfig::load(&config_path) {
        Ok(cfg) => (cfg, None),
        Err(e) => {
            let mut cfg = AppConfig::default();
            cfg.apply_env_overrides();
            (cfg, Some(e))
        }
    };

    init_tracing(&config);
    match load_error {
        None => info!("Configuration loaded from {}", config_path.display()),
        Some(e) => error!("Failed to load config: {}. Using defaults.", e),
    }

    let handle = ServerHandle::start(ServerOptions {
        config,
        ..ServerOptions::default()
    })
    .await?;
    handle.install_signal_handler();
    handle.wait().await;
    Ok(())
}
