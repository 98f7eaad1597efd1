//! Admin service CLI
//!
//! Runs the server headless (systemd, Docker) and manages the database
//! schema.
//!
//! ```sh
//! # Run with default config (~/.config/admin-service/config.toml)
//! admin-cli
//!
//! # Custom config path and port
//! admin-cli --config /etc/admin-service/config.toml --port 8080
//!
//! # Validate config without starting
//! admin-cli --check
//!
//! # Schema management
//! admin-cli migrate status
//! admin-cli migrate up
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use sea_orm_migration::MigratorTrait;
use tracing::{error, info};

use admin_service::config::AppConfig;
use admin_service::infrastructure::database::migrator::Migrator;
use admin_service::infrastructure::database::redact_url;
use admin_service::server::{init_tracing, ServerHandle, ServerOptions};
use admin_service::{init_database, DatabaseConfig};

#[derive(Parser, Debug)]
#[command(
    name = "admin-cli",
    version,
    about = "CRUD admin backend: users, roles, sessions and Excel import/export",
    long_about = "Admin service REST API server and schema migration runner.\n\n\
                  Default config: ~/.config/admin-service/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "ADMIN_CONFIG")]
    config: Option<PathBuf>,

    /// Override the REST API listen port.
    #[arg(long)]
    port: Option<u16>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long)]
    log_level: Option<String>,

    /// Validate the configuration file and exit without starting the server.
    #[arg(long)]
    check: bool,

    /// Skip database migrations on startup.
    #[arg(long)]
    no_migrate: bool,

    /// Skip creating the default admin user.
    #[arg(long)]
    no_admin: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Manage the database schema instead of starting the server.
    Migrate {
        #[command(subcommand)]
        action: MigrateAction,
    },
}

#[derive(Subcommand, Debug, Clone, Copy)]
enum MigrateAction {
    /// Apply all pending migrations.
    Up,
    /// Roll back the last applied migration.
    Down,
    /// Show applied and pending migrations.
    Status,
    /// Drop every table and reapply all migrations.
    Fresh,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // ── Load configuration ─────────────────────────────────────
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(admin_service::resolve_config_path);

    let (mut config, load_error) = match AppConfig::load(&config_path) {
        Ok(cfg) => (cfg, None),
        Err(e) => {
            let mut cfg = AppConfig::default();
            cfg.apply_env_overrides();
            (cfg, Some(e))
        }
    };

    // ── Apply CLI overrides ────────────────────────────────────
    if let Some(ref level) = cli.log_level {
        config.logging.level = level.clone();
    }
    init_tracing(&config);
    match load_error {
        None => info!("Configuration loaded from {}", config_path.display()),
        Some(e) => {
            error!("Failed to load config from {}: {}", config_path.display(), e);
            error!("Using default configuration.");
        }
    }
    if let Some(port) = cli.port {
        info!("CLI override: port = {}", port);
        config.server.port = port;
    }

    // ── Config validation mode ─────────────────────────────────
    if cli.check {
        println!("Configuration is valid");
        println!("   Config file : {}", config_path.display());
        println!("   API address : {}", config.server.address());
        println!("   Database    : {}", redact_url(&config.database.url));
        println!("   Cache       : {:?}", config.cache.backend);
        println!("   Log level   : {}", config.logging.level);
        return Ok(());
    }

    if let Some(Command::Migrate { action }) = cli.command {
        return migrate(&config, action).await;
    }

    // ── Start server ───────────────────────────────────────────
    let handle = ServerHandle::start(ServerOptions {
        config,
        auto_migrate: !cli.no_migrate,
        create_default_admin: !cli.no_admin,
    })
    .await?;

    handle.install_signal_handler();
    info!("Press Ctrl+C to shutdown gracefully.");
    handle.wait().await;

    Ok(())
}

async fn migrate(config: &AppConfig, action: MigrateAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = init_database(&DatabaseConfig::from(&config.database)).await?;
    match action {
        MigrateAction::Up => Migrator::up(&db, None).await?,
        MigrateAction::Down => Migrator::down(&db, Some(1)).await?,
        MigrateAction::Status => Migrator::status(&db).await?,
        MigrateAction::Fresh => Migrator::fresh(&db).await?,
    }
    info!("Migration {:?} finished", action);
    db.close().await?;
    Ok(())
}
