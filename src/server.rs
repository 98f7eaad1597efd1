//! Reusable server runtime.
//!
//! [`ServerHandle`] owns the full lifecycle: metrics recorder, database and
//! migrations, default administrator, cache, REST API and graceful shutdown.
//! The `admin-service` binary and the CLI both start the server through it.

use std::sync::{Arc, OnceLock};

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use tracing::{error, info, warn};

use crate::application::{RoleService, UserService};
use crate::config::AppConfig;
use crate::infrastructure::crypto::jwt::JwtConfig;
use crate::infrastructure::database::migrator::Migrator;
use crate::shared::shutdown::{ShutdownCoordinator, ShutdownSignal};
use crate::{create_api_router, create_cache, init_database, AppState, DatabaseConfig};

/// Options for starting the admin service.
pub struct ServerOptions {
    pub config: AppConfig,
    /// Run database migrations on startup (default: true).
    pub auto_migrate: bool,
    /// Create the configured administrator when no user exists (default: true).
    pub create_default_admin: bool,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            config: AppConfig::default(),
            auto_migrate: true,
            create_default_admin: true,
        }
    }
}

/// Handle to a running admin service.
///
/// ```rust,no_run
/// use admin_service::server::{ServerHandle, ServerOptions};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let handle = ServerHandle::start(ServerOptions::default()).await?;
///     handle.install_signal_handler();
///     handle.wait().await;
///     Ok(())
/// }
/// ```
pub struct ServerHandle {
    pub user_service: Arc<UserService>,
    pub role_service: Arc<RoleService>,
    /// The configuration the server was started with.
    pub config: AppConfig,
    /// Port the REST API is bound to.
    pub port: u16,

    db: DatabaseConnection,
    shutdown: ShutdownCoordinator,
    api_task: tokio::task::JoinHandle<()>,
}

/// The global recorder can only be installed once per process, so a restart
/// within the same process reuses it.
fn prometheus_handle() -> Result<PrometheusHandle, Box<dyn std::error::Error>> {
    static PROM_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();
    if let Some(handle) = PROM_HANDLE.get() {
        return Ok(handle.clone());
    }
    let handle = PrometheusBuilder::new().install_recorder()?;
    info!("Prometheus metrics recorder installed");
    Ok(PROM_HANDLE.get_or_init(|| handle).clone())
}

impl ServerHandle {
    pub async fn start(opts: ServerOptions) -> Result<Self, Box<dyn std::error::Error>> {
        let app_cfg = opts.config;
        info!(
            name = %app_cfg.app.name,
            version = %app_cfg.app.version,
            "Starting admin service"
        );

        let metrics = prometheus_handle()?;

        // ── Database ───────────────────────────────────────────
        let db = init_database(&DatabaseConfig::from(&app_cfg.database)).await?;

        if opts.auto_migrate {
            info!("Running database migrations...");
            Migrator::up(&db, None).await?;
            info!("Migrations completed");
        }

        // ── Services ───────────────────────────────────────────
        let cache = create_cache(&app_cfg.cache).await?;
        let jwt_config = JwtConfig::from(&app_cfg.security);
        info!(
            access_minutes = jwt_config.access_token_expire_minutes,
            refresh_minutes = jwt_config.refresh_token_expire_minutes,
            "JWT configured"
        );

        let user_service = Arc::new(UserService::new(
            db.clone(),
            cache,
            jwt_config,
            app_cfg.security.bcrypt_cost,
        ));
        let role_service = Arc::new(RoleService::new(db.clone()));

        if opts.create_default_admin {
            let admin = &app_cfg.admin;
            if let Err(e) = user_service
                .create_default_admin(&admin.username, &admin.password, &admin.nickname)
                .await
            {
                error!("Failed to create default admin: {}", e);
            }
        }

        // ── REST API ───────────────────────────────────────────
        let shutdown = ShutdownCoordinator::new(app_cfg.server.shutdown_timeout);
        let router = create_api_router(
            AppState {
                user_service: user_service.clone(),
                role_service: role_service.clone(),
                metrics,
            },
            &app_cfg.server.cors_origin_list(),
        );

        let addr = app_cfg.server.address();
        let listener = tokio::net::TcpListener::bind(&addr).await?;
        let port = listener.local_addr()?.port();
        info!("REST API server listening on http://{}", addr);
        info!("Swagger UI available at http://{}/docs/", addr);

        let api_shutdown = shutdown.signal();
        let api_server = axum::serve(listener, router).with_graceful_shutdown(async move {
            api_shutdown.wait().await;
            info!("REST API server received shutdown signal");
        });
        let api_task = tokio::spawn(async move {
            if let Err(e) = api_server.await {
                error!("REST API server error: {}", e);
            }
        });

        Ok(Self {
            user_service,
            role_service,
            config: app_cfg,
            port,
            db,
            shutdown,
            api_task,
        })
    }

    pub fn shutdown_signal(&self) -> ShutdownSignal {
        self.shutdown.signal()
    }

    /// Install OS signal listeners (SIGTERM, SIGINT) that trigger shutdown.
    pub fn install_signal_handler(&self) {
        self.shutdown.start_signal_listener();
    }

    pub fn trigger_shutdown(&self) {
        self.shutdown.signal().trigger();
    }

    /// Wait until the server stops, either on its own or after shutdown was
    /// triggered. Draining after a trigger is bounded by the configured
    /// shutdown timeout.
    pub async fn wait(self) {
        let Self {
            db,
            shutdown,
            mut api_task,
            ..
        } = self;
        let signal = shutdown.signal();

        tokio::select! {
            result = &mut api_task => {
                if let Err(e) = result {
                    error!("REST API server task panicked: {}", e);
                }
                warn!("REST API server stopped without a shutdown signal");
                close_database(db).await;
                return;
            }
            _ = signal.wait() => {}
        }

        shutdown
            .shutdown_with_cleanup(|| async move {
                match api_task.await {
                    Ok(()) => info!("REST API server stopped"),
                    Err(e) => error!("REST API server task panicked: {}", e),
                }
                close_database(db).await;
            })
            .await;
        info!("Admin service shutdown complete");
    }

    /// Trigger shutdown and wait for completion.
    pub async fn shutdown(self) {
        info!("Shutting down admin service...");
        self.trigger_shutdown();
        self.wait().await;
    }

    pub fn is_running(&self) -> bool {
        !self.api_task.is_finished()
    }
}

async fn close_database(db: DatabaseConnection) {
    match db.close().await {
        Ok(()) => info!("Database connection closed"),
        Err(e) => warn!("Error closing database connection: {}", e),
    }
}

/// Initialize tracing from the logging section. `RUST_LOG` wins over the
/// configured level. Call once at process startup.
pub fn init_tracing(config: &AppConfig) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    let registry = tracing_subscriber::registry().with(env_filter);
    let result = match config.logging.format.to_lowercase().as_str() {
        "json" => registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init(),
        _ => registry.with(tracing_subscriber::fmt::layer()).try_init(),
    };
    if let Err(e) = result {
        eprintln!("tracing already initialized: {e}");
    }
}
