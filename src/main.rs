//!
//! FieldServe REST API server.
//! Reads configuration from TOML file (~/.config/fieldserve/config.toml).

use std::sync::Arc;

use sea_orm_migration::MigratorTrait;
use tracing::{error, info};

use fieldserve::application::{ReportService, SessionService, WorkTimerService};
use fieldserve::infrastructure::advisory::{AdvisoryConfig, HttpAdvisoryProvider};
use fieldserve::infrastructure::database::migrator::Migrator;
use fieldserve::infrastructure::database::repositories::SeaOrmReportRepository;
use fieldserve::infrastructure::storage::FileKvStore;
use fieldserve::{create_api_router, default_config_path, init_database, AppConfig, AppState, DatabaseConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // ── Load configuration ─────────────────────────────────────
    let config_path = std::env::var("FIELDSERVE_CONFIG")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|_| default_config_path());
    let app_cfg = match AppConfig::load(&config_path) {
        Ok(cfg) => {
            tracing_subscriber::fmt()
                .with_env_filter(
                    tracing_subscriber::EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cfg.logging.level)),
                )
                .init();
            info!("Configuration loaded from {}", config_path.display());
            cfg
        }
        Err(e) => {
            tracing_subscriber::fmt()
                .with_env_filter(tracing_subscriber::EnvFilter::new("info"))
                .init();
            error!("Failed to load config: {}. Using defaults.", e);
            AppConfig::default()
        }
    };

    info!("Starting FieldServe...");

    // ── Database ───────────────────────────────────────────────
    let db_config = DatabaseConfig {
        url: app_cfg.database.connection_url(),
    };
    let db = match init_database(&db_config).await {
        Ok(db) => db,
        Err(e) => {
            error!("Failed to connect to database: {}", e);
            return Err(e.into());
        }
    };

    info!("Running database migrations...");
    if let Err(e) = Migrator::up(&db, None).await {
        error!("Failed to run migrations: {}", e);
        return Err(e.into());
    }
    info!("Migrations completed");

    // ── Stores & services ──────────────────────────────────────
    let kv = Arc::new(FileKvStore::new(&app_cfg.storage.data_dir));
    let session = Arc::new(SessionService::initialize(kv.clone()).await);
    let reports = Arc::new(ReportService::new(Arc::new(SeaOrmReportRepository::new(
        db.clone(),
    ))));
    let timer = Arc::new(WorkTimerService::new(kv));

    let advisory = HttpAdvisoryProvider::new(AdvisoryConfig {
        base_url: app_cfg.advisory.base_url.clone(),
        api_key: app_cfg.advisory.resolved_api_key(),
        model: app_cfg.advisory.model.clone(),
        timeout_secs: app_cfg.advisory.timeout_secs,
    })?;

    // ── REST API server ────────────────────────────────────────
    let router = create_api_router(AppState {
        session,
        reports,
        advisory: Arc::new(advisory),
        timer,
    });

    let addr = app_cfg.server.address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("REST API server listening on http://{}", addr);
    info!("Swagger UI available at http://{}/docs/", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!("Failed to listen for shutdown signal: {}", e);
            }
            info!("Shutdown signal received");
        })
        .await?;

    if let Err(e) = db.close().await {
        error!("Error closing database connection: {}", e);
    }
    info!("FieldServe shutdown complete");
    Ok(())
}
