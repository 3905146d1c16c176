use evidence_session::{
    audit::{AuditRepository, InMemoryAuditRepository, PostgresAuditRepository},
    build_router,
    official::{InMemoryOfficialRepository, OfficialRepository, PostgresOfficialRepository},
    AppConfig, AppState,
};
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

type Stores = (
    Arc<dyn OfficialRepository + Send + Sync>,
    Arc<dyn AuditRepository + Send + Sync>,
);

async fn connect_stores(config: &AppConfig) -> anyhow::Result<Stores> {
    let stores: Stores = match &config.database_url {
        Some(database_url) => {
            let pool = PgPoolOptions::new()
                .max_connections(10)
                .connect(database_url)
                .await?;
            info!("Connected to PostgreSQL");

            (
                Arc::new(PostgresOfficialRepository::new(pool.clone())),
                Arc::new(PostgresAuditRepository::new(pool)),
            )
        }
        None => {
            warn!("DATABASE_URL not set, using in-memory official directory and audit log");
            (
                Arc::new(InMemoryOfficialRepository::new()),
                Arc::new(InMemoryAuditRepository::new()),
            )
        }
    };

    Ok(stores)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "evidence_session=debug,audit=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting evidence session service");

    let config = AppConfig::from_env()?;
    info!(
        production = config.is_production,
        session_ttl_hours = config.session_ttl_hours,
        "Configuration loaded"
    );

    let (official_repository, audit_repository) = connect_stores(&config).await?;
    let app_state = AppState::from_config(&config, official_repository, audit_repository);

    let app = build_router(app_state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!("Server running on http://{}", config.bind_addr);
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
