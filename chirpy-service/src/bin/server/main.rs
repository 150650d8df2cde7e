use std::sync::Arc;

use auth::AuthGateway;
use chirpy_service::chirp::ports::ChirpServicePort;
use chirpy_service::chirp::service::ChirpService;
use chirpy_service::config::Config;
use chirpy_service::inbound::http::router::create_router;
use chirpy_service::inbound::http::router::AppState;
use chirpy_service::repositories::InMemoryStore;
use chirpy_service::repositories::PostgresChirpRepository;
use chirpy_service::repositories::PostgresUserRepository;
use chirpy_service::user::ports::UserServicePort;
use chirpy_service::user::service::UserService;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chirpy_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "chirpy-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        platform = %config.platform,
        persistent = config.database.url.is_some(),
        default_expiration_seconds = config.jwt.default_expiration_seconds,
        max_expiration_seconds = config.jwt.max_expiration_seconds,
        "Configuration loaded"
    );

    let gateway = Arc::new(AuthGateway::new(config.jwt.secret.as_bytes()));

    let user_service: Arc<dyn UserServicePort>;
    let chirp_service: Arc<dyn ChirpServicePort>;

    match config.database.url.as_deref() {
        Some(url) => {
            let pg_pool = PgPoolOptions::new()
                .max_connections(config.database.max_connections)
                .connect(url)
                .await?;
            tracing::info!(
                max_connections = config.database.max_connections,
                database = "postgresql",
                "Database connection pool created"
            );

            sqlx::migrate!("./migrations").run(&pg_pool).await?;
            tracing::info!(database = "postgresql", "Database migrations completed");

            let user_repository = Arc::new(PostgresUserRepository::new(pg_pool.clone()));
            let chirp_repository = Arc::new(PostgresChirpRepository::new(pg_pool));

            user_service = Arc::new(UserService::new(user_repository, Arc::clone(&gateway)));
            chirp_service = Arc::new(ChirpService::new(chirp_repository));
        }
        None => {
            tracing::warn!("No database url configured, data will not survive a restart");

            let store = InMemoryStore::new();

            user_service = Arc::new(UserService::new(
                Arc::new(store.user_repository()),
                Arc::clone(&gateway),
            ));
            chirp_service = Arc::new(ChirpService::new(Arc::new(store.chirp_repository())));
        }
    }

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(AppState {
        user_service,
        chirp_service,
        gateway,
        lifetime_policy: config.jwt.lifetime_policy(),
        allow_reset: config.is_dev(),
    });

    axum::serve(http_listener, http_application).await?;
    tracing::info!("Server exited");

    Ok(())
}
