use std::sync::Arc;

use auth::Authenticator;
use catalog_service::config::Config;
use catalog_service::config::StorageBackend;
use catalog_service::domain::book::ports::BookRepository;
use catalog_service::domain::book::ports::BookServicePort;
use catalog_service::domain::book::service::BookService;
use catalog_service::domain::user::ports::AccountServicePort;
use catalog_service::domain::user::ports::UserRepository;
use catalog_service::domain::user::service::AccountService;
use catalog_service::inbound::http::router::create_router;
use catalog_service::outbound::repositories::InMemoryBookRepository;
use catalog_service::outbound::repositories::InMemoryUserRepository;
use catalog_service::outbound::repositories::PostgresBookRepository;
use catalog_service::outbound::repositories::PostgresUserRepository;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "catalog_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "catalog-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        backend = ?config.database.backend,
        http_port = config.server.http_port,
        token_ttl_hours = config.jwt.expiration_hours,
        "Configuration loaded"
    );

    let authenticator = Arc::new(Authenticator::new(
        config.jwt.secret.as_bytes(),
        config.jwt.token_ttl(),
    ));

    let (account_service, book_service) = match config.database.backend {
        StorageBackend::Postgres => {
            let url = config
                .database
                .url
                .as_deref()
                .ok_or_else(|| anyhow::anyhow!("database.url is not set"))?;

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
            let book_repository = Arc::new(PostgresBookRepository::new(pg_pool));

            services(user_repository, book_repository, &authenticator)
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage; data is lost on shutdown");

            services(
                Arc::new(InMemoryUserRepository::new()),
                Arc::new(InMemoryBookRepository::new()),
                &authenticator,
            )
        }
    };

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(account_service, book_service, authenticator);

    axum::serve(http_listener, http_application)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server exited successfully");

    Ok(())
}

fn services<UR, BR>(
    user_repository: Arc<UR>,
    book_repository: Arc<BR>,
    authenticator: &Arc<Authenticator>,
) -> (Arc<dyn AccountServicePort>, Arc<dyn BookServicePort>)
where
    UR: UserRepository,
    BR: BookRepository,
{
    let account_service: Arc<dyn AccountServicePort> = Arc::new(AccountService::new(
        user_repository,
        Arc::clone(authenticator),
    ));
    let book_service: Arc<dyn BookServicePort> = Arc::new(BookService::new(book_repository));

    (account_service, book_service)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        // Without a signal handler the server runs until killed
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
