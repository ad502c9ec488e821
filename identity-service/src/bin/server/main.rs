use std::sync::Arc;
use std::time::Duration;

use credentials::PasswordHasher;
use credentials::TokenCodec;
use identity_service::config::Config;
use identity_service::domain::user::service::CredentialService;
use identity_service::inbound::http::router::create_router;
use identity_service::outbound::directory::PostgresUserDirectory;
use identity_service::user::ports::CredentialServicePort;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "identity_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "identity-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        directory_timeout_secs = config.auth.directory_timeout_secs,
        "Configuration loaded"
    );

    // Unreachable directory at boot is fatal
    let pg_pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = 5,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    // An unusable secret is fatal too
    let token_codec = Arc::new(TokenCodec::new(config.auth.jwt_secret.as_bytes())?);

    let hasher = match &config.auth.hashing {
        Some(h) => PasswordHasher::with_work_factor(h.memory_kib, h.iterations, h.parallelism)?,
        None => PasswordHasher::new(),
    };

    let directory = Arc::new(PostgresUserDirectory::new(pg_pool));
    let credential_service: Arc<dyn CredentialServicePort> = Arc::new(CredentialService::new(
        directory,
        hasher,
        Arc::clone(&token_codec),
        Duration::from_secs(config.auth.directory_timeout_secs),
    ));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(credential_service, token_codec);
    axum::serve(http_listener, http_application).await?;

    Ok(())
}
