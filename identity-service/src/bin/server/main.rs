use std::sync::Arc;

use auth::Authenticator;
use auth::TokenCodec;
use identity_service::config::Config;
use identity_service::domain::session::service::SessionService;
use identity_service::inbound::http::router::create_router;
use identity_service::outbound::identity::GoogleIdentityProvider;
use identity_service::outbound::repositories::PostgresRefreshTokenRepository;
use identity_service::outbound::repositories::PostgresUserRepository;
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
        access_token_ttl_minutes = config.jwt.access_token_ttl_minutes,
        refresh_token_ttl_days = config.jwt.refresh_token_ttl_days,
        google_client_id_check = config.google.client_id.is_some(),
        "Configuration loaded"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = config.database.max_connections,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let codec = Arc::new(TokenCodec::new(&config.jwt.token_settings()?)?);
    let authenticator = Arc::new(Authenticator::new(Arc::clone(&codec)));
    let refresh_token_repository = Arc::new(PostgresRefreshTokenRepository::new(pg_pool.clone()));
    let user_repository = Arc::new(PostgresUserRepository::new(pg_pool));
    let identity_provider = Arc::new(GoogleIdentityProvider::new(&config.google)?);

    let session_service = Arc::new(SessionService::new(
        refresh_token_repository,
        user_repository,
        identity_provider,
        codec,
    ));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(session_service, authenticator);

    if let Err(e) = axum::serve(http_listener, http_application).await {
        tracing::error!(error = %e, "Server error");
        return Err(e.into());
    }

    tracing::info!("Server exited successfully");

    Ok(())
}
