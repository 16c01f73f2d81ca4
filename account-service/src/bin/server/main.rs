use std::sync::Arc;

use account_service::config::Config;
use account_service::domain::account::service::AccountService;
use account_service::domain::clock::SystemClock;
use account_service::domain::motor::service::MotorService;
use account_service::domain::reset::service::ResetService;
use account_service::inbound::http::router::create_router;
use account_service::inbound::http::router::AppState;
use account_service::outbound::email::SmtpResetMailer;
use account_service::outbound::predict::HttpModelGateway;
use account_service::outbound::repositories::PostgresAccountRepository;
use account_service::outbound::repositories::PostgresMotorRepository;
use account_service::outbound::repositories::PostgresResetTokenRepository;
use account_service::outbound::storage::HttpObjectStore;
use auth::Authenticator;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "account_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "account-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        token_algorithm = %config.auth.algorithm,
        access_ttl_minutes = config.auth.access_ttl_minutes,
        reset_ttl_minutes = config.auth.reset_ttl_minutes,
        reset_cooldown_minutes = config.auth.reset_cooldown_minutes,
        "Configuration loaded"
    );

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

    let authenticator = Arc::new(Authenticator::new(
        config.auth.secret.as_bytes(),
        &config.auth.algorithm,
        config.auth.access_ttl_minutes,
    )?);

    let account_repository = Arc::new(PostgresAccountRepository::new(pg_pool.clone()));
    let reset_repository = Arc::new(PostgresResetTokenRepository::new(pg_pool.clone()));
    let motor_repository = Arc::new(PostgresMotorRepository::new(pg_pool));

    let object_store = Arc::new(HttpObjectStore::new(&config.storage));
    let model_gateway = Arc::new(HttpModelGateway::new(&config.models));
    let mailer = Arc::new(SmtpResetMailer::new(&config.email)?);

    let account_service = Arc::new(AccountService::new(
        Arc::clone(&account_repository),
        Arc::clone(&object_store),
    ));
    let reset_service = Arc::new(ResetService::new(
        reset_repository,
        Arc::clone(&account_repository),
        mailer,
        Arc::new(SystemClock),
        config.auth.reset_ttl_minutes,
        config.auth.reset_cooldown_minutes,
    ));
    let motor_service = Arc::new(MotorService::new(motor_repository));

    let state = AppState {
        account_service,
        reset_service,
        motor_service,
        authenticator,
        model_gateway,
        object_store,
    };

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    axum::serve(http_listener, create_router(state)).await?;

    Ok(())
}
