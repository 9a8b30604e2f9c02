use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use auth::JwtHandler;
use auth::TokenService;
use portal_service::access::service::AccessGate;
use portal_service::config::Config;
use portal_service::domain::page::service::PageService;
use portal_service::domain::user::models::AdminAccount;
use portal_service::domain::user::models::EmailAddress;
use portal_service::domain::user::service::UserService;
use portal_service::inbound::http::router::create_router;
use portal_service::inbound::http::router::AppState;
use portal_service::outbound::http::HttpPostSource;
use portal_service::outbound::repositories::PostgresPageRepository;
use portal_service::outbound::repositories::PostgresUserRepository;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "portal_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "portal-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        jwt_algorithm = %config.jwt.algorithm,
        jwt_expiration_minutes = config.jwt.expiration_minutes,
        posts_url = %config.posts.url,
        "Configuration loaded"
    );

    anyhow::ensure!(
        config.jwt.expiration_minutes > 0,
        "jwt.expiration_minutes must be positive, got {}",
        config.jwt.expiration_minutes
    );

    let jwt_handler = JwtHandler::with_algorithm(config.jwt.secret.as_bytes(), &config.jwt.algorithm)?;
    let token_service = TokenService::new(
        jwt_handler,
        chrono::Duration::minutes(config.jwt.expiration_minutes),
    );
    let authenticator = Arc::new(Authenticator::with_token_service(token_service));

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

    let user_repository = Arc::new(PostgresUserRepository::new(pg_pool.clone()));
    let page_repository = Arc::new(PostgresPageRepository::new(pg_pool));

    let user_service = Arc::new(UserService::new(
        Arc::clone(&user_repository),
        Arc::clone(&authenticator),
    ));

    let admin = AdminAccount {
        email: EmailAddress::new(config.bootstrap.admin_email.clone())?,
        password: config.bootstrap.admin_password.clone(),
    };
    user_service.ensure_defaults(&admin).await?;

    let post_source = HttpPostSource::new(
        config.posts.url.clone(),
        Duration::from_secs(config.posts.timeout_seconds),
    )?;

    let state = AppState {
        user_service,
        page_service: Arc::new(PageService::new(page_repository)),
        post_source: Arc::new(post_source),
        access_gate: Arc::new(AccessGate::new(user_repository, authenticator)),
    };

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    axum::serve(http_listener, create_router(state, &config.cors)).await?;

    tracing::info!("Server exited");

    Ok(())
}
