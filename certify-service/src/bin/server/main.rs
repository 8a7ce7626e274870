use std::sync::Arc;

use auth::TokenIssuer;
use auth::TokenTtls;
use certify_service::config::Config;
use certify_service::domain::auth::service::AuthService;
use certify_service::domain::certificate::service::CertificateService;
use certify_service::domain::institution::service::InstitutionService;
use certify_service::inbound::http::router::create_router;
use certify_service::inbound::http::router::AppState;
use certify_service::outbound::ledger::NoopLedgerClient;
use certify_service::outbound::repositories::PostgresAuditLog;
use certify_service::outbound::repositories::PostgresCertificateStore;
use certify_service::outbound::repositories::PostgresInstitutionRepository;
use certify_service::outbound::repositories::PostgresUserRepository;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "certify_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "certify-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        issuer = %config.issuer.name,
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

    let token_issuer = Arc::new(TokenIssuer::new(
        config.jwt.secret.as_bytes(),
        TokenTtls {
            access_days: config.jwt.access_ttl_days,
            refresh_days: config.jwt.refresh_ttl_days,
            email_verify_hours: config.jwt.email_verify_ttl_hours,
        },
    ));

    let user_repository = Arc::new(PostgresUserRepository::new(pg_pool.clone()));
    let audit_log = Arc::new(PostgresAuditLog::new(pg_pool.clone()));
    let institution_repository = Arc::new(PostgresInstitutionRepository::new(pg_pool.clone()));
    let certificate_store = Arc::new(PostgresCertificateStore::new(pg_pool));
    let ledger_client = Arc::new(NoopLedgerClient::new());

    let auth_service = Arc::new(AuthService::new(
        user_repository,
        Arc::clone(&audit_log),
        Arc::clone(&token_issuer),
    ));
    let institution_service = Arc::new(InstitutionService::new(institution_repository));
    let certificate_service = Arc::new(CertificateService::new(
        certificate_store,
        ledger_client,
        config.issuer.name.clone(),
    ));

    let state = AppState {
        auth_service,
        institution_service,
        certificate_service,
        audit_log,
        token_issuer,
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
