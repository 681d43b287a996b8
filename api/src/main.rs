use actix_web::{web, HttpServer};
use anyhow::Context;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ua_api::{create_app, AppState};
use ua_core::services::{
    AuthService, AuthorizationGate, BcryptPasswordHasher, RegistrationWorkflow,
    SessionRevocationStore, TokenManager, TokenManagerConfig, TransactionCoordinator,
};
use ua_infra::{
    DatabasePool, LogVerificationDispatcher, MySqlTransactionManager, MySqlUserRepository,
    RedisClient,
};
use ua_shared::config::{AppConfig, LoggingConfig};

fn init_tracing(logging: &LoggingConfig) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| logging.level.clone().into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_file(logging.source_location)
                .with_line_number(logging.source_location),
        )
        .init();
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env().context("failed to load configuration")?;
    init_tracing(&config.logging);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        environment = %config.environment,
        "Starting UserAuth API server"
    );

    // Storage
    let database = DatabasePool::new(config.database.clone())
        .await
        .context("failed to connect to MySQL")?;
    database
        .run_migrations()
        .await
        .context("failed to apply migrations")?;
    let pool = database.get_pool().clone();

    let cache = Arc::new(
        RedisClient::new(config.cache.clone())
            .await
            .context("failed to connect to Redis")?,
    );

    // Core services
    let tokens = Arc::new(TokenManager::new(TokenManagerConfig::from(&config.auth.jwt)));
    let users = Arc::new(MySqlUserRepository::new(pool.clone()));
    let transactions = Arc::new(MySqlTransactionManager::new(pool));
    let coordinator = TransactionCoordinator::new(transactions.clone());
    let hasher = Arc::new(BcryptPasswordHasher::new(config.auth.registration.bcrypt_cost)?);
    let dispatcher = Arc::new(LogVerificationDispatcher::new(
        config.auth.registration.verify_base_url.clone(),
    ));
    let revocations = Arc::new(SessionRevocationStore::new(cache));

    let registration = Arc::new(RegistrationWorkflow::new(
        coordinator,
        users.clone(),
        tokens.clone(),
        hasher.clone(),
        dispatcher,
        Duration::from_secs(config.auth.registration.operation_timeout),
    ));
    let auth_service = Arc::new(AuthService::new(users, tokens.clone(), hasher));
    let gate = Arc::new(AuthorizationGate::new(tokens, revocations.clone()));

    let app_state = web::Data::new(AppState {
        registration,
        auth_service,
        gate,
        revocations,
        database: transactions,
    });

    let bind_address = config.server.bind_address();
    info!("Server will bind to: {}", bind_address);

    let cors = config.cors.clone();
    let mut server = HttpServer::new(move || create_app(app_state.clone(), &cors))
        .client_request_timeout(Duration::from_secs(config.server.request_timeout));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("failed to bind {}", bind_address))?
        .run()
        .await?;

    database.close().await;
    info!("Server stopped");
    Ok(())
}
