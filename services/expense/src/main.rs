use anyhow::Result;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use common::database::{DatabaseConfig, health_check, init_pool};
use expense::{
    config::ServiceConfig, jwt::JwtService, repositories::run_migrations, routes,
    state::AppState,
};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            "expense=info,expense_service=info,common=info,tower_http=info".into()
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting expense service");

    let service_config = ServiceConfig::load()?;

    // Initialize database connection pool
    let db_config = DatabaseConfig::from_env()?;
    let pool = init_pool(&db_config).await?;

    if health_check(&pool).await? {
        info!("Database connection successful");
    } else {
        anyhow::bail!("Failed to connect to database");
    }

    if service_config.run_migrations {
        run_migrations(&pool).await?;
    }

    let jwt_service = JwtService::new(&service_config.jwt_secret);
    let app_state = AppState::postgres(pool.clone(), jwt_service);

    // Start the web server
    let app = routes::create_router(app_state);

    let address = service_config.bind_address();
    let listener = TcpListener::bind(&address).await?;
    info!("Expense service listening on {}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    info!("Expense service stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
