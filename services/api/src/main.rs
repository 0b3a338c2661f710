use anyhow::{Context, Result};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use common::database::{DatabaseConfig, init_pool};
use recipe_api::{
    AppState,
    auth::{JwtConfig, JwtVerifier},
    config::AppConfig,
    create_router, llm,
    repositories::{InMemoryStore, RecipeRepository, RecipeStore, UserRepository, UserStore},
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Starting recipe API service");

    let config = AppConfig::load().context("Failed to load configuration")?;

    let jwt_config = JwtConfig::from_env().map_err(anyhow::Error::msg)?;
    let jwt = JwtVerifier::new(&jwt_config).context("Invalid JWT public key")?;

    let llm = llm::create_provider(&config.llm)?;

    // Initialize storage
    let (recipes, users, pool) = if config.storage.is_memory() {
        info!("Using in-memory storage; data is lost on shutdown");
        let store = Arc::new(InMemoryStore::new());
        let recipes: Arc<dyn RecipeStore> = store.clone();
        let users: Arc<dyn UserStore> = store;
        (recipes, users, None)
    } else {
        let db_config = DatabaseConfig::from_env()?;
        let pool = init_pool(&db_config).await?;

        // Check database connectivity
        if common::database::health_check(&pool).await? {
            info!("Database connection successful");
        } else {
            anyhow::bail!("Failed to connect to database");
        }

        let recipes: Arc<dyn RecipeStore> = Arc::new(RecipeRepository::new(pool.clone()));
        let users: Arc<dyn UserStore> = Arc::new(UserRepository::new(pool.clone()));
        (recipes, users, Some(pool))
    };

    let app_state = AppState::new(recipes, users, llm, jwt);

    // Start the web server
    let app = create_router(app_state);

    let listener = TcpListener::bind(&config.server.bind_addr).await?;
    info!("Recipe API listening on {}", config.server.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(pool) = pool {
        pool.close().await;
        info!("Database pool closed");
    }

    info!("Recipe API service stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
