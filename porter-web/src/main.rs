//! Porter Web
//!
//! HTTP service running the import authorization step of a portability job.
//!
//! Architecture:
//! - Configuration: Load settings from environment or defaults
//! - Repository: Job store (PostgreSQL, or in-memory when no database is set)
//! - Capabilities: Authorization URL generators per (service, data type)
//! - Service: Import setup orchestration
//! - API: axum router exposing the service

use anyhow::{Context, Result};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub mod api;
pub mod capability;
pub mod config;
pub mod db;
pub mod repository;
pub mod service;

use crate::capability::CapabilityRegistry;
use crate::config::{Config, ServicesFile};
use crate::repository::{InMemoryJobStore, JobStore, PgJobStore};
use crate::service::ImportSetupService;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "porter_web=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Porter Web...");

    let config = Config::from_env();
    config.validate().context("Invalid configuration")?;

    let jobs = create_job_store(&config).await?;
    let registry = create_registry(&config)?;

    let state = api::AppState {
        capabilities: registry.len(),
        import_setup: Arc::new(ImportSetupService::new(jobs, Arc::new(registry))),
        id_cookie: Arc::from(config.id_cookie.as_str()),
    };

    // Build router with all API endpoints
    let app = api::create_router(state);

    tracing::info!("Listening on {}", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", config.bind_addr))?;

    axum::serve(listener, app)
        .await
        .context("Failed to start server")?;

    Ok(())
}

/// Connect to PostgreSQL when configured, otherwise keep jobs in memory
async fn create_job_store(config: &Config) -> Result<Arc<dyn JobStore>> {
    let Some(database_url) = &config.database_url else {
        tracing::warn!("DATABASE_URL not set, jobs are kept in memory");
        return Ok(Arc::new(InMemoryJobStore::new()));
    };

    tracing::info!("Connecting to database...");

    let pool = db::create_pool(database_url)
        .await
        .context("Failed to create database pool")?;

    tracing::info!("Database connection pool created");

    db::run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;

    Ok(Arc::new(PgJobStore::new(pool)))
}

/// Register a generator for every service declared in the services file
fn create_registry(config: &Config) -> Result<CapabilityRegistry> {
    let mut registry = CapabilityRegistry::new();

    match &config.services_file {
        Some(path) => {
            let services = ServicesFile::load(path)?;
            capability::register_services(&mut registry, &services.services)
                .context("Failed to register import services")?;
        }
        None => tracing::warn!("PORTER_SERVICES_FILE not set, no import services registered"),
    }

    if registry.is_empty() {
        tracing::warn!("Every import setup request will fail with unsupported_capability");
    } else {
        tracing::info!("Registered {} import capabilities", registry.len());
    }
    for (service, data_type) in registry.supported() {
        tracing::info!("  - {} / {}", service, data_type);
    }

    Ok(registry)
}
