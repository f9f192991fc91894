use sqlx::{PgPool, postgres::PgPoolOptions};
use std::time::Duration;

pub async fn create_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .acquire_timeout(Duration::from_secs(5))
        .connect(database_url)
        .await
}

pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::Error> {
    // Jobs are created by the export authorization step; this service only
    // reads them and attaches import handshake state.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS portability_jobs (
            id UUID PRIMARY KEY,
            data_type VARCHAR(64) NOT NULL,
            export_service VARCHAR(255) NOT NULL,
            import_service VARCHAR(255) NOT NULL,
            export_auth_data JSONB,
            import_auth_data JSONB,
            created_at TIMESTAMPTZ NOT NULL,
            updated_at TIMESTAMPTZ NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_portability_jobs_updated_at ON portability_jobs(updated_at DESC)",
    )
    .execute(pool)
    .await?;

    tracing::info!("Database migrations completed successfully");
    Ok(())
}
