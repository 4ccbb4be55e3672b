//! Versioned schema migrations embedded with refinery.
//!
//! Applied migrations are tracked in `refinery_schema_history`.

use refinery::embed_migrations;
use tokio_postgres::NoTls;

use crate::error::Error;

embed_migrations!("migrations");

/// Run all pending migrations in version order.
///
/// Called once at startup, before the connection pool is created.
pub async fn run_migrations(database_url: &str) -> Result<(), Error> {
    tracing::info!("Running database migrations...");

    let config: tokio_postgres::Config = database_url.parse().map_err(|e| {
        Error::ConfigurationError(format!("Invalid database URL: {}", e))
    })?;

    let (mut client, connection) =
        config.connect(NoTls).await.map_err(|e| {
            Error::ConfigurationError(format!(
                "Failed to connect for migrations: {}",
                e
            ))
        })?;

    tokio::spawn(async move {
        if let Err(e) = connection.await {
            tracing::error!("Migration connection error: {}", e);
        }
    });

    let report =
        migrations::runner().run_async(&mut client).await.map_err(|e| {
            Error::ConfigurationError(format!("Migration failed: {}", e))
        })?;

    let applied = report.applied_migrations();
    if applied.is_empty() {
        tracing::info!("No new migrations to apply");
    } else {
        for migration in applied {
            tracing::info!(
                "Applied migration: V{:03}__{}",
                migration.version(),
                migration.name(),
            );
        }
        tracing::info!("Successfully applied {} migration(s)", applied.len());
    }

    Ok(())
}
