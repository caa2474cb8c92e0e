use anyhow::Context;
use sea_orm::DatabaseConnection;
use tracing::info;

use super::providers::{DbProviders, default_registry};
use crate::config::DatabaseConfig;

/// Connects through the provider registered for the URL scheme and, when
/// enabled, syncs the schema from the entity definitions.
pub async fn connect(cfg: &DatabaseConfig) -> anyhow::Result<DatabaseConnection> {
    connect_with(&default_registry()?, cfg).await
}

pub async fn connect_with(
    providers: &DbProviders,
    cfg: &DatabaseConfig,
) -> anyhow::Result<DatabaseConnection> {
    let provider = providers.provider_for_url(&cfg.url)?;
    info!(provider = provider.id().as_str(), "connecting to database");

    let db = provider
        .connect(cfg)
        .await
        .with_context(|| format!("failed to connect to {} database", provider.id().as_str()))?;
    provider.post_connect(&db, cfg).await?;

    if cfg.sync_schema {
        info!("syncing database schema from entities");
        db.get_schema_registry("school_meal::db::entities::*")
            .sync(&db)
            .await
            .context("failed to sync database schema")?;
    }
    Ok(db)
}
