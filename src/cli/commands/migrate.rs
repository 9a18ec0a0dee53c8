//! Database migration command.

use anyhow::Context;

use crate::config::Config;
use crate::db;

/// Create the database if missing and apply pending migrations
pub async fn cmd_migrate(config: &Config) -> anyhow::Result<()> {
    let pool = db::init_db(&config.database.url, 1)
        .await
        .with_context(|| format!("migrate {}", config.database.url))?;
    pool.close().await;

    println!("Database is up to date: {}", config.database.url);
    Ok(())
}
