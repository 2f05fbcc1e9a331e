use std::{env, time::Duration};

use once_cell::sync::Lazy;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

pub static DATABASE_URL: Lazy<String> = Lazy::new(|| {
    // Load .env if present
    let _ = dotenvy::dotenv();
    env::var("DATABASE_URL").unwrap_or_else(|_| default_sqlite_url())
});

/// Pick the SQLite file location from the deployment environment.
///
/// Serverless platforms only expose an ephemeral writable filesystem, so
/// when `SERVERLESS_TMP` is set the database file lives under `/tmp`;
/// otherwise it sits in the local `data/` directory. `mode=rwc` creates
/// the file on first connect.
pub fn default_sqlite_url() -> String {
    if env::var("SERVERLESS_TMP").is_ok() {
        "sqlite:///tmp/khadamat.db?mode=rwc".to_string()
    } else {
        "sqlite://data/khadamat.db?mode=rwc".to_string()
    }
}

pub async fn connect() -> anyhow::Result<DatabaseConnection> {
    let db = Database::connect(DATABASE_URL.as_str()).await?;
    Ok(db)
}

/// Connect with pool settings from the configs crate; an empty URL falls
/// back to the environment-derived one.
pub async fn connect_with_config(
    cfg: &configs::DatabaseConfig,
) -> anyhow::Result<DatabaseConnection> {
    let url = if cfg.url.trim().is_empty() {
        DATABASE_URL.clone()
    } else {
        cfg.url.clone()
    };
    let mut opts = ConnectOptions::new(url);
    opts.max_connections(cfg.max_connections)
        .min_connections(cfg.min_connections)
        .connect_timeout(Duration::from_secs(cfg.connect_timeout_secs))
        .acquire_timeout(Duration::from_secs(cfg.acquire_timeout_secs))
        .sqlx_logging(cfg.sqlx_logging);
    let db = Database::connect(opts).await?;
    Ok(db)
}
