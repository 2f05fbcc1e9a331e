use std::{env, net::SocketAddr};

use axum::Router;
use common::utils::logging::init_logging_default;
use dotenvy::dotenv;
use migration::MigratorTrait;
use sea_orm::DatabaseConnection;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::routes::{self, auth};
use service::notify::EventHub;

/// Initialize logging via shared common utils
fn init_logging() {
    init_logging_default();
}

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Load host/port from configs or env vars, with sensible fallbacks
fn load_bind_addr() -> anyhow::Result<SocketAddr> {
    let (host, port) = match configs::load_default() {
        Ok(cfg) => {
            let s = cfg.server;
            (s.host, s.port)
        }
        Err(_) => {
            let host = env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
            let port = env::var("SERVER_PORT")
                .ok()
                .and_then(|p| p.parse::<u16>().ok())
                .unwrap_or(8080);
            (host, port)
        }
    };
    Ok(format!("{}:{}", host, port).parse()?)
}

/// Connect to the database and ensure the schema exists.
///
/// On a fresh SQLite file the migrator creates every table; on an
/// existing one only pending migrations run, so startup is idempotent.
async fn prepare_database() -> anyhow::Result<DatabaseConnection> {
    // The on-disk database lives under data/ unless a serverless
    // deployment forces it into /tmp or DATABASE_URL points elsewhere.
    if env::var("DATABASE_URL").is_err() && env::var("SERVERLESS_TMP").is_err() {
        common::env::ensure_data_dir("data").await?;
    }

    let db = match configs::load_default() {
        Ok(cfg) => models::db::connect_with_config(&cfg.database).await?,
        Err(_) => models::db::connect().await?,
    };
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

/// Public entry: build the app and run the HTTP server
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging();

    let db = prepare_database().await?;

    // JWT secret
    let jwt_secret =
        std::env::var("JWT_SECRET").unwrap_or_else(|_| "dev-secret-change-me".to_string());
    let state = auth::ServerState {
        db,
        auth: auth::ServerAuthConfig { jwt_secret },
        hub: EventHub::default(),
    };

    // Build router
    let cors = build_cors();
    let app: Router = routes::build_router(cors, state);

    // Bind and serve
    let addr = load_bind_addr()?;
    info!(%addr, "starting marketplace server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
