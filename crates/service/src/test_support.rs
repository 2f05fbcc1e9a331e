#![cfg(test)]
use migration::MigratorTrait;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

/// Fresh migrated in-memory database per test. Each `sqlite::memory:`
/// connection is its own database, so the pool stays at one connection.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    let mut opts = ConnectOptions::new("sqlite::memory:");
    opts.max_connections(1).min_connections(1).sqlx_logging(false);
    let db = Database::connect(opts).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

/// Common fixture: a customer, a provider user with profile, a category
/// and a listed service.
pub async fn seed(
    db: &DatabaseConnection,
) -> Result<
    (
        models::user::Model,
        models::service_provider::Model,
        models::category::Model,
        models::service::Model,
    ),
    anyhow::Error,
> {
    let customer = models::user::create(db, "amina", "amina@example.com", "hash").await?;
    let provider_user = models::user::create(db, "omar", "omar@example.com", "hash").await?;
    let provider =
        models::service_provider::create(db, provider_user.id, "29901011234567", None, None, None)
            .await?;
    let cat = models::category::create(db, "cleaning").await?;
    let svc = models::service::create(
        db,
        "Deep clean",
        "Full apartment deep clean",
        120,
        40.0,
        provider_user.id,
        provider.id,
        cat.id,
    )
    .await?;
    Ok((customer, provider, cat, svc))
}
