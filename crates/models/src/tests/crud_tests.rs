use anyhow::Result;
use migration::MigratorTrait;
use sea_orm::{ConnectOptions, Database, DatabaseConnection, EntityTrait};

use crate::{category, complaint, order, provider_service, service, service_provider, user};

/// Fresh in-memory database with the full schema applied. Each
/// `sqlite::memory:` connection is a distinct database, so the pool is
/// pinned to a single connection.
async fn setup_test_db() -> Result<DatabaseConnection> {
    let mut opts = ConnectOptions::new("sqlite::memory:");
    opts.max_connections(1).min_connections(1).sqlx_logging(false);
    let db = Database::connect(opts).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

/// Seed a customer, a provider (with profile), a category and one
/// service, returning (customer, provider profile, service).
async fn seed_marketplace(
    db: &DatabaseConnection,
) -> Result<(user::Model, service_provider::Model, service::Model)> {
    let customer = user::create(db, "amina", "amina@example.com", "argon2-hash").await?;
    let provider_user = user::create(db, "omar", "omar@example.com", "argon2-hash").await?;
    let provider =
        service_provider::create(db, provider_user.id, "29901011234567", None, None, None).await?;
    let cat = category::create(db, "plumbing").await?;
    let svc = service::create(
        db,
        "Leak repair",
        "Fix leaking pipes and taps",
        60,
        25.0,
        provider_user.id,
        provider.id,
        cat.id,
    )
    .await?;
    Ok((customer, provider, svc))
}

#[tokio::test]
async fn duplicate_email_is_rejected() -> Result<()> {
    let db = setup_test_db().await?;

    let first = user::create(&db, "amina", "amina@example.com", "h1").await?;
    assert_eq!(first.email, "amina@example.com");
    assert_eq!(first.image_file, "default.jpg");
    assert!(!first.is_admin);

    let second = user::create(&db, "other", "amina@example.com", "h2").await;
    assert!(matches!(second, Err(crate::errors::ModelError::Db(_))));
    Ok(())
}

#[tokio::test]
async fn provider_id_must_reference_a_user() -> Result<()> {
    let db = setup_test_db().await?;

    let orphan = service_provider::create(&db, 4242, "123456789", None, None, None).await;
    assert!(matches!(orphan, Err(crate::errors::ModelError::Db(_))));

    let u = user::create(&db, "omar", "omar@example.com", "h").await?;
    let p = service_provider::create(&db, u.id, "123456789", Some("bio".into()), None, None).await?;
    assert_eq!(p.id, u.id);
    assert!(!p.verified);
    Ok(())
}

#[tokio::test]
async fn duplicate_nid_is_rejected() -> Result<()> {
    let db = setup_test_db().await?;

    let u1 = user::create(&db, "omar", "omar@example.com", "h").await?;
    let u2 = user::create(&db, "sara", "sara@example.com", "h").await?;
    service_provider::create(&db, u1.id, "same-nid", None, None, None).await?;
    let dup = service_provider::create(&db, u2.id, "same-nid", None, None, None).await;
    assert!(dup.is_err());
    Ok(())
}

#[tokio::test]
async fn is_service_provider_is_derived_from_profile_row() -> Result<()> {
    let db = setup_test_db().await?;

    let u = user::create(&db, "omar", "omar@example.com", "h").await?;
    assert!(!user::is_service_provider(&db, u.id).await?);

    service_provider::create(&db, u.id, "123456789", None, None, None).await?;
    assert!(user::is_service_provider(&db, u.id).await?);
    Ok(())
}

#[tokio::test]
async fn new_order_defaults_to_pending_and_not_viewed() -> Result<()> {
    let db = setup_test_db().await?;
    let (customer, provider, svc) = seed_marketplace(&db).await?;

    let o = order::create(
        &db,
        "12 Harbor St",
        svc.price,
        svc.id,
        customer.id,
        provider.id,
        Some(30.06),
        Some(31.25),
    )
    .await?;

    assert_eq!(o.status, order::OrderStatus::Pending);
    assert_eq!(o.notification, order::NotificationStatus::NotViewed);
    assert!(o.review.is_none());
    assert!(o.rate.is_none());
    Ok(())
}

#[tokio::test]
async fn order_status_and_notification_mutations_persist() -> Result<()> {
    let db = setup_test_db().await?;
    let (customer, provider, svc) = seed_marketplace(&db).await?;

    let o = order::create(&db, "12 Harbor St", svc.price, svc.id, customer.id, provider.id, None, None).await?;

    let o = order::set_status(&db, o.id, order::OrderStatus::Accepted).await?;
    assert_eq!(o.status, order::OrderStatus::Accepted);

    let o = order::mark_viewed(&db, o.id).await?;
    assert_eq!(o.notification, order::NotificationStatus::Viewed);

    let o = order::set_review(&db, o.id, Some(4), Some("on time".into())).await?;
    assert_eq!(o.rate, Some(4));
    assert_eq!(o.review.as_deref(), Some("on time"));
    Ok(())
}

#[tokio::test]
async fn ratings_out_of_range_leaves_stored_value_unchanged() -> Result<()> {
    let db = setup_test_db().await?;
    let (_, _, svc) = seed_marketplace(&db).await?;

    let updated = service::set_ratings(&db, svc.id, 5).await?;
    assert_eq!(updated.ratings, 5);

    let rejected = service::set_ratings(&db, svc.id, 6).await;
    assert!(matches!(rejected, Err(crate::errors::ModelError::Validation(_))));

    let stored = service::Entity::find_by_id(svc.id).one(&db).await?.unwrap();
    assert_eq!(stored.ratings, 5);
    Ok(())
}

#[tokio::test]
async fn association_pair_is_unique() -> Result<()> {
    let db = setup_test_db().await?;
    let (_, provider, svc) = seed_marketplace(&db).await?;

    provider_service::link(&db, svc.id, provider.id).await?;
    let dup = provider_service::link(&db, svc.id, provider.id).await;
    assert!(matches!(dup, Err(crate::errors::ModelError::Db(_))));

    provider_service::unlink(&db, svc.id, provider.id).await?;
    let relinked = provider_service::link(&db, svc.id, provider.id).await;
    assert!(relinked.is_ok());
    Ok(())
}

#[tokio::test]
async fn complaint_lifecycle() -> Result<()> {
    let db = setup_test_db().await?;
    let (customer, provider, svc) = seed_marketplace(&db).await?;
    let o = order::create(&db, "12 Harbor St", svc.price, svc.id, customer.id, provider.id, None, None).await?;

    let empty = complaint::create(&db, o.id, customer.id, "   ").await;
    assert!(matches!(empty, Err(crate::errors::ModelError::Validation(_))));

    let c = complaint::create(&db, o.id, customer.id, "provider never showed up").await?;
    assert!(!c.resolved);
    assert!(c.action_taken.is_none());

    let c = complaint::resolve(&db, c.id, Some("refund issued".into())).await?;
    assert!(c.resolved);
    assert_eq!(c.action_taken.as_deref(), Some("refund issued"));
    Ok(())
}
