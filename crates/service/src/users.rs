use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use serde::Serialize;

use crate::errors::ServiceError;
use models::{service_provider, user};

/// User together with the derived provider flag.
#[derive(Debug, Clone, Serialize)]
pub struct UserProfile {
    #[serde(flatten)]
    pub user: user::Model,
    pub is_service_provider: bool,
}

pub async fn get_user(
    db: &DatabaseConnection,
    id: i32,
) -> Result<Option<user::Model>, ServiceError> {
    user::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))
}

pub async fn get_profile(db: &DatabaseConnection, id: i32) -> Result<UserProfile, ServiceError> {
    let u = get_user(db, id).await?.ok_or_else(|| ServiceError::not_found("user"))?;
    let is_provider = user::is_service_provider(db, u.id).await?;
    Ok(UserProfile { user: u, is_service_provider: is_provider })
}

/// Update mutable profile fields (username, avatar image path).
pub async fn update_profile(
    db: &DatabaseConnection,
    id: i32,
    username: Option<String>,
    image_file: Option<String>,
) -> Result<user::Model, ServiceError> {
    let mut am: user::ActiveModel = get_user(db, id)
        .await?
        .ok_or_else(|| ServiceError::not_found("user"))?
        .into();
    if let Some(name) = username {
        user::validate_username(&name)?;
        am.username = Set(name);
    }
    if let Some(image) = image_file {
        if image.trim().is_empty() || image.len() > 40 {
            return Err(ServiceError::Validation("image file must be 1..=40 chars".into()));
        }
        am.image_file = Set(image);
    }
    am.update(db).await.map_err(|e| ServiceError::Db(e.to_string()))
}

/// Create the provider extension row for an existing user.
pub async fn become_provider(
    db: &DatabaseConnection,
    user_id: i32,
    nid: &str,
    bio: Option<String>,
    latitude: Option<f64>,
    longitude: Option<f64>,
) -> Result<service_provider::Model, ServiceError> {
    get_user(db, user_id).await?.ok_or_else(|| ServiceError::not_found("user"))?;
    if user::is_service_provider(db, user_id).await? {
        return Err(ServiceError::Validation("user is already a service provider".into()));
    }
    let created = service_provider::create(db, user_id, nid, bio, latitude, longitude).await?;
    Ok(created)
}

pub async fn get_provider(
    db: &DatabaseConnection,
    id: i32,
) -> Result<Option<service_provider::Model>, ServiceError> {
    service_provider::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))
}

/// Admin action: mark a provider as verified.
pub async fn verify_provider(
    db: &DatabaseConnection,
    id: i32,
) -> Result<service_provider::Model, ServiceError> {
    get_provider(db, id).await?.ok_or_else(|| ServiceError::not_found("service provider"))?;
    let updated = service_provider::set_verified(db, id).await?;
    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;

    #[tokio::test]
    async fn profile_reports_provider_flag() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let u = models::user::create(&db, "amina", "amina@example.com", "hash").await?;

        let profile = get_profile(&db, u.id).await?;
        assert!(!profile.is_service_provider);

        become_provider(&db, u.id, "29901011234567", Some("electrician".into()), None, None).await?;
        let profile = get_profile(&db, u.id).await?;
        assert!(profile.is_service_provider);
        Ok(())
    }

    #[tokio::test]
    async fn becoming_provider_twice_is_rejected() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let u = models::user::create(&db, "omar", "omar@example.com", "hash").await?;

        become_provider(&db, u.id, "123", None, None, None).await?;
        let again = become_provider(&db, u.id, "456", None, None, None).await;
        assert!(matches!(again, Err(ServiceError::Validation(_))));
        Ok(())
    }

    #[tokio::test]
    async fn verify_provider_sets_flag() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let u = models::user::create(&db, "omar", "omar@example.com", "hash").await?;
        let p = become_provider(&db, u.id, "123", None, None, None).await?;
        assert!(!p.verified);

        let p = verify_provider(&db, p.id).await?;
        assert!(p.verified);

        let missing = verify_provider(&db, 999).await;
        assert!(matches!(missing, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn update_profile_validates_fields() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let u = models::user::create(&db, "amina", "amina@example.com", "hash").await?;

        let updated = update_profile(&db, u.id, Some("amina_k".into()), Some("me.png".into())).await?;
        assert_eq!(updated.username, "amina_k");
        assert_eq!(updated.image_file, "me.png");

        let bad = update_profile(&db, u.id, Some("".into()), None).await;
        assert!(bad.is_err());
        Ok(())
    }
}
