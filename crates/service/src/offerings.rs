use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

use crate::errors::ServiceError;
use models::{provider_service, service, service_provider};

/// Link a provider to an existing service listing. The composite key
/// rejects duplicate pairs; that surfaces as a validation error here.
pub async fn link_offering(
    db: &DatabaseConnection,
    service_id: i32,
    provider_id: i32,
) -> Result<provider_service::Model, ServiceError> {
    service::Entity::find_by_id(service_id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("service"))?;
    service_provider::Entity::find_by_id(provider_id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("service provider"))?;

    let existing = provider_service::Entity::find_by_id((service_id, provider_id))
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    if existing.is_some() {
        return Err(ServiceError::Validation("offering already linked".into()));
    }

    let linked = provider_service::link(db, service_id, provider_id).await?;
    Ok(linked)
}

pub async fn unlink_offering(
    db: &DatabaseConnection,
    service_id: i32,
    provider_id: i32,
) -> Result<(), ServiceError> {
    provider_service::unlink(db, service_id, provider_id).await?;
    Ok(())
}

/// Services a provider offers through the association table.
pub async fn list_provider_offerings(
    db: &DatabaseConnection,
    provider_id: i32,
) -> Result<Vec<service::Model>, ServiceError> {
    let links = provider_service::Entity::find()
        .filter(provider_service::Column::ServiceProviderId.eq(provider_id))
        .all(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    if links.is_empty() {
        return Ok(Vec::new());
    }
    let ids: Vec<i32> = links.iter().map(|l| l.service_id).collect();
    service::Entity::find()
        .filter(service::Column::Id.is_in(ids))
        .all(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{get_db, seed};

    #[tokio::test]
    async fn link_list_unlink_cycle() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let (_, provider, _, svc) = seed(&db).await?;

        link_offering(&db, svc.id, provider.id).await?;
        let offered = list_provider_offerings(&db, provider.id).await?;
        assert_eq!(offered.len(), 1);
        assert_eq!(offered[0].id, svc.id);

        let dup = link_offering(&db, svc.id, provider.id).await;
        assert!(matches!(dup, Err(ServiceError::Validation(_))));

        unlink_offering(&db, svc.id, provider.id).await?;
        assert!(list_provider_offerings(&db, provider.id).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn linking_requires_both_rows() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let (_, provider, _, svc) = seed(&db).await?;

        assert!(matches!(
            link_offering(&db, 999, provider.id).await,
            Err(ServiceError::NotFound(_))
        ));
        assert!(matches!(
            link_offering(&db, svc.id, 999).await,
            Err(ServiceError::NotFound(_))
        ));
        Ok(())
    }
}
