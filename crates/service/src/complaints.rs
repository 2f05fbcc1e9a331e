use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};
use tracing::info;

use crate::errors::ServiceError;
use crate::pagination::Pagination;
use models::{complaint, order};

/// File a complaint about an order. The order must exist; the message
/// must be non-empty.
pub async fn file_complaint(
    db: &DatabaseConnection,
    user_id: i32,
    order_id: i32,
    message: &str,
) -> Result<complaint::Model, ServiceError> {
    order::Entity::find_by_id(order_id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("order"))?;
    let created = complaint::create(db, order_id, user_id, message).await?;
    info!(complaint_id = created.id, order_id, user_id, "complaint filed");
    Ok(created)
}

/// Complaints filed by one user, newest first.
pub async fn list_for_user(
    db: &DatabaseConnection,
    user_id: i32,
    opts: Pagination,
) -> Result<Vec<complaint::Model>, ServiceError> {
    let (page_idx, per_page) = opts.normalize();
    complaint::Entity::find()
        .filter(complaint::Column::UserId.eq(user_id))
        .order_by_desc(complaint::Column::DatePosted)
        .paginate(db, per_page)
        .fetch_page(page_idx)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))
}

/// All complaints, for admin review, newest first.
pub async fn list_all(
    db: &DatabaseConnection,
    opts: Pagination,
) -> Result<Vec<complaint::Model>, ServiceError> {
    let (page_idx, per_page) = opts.normalize();
    complaint::Entity::find()
        .order_by_desc(complaint::Column::DatePosted)
        .paginate(db, per_page)
        .fetch_page(page_idx)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))
}

/// Admin action: close a complaint and record what was done.
pub async fn resolve_complaint(
    db: &DatabaseConnection,
    complaint_id: i32,
    action_taken: Option<String>,
) -> Result<complaint::Model, ServiceError> {
    complaint::Entity::find_by_id(complaint_id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("complaint"))?;
    let resolved = complaint::resolve(db, complaint_id, action_taken).await?;
    info!(complaint_id, "complaint resolved");
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::EventHub;
    use crate::orders::place_order;
    use crate::test_support::{get_db, seed};

    #[tokio::test]
    async fn complaint_requires_existing_order() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let (customer, _, _, _) = seed(&db).await?;

        let missing = file_complaint(&db, customer.id, 999, "no show").await;
        assert!(matches!(missing, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn filing_and_resolving_a_complaint() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let (customer, _, _, svc) = seed(&db).await?;
        let hub = EventHub::new(8);
        let o = place_order(&db, &hub, customer.id, svc.id, "5 Nile St", None, None).await?;

        let c = file_complaint(&db, customer.id, o.id, "provider was late").await?;
        assert!(!c.resolved);

        let mine = list_for_user(&db, customer.id, Pagination::default()).await?;
        assert_eq!(mine.len(), 1);

        let c = resolve_complaint(&db, c.id, Some("warned the provider".into())).await?;
        assert!(c.resolved);
        assert_eq!(c.action_taken.as_deref(), Some("warned the provider"));

        let everything = list_all(&db, Pagination::default()).await?;
        assert_eq!(everything.len(), 1);
        Ok(())
    }
}
