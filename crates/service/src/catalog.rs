use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};

use crate::{errors::ServiceError, pagination::Pagination};
use models::{category, service, user};

pub async fn create_category(
    db: &DatabaseConnection,
    name: &str,
) -> Result<category::Model, ServiceError> {
    if category::find_by_name(db, name).await?.is_some() {
        return Err(ServiceError::Validation(format!("category '{}' already exists", name)));
    }
    let created = category::create(db, name).await?;
    Ok(created)
}

pub async fn list_categories(db: &DatabaseConnection) -> Result<Vec<category::Model>, ServiceError> {
    category::Entity::find()
        .order_by_asc(category::Column::Name)
        .all(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))
}

/// Post a new service listing. The creator must already have a provider
/// profile; the category must exist.
#[allow(clippy::too_many_arguments)]
pub async fn create_service(
    db: &DatabaseConnection,
    creator_id: i32,
    title: &str,
    description: &str,
    duration: i32,
    price: f64,
    category_id: i32,
) -> Result<service::Model, ServiceError> {
    if !user::is_service_provider(db, creator_id).await? {
        return Err(ServiceError::Validation("only service providers can post services".into()));
    }
    category::Entity::find_by_id(category_id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("category"))?;
    let created = service::create(
        db,
        title,
        description,
        duration,
        price,
        creator_id,
        creator_id,
        category_id,
    )
    .await?;
    Ok(created)
}

pub async fn get_service(
    db: &DatabaseConnection,
    id: i32,
) -> Result<Option<service::Model>, ServiceError> {
    service::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))
}

/// List services, newest first, optionally restricted to one category.
pub async fn list_services(
    db: &DatabaseConnection,
    category_id: Option<i32>,
    opts: Pagination,
) -> Result<Vec<service::Model>, ServiceError> {
    let (page_idx, per_page) = opts.normalize();
    let mut query = service::Entity::find().order_by_desc(service::Column::DatePosted);
    if let Some(cat) = category_id {
        query = query.filter(service::Column::CategoryId.eq(cat));
    }
    query
        .paginate(db, per_page)
        .fetch_page(page_idx)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))
}

/// Assign a ratings value; out-of-range values are rejected and the
/// stored value is retained.
pub async fn set_ratings(
    db: &DatabaseConnection,
    service_id: i32,
    value: i32,
) -> Result<service::Model, ServiceError> {
    let updated = service::set_ratings(db, service_id, value).await?;
    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{get_db, seed};

    #[tokio::test]
    async fn duplicate_category_name_is_rejected() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        create_category(&db, "gardening").await?;
        let dup = create_category(&db, "gardening").await;
        assert!(matches!(dup, Err(ServiceError::Validation(_))));
        Ok(())
    }

    #[tokio::test]
    async fn only_providers_can_post_services() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let (customer, _, cat, _) = seed(&db).await?;

        let denied =
            create_service(&db, customer.id, "Title", "Desc", 30, 10.0, cat.id).await;
        assert!(matches!(denied, Err(ServiceError::Validation(_))));
        Ok(())
    }

    #[tokio::test]
    async fn listing_filters_by_category_and_paginates() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let (_, provider, cat, _) = seed(&db).await?;
        let other = create_category(&db, "painting").await?;

        for i in 0..3 {
            create_service(&db, provider.id, &format!("svc {i}"), "desc", 30, 15.0, other.id)
                .await?;
        }

        let page = list_services(&db, Some(other.id), Pagination { page: 1, per_page: 2 }).await?;
        assert_eq!(page.len(), 2);

        let all_cat = list_services(&db, Some(cat.id), Pagination::default()).await?;
        assert_eq!(all_cat.len(), 1);

        let everything = list_services(&db, None, Pagination::default()).await?;
        assert_eq!(everything.len(), 4);
        Ok(())
    }

    #[tokio::test]
    async fn set_ratings_round_trips_through_the_service_layer() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let (_, _, _, svc) = seed(&db).await?;

        let updated = set_ratings(&db, svc.id, 3).await?;
        assert_eq!(updated.ratings, 3);

        let rejected = set_ratings(&db, svc.id, -1).await;
        assert!(rejected.is_err());
        let stored = get_service(&db, svc.id).await?.unwrap();
        assert_eq!(stored.ratings, 3);
        Ok(())
    }
}
