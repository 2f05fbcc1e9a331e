use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};
use tracing::info;

use crate::errors::ServiceError;
use crate::notify::{EventHub, OrderEvent};
use crate::pagination::Pagination;
use models::order::{self, OrderStatus};
use models::service;

/// Place an order for a service. The price is snapshotted from the
/// listing at order time; status and notification state take their
/// defaults (`pending`, `not_viewed`). Subscribers are notified.
pub async fn place_order(
    db: &DatabaseConnection,
    hub: &EventHub,
    customer_id: i32,
    service_id: i32,
    location: &str,
    latitude: Option<f64>,
    longitude: Option<f64>,
) -> Result<order::Model, ServiceError> {
    let svc = service::Entity::find_by_id(service_id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("service"))?;

    let created = order::create(
        db,
        location,
        svc.price,
        svc.id,
        customer_id,
        svc.provider_id,
        latitude,
        longitude,
    )
    .await?;

    info!(order_id = created.id, customer_id, provider_id = svc.provider_id, "order placed");
    hub.publish(OrderEvent::Placed {
        order_id: created.id,
        service_id: svc.id,
        customer_id,
        provider_id: svc.provider_id,
    });
    Ok(created)
}

pub async fn get_order(
    db: &DatabaseConnection,
    id: i32,
) -> Result<Option<order::Model>, ServiceError> {
    order::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))
}

/// Orders placed by a customer, newest first.
pub async fn list_for_customer(
    db: &DatabaseConnection,
    customer_id: i32,
    opts: Pagination,
) -> Result<Vec<order::Model>, ServiceError> {
    let (page_idx, per_page) = opts.normalize();
    order::Entity::find()
        .filter(order::Column::CustomerId.eq(customer_id))
        .order_by_desc(order::Column::OrderedAt)
        .paginate(db, per_page)
        .fetch_page(page_idx)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))
}

/// Orders received by a provider, newest first.
pub async fn list_for_provider(
    db: &DatabaseConnection,
    provider_id: i32,
    opts: Pagination,
) -> Result<Vec<order::Model>, ServiceError> {
    let (page_idx, per_page) = opts.normalize();
    order::Entity::find()
        .filter(order::Column::ProviderId.eq(provider_id))
        .order_by_desc(order::Column::OrderedAt)
        .paginate(db, per_page)
        .fetch_page(page_idx)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))
}

/// Assign a new status tag and notify both parties. Any enum member is
/// a legal assignment; the workflow ordering is convention, not a
/// machine enforced here.
pub async fn update_status(
    db: &DatabaseConnection,
    hub: &EventHub,
    order_id: i32,
    status: OrderStatus,
) -> Result<order::Model, ServiceError> {
    get_order(db, order_id).await?.ok_or_else(|| ServiceError::not_found("order"))?;
    let updated = order::set_status(db, order_id, status.clone()).await?;
    info!(order_id, status = ?status, "order status updated");
    hub.publish(OrderEvent::StatusChanged {
        order_id,
        customer_id: updated.customer_id,
        provider_id: updated.provider_id,
        status,
    });
    Ok(updated)
}

/// Flip the notification tag once the recipient has seen the order.
pub async fn mark_viewed(
    db: &DatabaseConnection,
    order_id: i32,
) -> Result<order::Model, ServiceError> {
    get_order(db, order_id).await?.ok_or_else(|| ServiceError::not_found("order"))?;
    let updated = order::mark_viewed(db, order_id).await?;
    Ok(updated)
}

/// Attach the customer's review text and rate to a finished order.
pub async fn review_order(
    db: &DatabaseConnection,
    order_id: i32,
    rate: Option<i32>,
    review: Option<String>,
) -> Result<order::Model, ServiceError> {
    get_order(db, order_id).await?.ok_or_else(|| ServiceError::not_found("order"))?;
    let updated = order::set_review(db, order_id, rate, review).await?;
    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{get_db, seed};
    use models::order::NotificationStatus;

    #[tokio::test]
    async fn place_order_snapshots_price_and_notifies() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let (customer, provider, _, svc) = seed(&db).await?;
        let hub = EventHub::new(8);
        let mut rx = hub.subscribe();

        let o = place_order(&db, &hub, customer.id, svc.id, "5 Nile St", None, None).await?;
        assert_eq!(o.price, svc.price);
        assert_eq!(o.status, OrderStatus::Pending);
        assert_eq!(o.notification, NotificationStatus::NotViewed);
        assert_eq!(o.provider_id, provider.id);

        match rx.recv().await.unwrap() {
            OrderEvent::Placed { order_id, customer_id, provider_id, .. } => {
                assert_eq!(order_id, o.id);
                assert_eq!(customer_id, customer.id);
                assert_eq!(provider_id, provider.id);
            }
            other => panic!("unexpected event: {other:?}"),
        }
        Ok(())
    }

    #[tokio::test]
    async fn ordering_a_missing_service_is_not_found() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let (customer, _, _, _) = seed(&db).await?;
        let hub = EventHub::new(8);

        let missing = place_order(&db, &hub, customer.id, 999, "5 Nile St", None, None).await;
        assert!(matches!(missing, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn status_update_publishes_event() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let (customer, provider, _, svc) = seed(&db).await?;
        let hub = EventHub::new(8);

        let o = place_order(&db, &hub, customer.id, svc.id, "5 Nile St", None, None).await?;

        let mut rx = hub.subscribe();
        let updated = update_status(&db, &hub, o.id, OrderStatus::OnTheWay).await?;
        assert_eq!(updated.status, OrderStatus::OnTheWay);

        match rx.recv().await.unwrap() {
            OrderEvent::StatusChanged { status, provider_id, .. } => {
                assert_eq!(status, OrderStatus::OnTheWay);
                assert_eq!(provider_id, provider.id);
            }
            other => panic!("unexpected event: {other:?}"),
        }
        Ok(())
    }

    #[tokio::test]
    async fn listings_are_scoped_per_party() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let (customer, provider, _, svc) = seed(&db).await?;
        let hub = EventHub::new(8);

        place_order(&db, &hub, customer.id, svc.id, "5 Nile St", None, None).await?;
        place_order(&db, &hub, customer.id, svc.id, "7 Nile St", None, None).await?;

        let mine = list_for_customer(&db, customer.id, Pagination::default()).await?;
        assert_eq!(mine.len(), 2);

        let inbox = list_for_provider(&db, provider.id, Pagination::default()).await?;
        assert_eq!(inbox.len(), 2);

        let none = list_for_customer(&db, provider.id, Pagination::default()).await?;
        assert!(none.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn viewed_and_review_mutations() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let (customer, _, _, svc) = seed(&db).await?;
        let hub = EventHub::new(8);

        let o = place_order(&db, &hub, customer.id, svc.id, "5 Nile St", None, None).await?;

        let o2 = mark_viewed(&db, o.id).await?;
        assert_eq!(o2.notification, NotificationStatus::Viewed);

        let o3 = review_order(&db, o.id, Some(5), Some("great work".into())).await?;
        assert_eq!(o3.rate, Some(5));
        assert_eq!(o3.review.as_deref(), Some("great work"));
        Ok(())
    }
}
