use chrono::Utc;
use sea_orm::{entity::prelude::*, DatabaseConnection, Set};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::{service, service_provider, user};

/// Order lifecycle tags. A closed enumeration stored as a string column;
/// there is no enforced transition table, the workflow ordering is
/// domain convention only.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "accepted")]
    Accepted,
    #[sea_orm(string_value = "on_the_way")]
    OnTheWay,
    #[sea_orm(string_value = "reached")]
    Reached,
    #[sea_orm(string_value = "completed")]
    Completed,
    #[sea_orm(string_value = "rejected")]
    Rejected,
}

/// Whether the counterpart has seen the order yet.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "snake_case")]
pub enum NotificationStatus {
    #[default]
    #[sea_orm(string_value = "not_viewed")]
    NotViewed,
    #[sea_orm(string_value = "viewed")]
    Viewed,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "order")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub location: String,
    pub ordered_at: DateTimeUtc,
    pub status: OrderStatus,
    #[sea_orm(column_type = "Text", nullable)]
    pub review: Option<String>,
    pub rate: Option<i32>,
    pub price: f64,
    pub notification: NotificationStatus,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub service_id: i32,
    pub customer_id: i32,
    pub provider_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Service,
    Customer,
    Provider,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Service => Entity::belongs_to(service::Entity)
                .from(Column::ServiceId)
                .to(service::Column::Id)
                .into(),
            Relation::Customer => Entity::belongs_to(user::Entity)
                .from(Column::CustomerId)
                .to(user::Column::Id)
                .into(),
            Relation::Provider => Entity::belongs_to(service_provider::Entity)
                .from(Column::ProviderId)
                .to(service_provider::Column::Id)
                .into(),
        }
    }
}

impl Related<service::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Service.def()
    }
}

impl Related<user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Customer.def()
    }
}

impl Related<service_provider::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Provider.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Insert a new order. Status defaults to `pending` and notification
/// state to `not_viewed`.
#[allow(clippy::too_many_arguments)]
pub async fn create(
    db: &DatabaseConnection,
    location: &str,
    price: f64,
    service_id: i32,
    customer_id: i32,
    provider_id: i32,
    latitude: Option<f64>,
    longitude: Option<f64>,
) -> Result<Model, ModelError> {
    if location.trim().is_empty() {
        return Err(ModelError::Validation("order location required".into()));
    }
    if location.len() > 200 {
        return Err(ModelError::Validation("order location too long (<=200)".into()));
    }
    let am = ActiveModel {
        location: Set(location.to_string()),
        ordered_at: Set(Utc::now()),
        status: Set(OrderStatus::default()),
        review: Set(None),
        rate: Set(None),
        price: Set(price),
        notification: Set(NotificationStatus::default()),
        latitude: Set(latitude),
        longitude: Set(longitude),
        service_id: Set(service_id),
        customer_id: Set(customer_id),
        provider_id: Set(provider_id),
        ..Default::default()
    };
    am.insert(db).await.map_err(|e| ModelError::Db(e.to_string()))
}

/// Assign a new status tag. Any member of the enumeration is accepted.
pub async fn set_status(
    db: &DatabaseConnection,
    id: i32,
    status: OrderStatus,
) -> Result<Model, ModelError> {
    let mut am: ActiveModel = Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ModelError::Db(e.to_string()))?
        .ok_or_else(|| ModelError::Validation("order not found".into()))?
        .into();
    am.status = Set(status);
    am.update(db).await.map_err(|e| ModelError::Db(e.to_string()))
}

pub async fn mark_viewed(db: &DatabaseConnection, id: i32) -> Result<Model, ModelError> {
    let mut am: ActiveModel = Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ModelError::Db(e.to_string()))?
        .ok_or_else(|| ModelError::Validation("order not found".into()))?
        .into();
    am.notification = Set(NotificationStatus::Viewed);
    am.update(db).await.map_err(|e| ModelError::Db(e.to_string()))
}

/// Attach a customer review and rate after the fact. Order rates are
/// unbounded; only service ratings are range-checked.
pub async fn set_review(
    db: &DatabaseConnection,
    id: i32,
    rate: Option<i32>,
    review: Option<String>,
) -> Result<Model, ModelError> {
    let mut am: ActiveModel = Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ModelError::Db(e.to_string()))?
        .ok_or_else(|| ModelError::Validation("order not found".into()))?
        .into();
    am.rate = Set(rate);
    am.review = Set(review);
    am.update(db).await.map_err(|e| ModelError::Db(e.to_string()))
}
