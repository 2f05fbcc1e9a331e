use chrono::Utc;
use sea_orm::{entity::prelude::*, DatabaseConnection, Set};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::{category, order, service_provider, user};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "service")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub date_posted: DateTimeUtc,
    pub ratings: i32,
    pub duration: i32,
    pub price: f64,
    pub user_id: i32,
    pub provider_id: i32,
    pub category_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Creator,
    Provider,
    Category,
    Orders,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Creator => Entity::belongs_to(user::Entity)
                .from(Column::UserId)
                .to(user::Column::Id)
                .into(),
            Relation::Provider => Entity::belongs_to(service_provider::Entity)
                .from(Column::ProviderId)
                .to(service_provider::Column::Id)
                .into(),
            Relation::Category => Entity::belongs_to(category::Entity)
                .from(Column::CategoryId)
                .to(category::Column::Id)
                .into(),
            Relation::Orders => Entity::has_many(order::Entity).into(),
        }
    }
}

impl Related<user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Creator.def()
    }
}

impl Related<service_provider::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Provider.def()
    }
}

impl Related<category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Ratings live on a 0..=5 scale; anything else is rejected before it
/// reaches the database.
pub fn validate_ratings(value: i32) -> Result<(), ModelError> {
    if (0..=5).contains(&value) {
        Ok(())
    } else {
        Err(ModelError::Validation("ratings must be between 0 and 5".into()))
    }
}

pub async fn create(
    db: &DatabaseConnection,
    title: &str,
    description: &str,
    duration: i32,
    price: f64,
    user_id: i32,
    provider_id: i32,
    category_id: i32,
) -> Result<Model, ModelError> {
    if title.trim().is_empty() {
        return Err(ModelError::Validation("title required".into()));
    }
    if title.len() > 100 {
        return Err(ModelError::Validation("title too long (<=100)".into()));
    }
    if description.trim().is_empty() {
        return Err(ModelError::Validation("description required".into()));
    }
    let am = ActiveModel {
        title: Set(title.to_string()),
        description: Set(description.to_string()),
        date_posted: Set(Utc::now()),
        ratings: Set(0),
        duration: Set(duration),
        price: Set(price),
        user_id: Set(user_id),
        provider_id: Set(provider_id),
        category_id: Set(category_id),
        ..Default::default()
    };
    am.insert(db).await.map_err(|e| ModelError::Db(e.to_string()))
}

/// Assign a new ratings value. A value outside 0..=5 fails validation
/// and the stored value is left untouched.
pub async fn set_ratings(
    db: &DatabaseConnection,
    id: i32,
    value: i32,
) -> Result<Model, ModelError> {
    validate_ratings(value)?;
    let mut am: ActiveModel = Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ModelError::Db(e.to_string()))?
        .ok_or_else(|| ModelError::Validation("service not found".into()))?
        .into();
    am.ratings = Set(value);
    am.update(db).await.map_err(|e| ModelError::Db(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratings_bounds_inclusive() {
        assert!(validate_ratings(0).is_ok());
        assert!(validate_ratings(5).is_ok());
        assert!(validate_ratings(-1).is_err());
        assert!(validate_ratings(6).is_err());
    }
}
