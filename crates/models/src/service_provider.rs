use sea_orm::{entity::prelude::*, DatabaseConnection, Set};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::{order, service, user};

/// Provider profile; the primary key is shared with `user.id` (is-a
/// extension of a user, not a standalone account).
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "service_provider")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i32,
    pub nid: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub bio: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub verified: bool,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    User,
    Services,
    Orders,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::User => Entity::belongs_to(user::Entity)
                .from(Column::Id)
                .to(user::Column::Id)
                .into(),
            Relation::Services => Entity::has_many(service::Entity).into(),
            Relation::Orders => Entity::has_many(order::Entity).into(),
        }
    }
}

impl Related<user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_nid(nid: &str) -> Result<(), ModelError> {
    if nid.trim().is_empty() {
        return Err(ModelError::Validation("national id required".into()));
    }
    if nid.len() > 50 {
        return Err(ModelError::Validation("national id too long (<=50)".into()));
    }
    Ok(())
}

/// Insert a provider profile for an existing user. The FK on `id`
/// rejects ids with no matching user row.
pub async fn create(
    db: &DatabaseConnection,
    user_id: i32,
    nid: &str,
    bio: Option<String>,
    latitude: Option<f64>,
    longitude: Option<f64>,
) -> Result<Model, ModelError> {
    validate_nid(nid)?;
    let am = ActiveModel {
        id: Set(user_id),
        nid: Set(nid.to_string()),
        bio: Set(bio),
        latitude: Set(latitude),
        longitude: Set(longitude),
        verified: Set(false),
    };
    am.insert(db).await.map_err(|e| ModelError::Db(e.to_string()))
}

/// Mark a provider as verified (admin action).
pub async fn set_verified(db: &DatabaseConnection, id: i32) -> Result<Model, ModelError> {
    let mut am: ActiveModel = Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ModelError::Db(e.to_string()))?
        .ok_or_else(|| ModelError::Validation("service provider not found".into()))?
        .into();
    am.verified = Set(true);
    am.update(db).await.map_err(|e| ModelError::Db(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nid_is_required() {
        assert!(validate_nid("  ").is_err());
        assert!(validate_nid("29804150101234").is_ok());
    }
}
