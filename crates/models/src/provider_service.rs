use sea_orm::{entity::prelude::*, DatabaseConnection, Set};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::{service, service_provider};

/// Association row linking a service to a provider offering it. The
/// composite primary key makes each (service, provider) pair unique.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "provider_service")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub service_id: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub service_provider_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Service,
    ServiceProvider,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Service => Entity::belongs_to(service::Entity)
                .from(Column::ServiceId)
                .to(service::Column::Id)
                .into(),
            Relation::ServiceProvider => Entity::belongs_to(service_provider::Entity)
                .from(Column::ServiceProviderId)
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

impl Related<service_provider::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ServiceProvider.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Link a provider to a service. Inserting the same pair twice violates
/// the composite primary key and surfaces as a `Db` error.
pub async fn link(
    db: &DatabaseConnection,
    service_id: i32,
    service_provider_id: i32,
) -> Result<Model, ModelError> {
    let am = ActiveModel {
        service_id: Set(service_id),
        service_provider_id: Set(service_provider_id),
    };
    am.insert(db).await.map_err(|e| ModelError::Db(e.to_string()))
}

pub async fn unlink(
    db: &DatabaseConnection,
    service_id: i32,
    service_provider_id: i32,
) -> Result<(), ModelError> {
    Entity::delete_by_id((service_id, service_provider_id))
        .exec(db)
        .await
        .map_err(|e| ModelError::Db(e.to_string()))?;
    Ok(())
}
