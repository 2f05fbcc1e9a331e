use chrono::Utc;
use sea_orm::{entity::prelude::*, DatabaseConnection, Set};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::{order, user};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "complaint")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(column_type = "Text")]
    pub message: String,
    pub date_posted: DateTimeUtc,
    pub resolved: bool,
    pub action_taken: Option<String>,
    pub order_id: i32,
    pub user_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Order,
    User,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Order => Entity::belongs_to(order::Entity)
                .from(Column::OrderId)
                .to(order::Column::Id)
                .into(),
            Relation::User => Entity::belongs_to(user::Entity)
                .from(Column::UserId)
                .to(user::Column::Id)
                .into(),
        }
    }
}

impl Related<order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Order.def()
    }
}

impl Related<user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// File a complaint against an order. Starts unresolved with no action
/// recorded.
pub async fn create(
    db: &DatabaseConnection,
    order_id: i32,
    user_id: i32,
    message: &str,
) -> Result<Model, ModelError> {
    if message.trim().is_empty() {
        return Err(ModelError::Validation("complaint message required".into()));
    }
    let am = ActiveModel {
        message: Set(message.to_string()),
        date_posted: Set(Utc::now()),
        resolved: Set(false),
        action_taken: Set(None),
        order_id: Set(order_id),
        user_id: Set(user_id),
        ..Default::default()
    };
    am.insert(db).await.map_err(|e| ModelError::Db(e.to_string()))
}

/// Close a complaint, recording what was done about it.
pub async fn resolve(
    db: &DatabaseConnection,
    id: i32,
    action_taken: Option<String>,
) -> Result<Model, ModelError> {
    if let Some(action) = &action_taken {
        if action.len() > 100 {
            return Err(ModelError::Validation("action_taken too long (<=100)".into()));
        }
    }
    let mut am: ActiveModel = Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ModelError::Db(e.to_string()))?
        .ok_or_else(|| ModelError::Validation("complaint not found".into()))?
        .into();
    am.resolved = Set(true);
    am.action_taken = Set(action_taken);
    am.update(db).await.map_err(|e| ModelError::Db(e.to_string()))
}
