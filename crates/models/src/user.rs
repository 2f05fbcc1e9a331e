use chrono::Utc;
use sea_orm::{entity::prelude::*, DatabaseConnection, Set};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::{order, service, service_provider};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub username: String,
    pub email: String,
    pub image_file: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub is_admin: bool,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    ServiceProvider,
    Services,
    Orders,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::ServiceProvider => Entity::has_one(service_provider::Entity).into(),
            Relation::Services => Entity::has_many(service::Entity).into(),
            Relation::Orders => Entity::has_many(order::Entity).into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_email(email: &str) -> Result<(), ModelError> {
    if !email.contains('@') {
        return Err(ModelError::Validation("invalid email".into()));
    }
    if email.len() > 120 {
        return Err(ModelError::Validation("email too long (<=120)".into()));
    }
    Ok(())
}

pub fn validate_username(username: &str) -> Result<(), ModelError> {
    if username.trim().is_empty() {
        return Err(ModelError::Validation("username required".into()));
    }
    if username.len() > 20 {
        return Err(ModelError::Validation("username too long (<=20)".into()));
    }
    Ok(())
}

/// Insert a new user. The password must already be hashed; the model
/// layer never sees plaintext.
pub async fn create(
    db: &DatabaseConnection,
    username: &str,
    email: &str,
    password_hash: &str,
) -> Result<Model, ModelError> {
    validate_username(username)?;
    validate_email(email)?;
    if password_hash.trim().is_empty() {
        return Err(ModelError::Validation("password hash required".into()));
    }
    let am = ActiveModel {
        username: Set(username.to_string()),
        email: Set(email.to_string()),
        image_file: Set("default.jpg".to_string()),
        password_hash: Set(password_hash.to_string()),
        is_admin: Set(false),
        created_at: Set(Utc::now()),
        ..Default::default()
    };
    am.insert(db).await.map_err(|e| ModelError::Db(e.to_string()))
}

pub async fn find_by_email(
    db: &DatabaseConnection,
    email: &str,
) -> Result<Option<Model>, ModelError> {
    Entity::find()
        .filter(Column::Email.eq(email))
        .one(db)
        .await
        .map_err(|e| ModelError::Db(e.to_string()))
}

/// Derived flag: a user is a service provider iff a matching
/// `service_provider` row exists.
pub async fn is_service_provider(db: &DatabaseConnection, id: i32) -> Result<bool, ModelError> {
    let found = service_provider::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ModelError::Db(e.to_string()))?;
    Ok(found.is_some())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_needs_at_sign() {
        assert!(validate_email("bob.example.com").is_err());
        assert!(validate_email("bob@example.com").is_ok());
    }

    #[test]
    fn username_must_fit_column() {
        assert!(validate_username("").is_err());
        assert!(validate_username("a".repeat(21).as_str()).is_err());
        assert!(validate_username("bob").is_ok());
    }
}
