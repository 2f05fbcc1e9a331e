use async_trait::async_trait;

use super::domain::AuthUser;
use super::errors::AuthError;

/// Repository abstraction for auth-related persistence.
#[async_trait]
pub trait AuthRepository: Send + Sync {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<AuthUser>, AuthError>;
    async fn create_user(
        &self,
        username: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<AuthUser, AuthError>;
    async fn get_password_hash(&self, user_id: i32) -> Result<Option<String>, AuthError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockAuthRepository {
        // key: email
        users: Mutex<HashMap<String, (AuthUser, String)>>,
        next_id: Mutex<i32>,
    }

    #[async_trait]
    impl AuthRepository for MockAuthRepository {
        async fn find_user_by_email(&self, email: &str) -> Result<Option<AuthUser>, AuthError> {
            let users = self.users.lock().unwrap();
            Ok(users.get(email).map(|(u, _)| u.clone()))
        }

        async fn create_user(
            &self,
            username: &str,
            email: &str,
            password_hash: &str,
        ) -> Result<AuthUser, AuthError> {
            let mut users = self.users.lock().unwrap();
            if users.contains_key(email) {
                return Err(AuthError::Conflict);
            }
            let mut next = self.next_id.lock().unwrap();
            *next += 1;
            let user = AuthUser {
                id: *next,
                username: username.to_string(),
                email: email.to_string(),
                is_admin: false,
            };
            users.insert(email.to_string(), (user.clone(), password_hash.to_string()));
            Ok(user)
        }

        async fn get_password_hash(&self, user_id: i32) -> Result<Option<String>, AuthError> {
            let users = self.users.lock().unwrap();
            Ok(users
                .values()
                .find(|(u, _)| u.id == user_id)
                .map(|(_, h)| h.clone()))
        }
    }
}
