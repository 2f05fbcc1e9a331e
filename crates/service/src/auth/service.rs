use std::sync::Arc;

use argon2::{
    password_hash::{PasswordHasher, PasswordVerifier, SaltString},
    Argon2, PasswordHash,
};
use jsonwebtoken::{encode, EncodingKey, Header as JwtHeader};
use rand::rngs::OsRng;
use tracing::{debug, info, instrument};

use super::domain::{AuthSession, AuthUser, Claims, LoginInput, RegisterInput};
use super::errors::AuthError;
use super::repository::AuthRepository;

/// Auth service configuration
#[derive(Clone)]
pub struct AuthConfig {
    pub jwt_secret: Option<String>,
    pub token_ttl_hours: i64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self { jwt_secret: None, token_ttl_hours: 12 }
    }
}

/// Auth business service independent of the web framework
pub struct AuthService<R: AuthRepository> {
    repo: Arc<R>,
    cfg: AuthConfig,
}

impl<R: AuthRepository> AuthService<R> {
    pub fn new(repo: Arc<R>, cfg: AuthConfig) -> Self {
        Self { repo, cfg }
    }

    /// Register a new user with an argon2-hashed password.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{service::{AuthService, AuthConfig}, repository::mock::MockAuthRepository};
    /// use service::auth::domain::RegisterInput;
    /// use std::sync::Arc;
    /// let repo = Arc::new(MockAuthRepository::default());
    /// let svc = AuthService::new(repo, AuthConfig::default());
    /// let input = RegisterInput { username: "amina".into(), email: "amina@example.com".into(), password: "Secret123".into() };
    /// let user = tokio_test::block_on(svc.register(input)).unwrap();
    /// assert_eq!(user.email, "amina@example.com");
    /// ```
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn register(&self, input: RegisterInput) -> Result<AuthUser, AuthError> {
        if input.password.len() < 8 {
            return Err(AuthError::Validation("password too short (>=8)".into()));
        }
        if let Some(existing) = self.repo.find_user_by_email(&input.email).await? {
            debug!("user exists: {}", existing.email);
            return Err(AuthError::Conflict);
        }

        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(input.password.as_bytes(), &salt)
            .map_err(|e| AuthError::HashError(e.to_string()))?
            .to_string();

        let user = self.repo.create_user(&input.username, &input.email, &hash).await?;
        info!(user_id = user.id, email = %user.email, "user_registered");
        Ok(user)
    }

    /// Authenticate a user and optionally issue a token.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{service::{AuthService, AuthConfig}, repository::mock::MockAuthRepository};
    /// use service::auth::domain::{RegisterInput, LoginInput};
    /// use std::sync::Arc;
    /// let repo = Arc::new(MockAuthRepository::default());
    /// let svc = AuthService::new(repo, AuthConfig { jwt_secret: Some("secret".into()), token_ttl_hours: 12 });
    /// let _ = tokio_test::block_on(svc.register(RegisterInput { username: "n".into(), email: "u@e.com".into(), password: "Passw0rd".into() }));
    /// let session = tokio_test::block_on(svc.login(LoginInput { email: "u@e.com".into(), password: "Passw0rd".into() })).unwrap();
    /// assert_eq!(session.user.email, "u@e.com");
    /// assert!(session.token.is_some());
    /// ```
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn login(&self, input: LoginInput) -> Result<AuthSession, AuthError> {
        let user = self
            .repo
            .find_user_by_email(&input.email)
            .await?
            .ok_or(AuthError::Unauthorized)?;

        let stored_hash = self
            .repo
            .get_password_hash(user.id)
            .await?
            .ok_or(AuthError::Unauthorized)?;

        let parsed = PasswordHash::new(&stored_hash).map_err(|e| AuthError::HashError(e.to_string()))?;
        if Argon2::default().verify_password(input.password.as_bytes(), &parsed).is_err() {
            return Err(AuthError::Unauthorized);
        }

        let mut token = None;
        if let Some(secret) = &self.cfg.jwt_secret {
            let exp = (chrono::Utc::now() + chrono::Duration::hours(self.cfg.token_ttl_hours))
                .timestamp() as usize;
            let claims = Claims { sub: user.email.clone(), uid: user.id, adm: user.is_admin, exp };
            token = Some(
                encode(&JwtHeader::default(), &claims, &EncodingKey::from_secret(secret.as_bytes()))
                    .map_err(|e| AuthError::TokenError(e.to_string()))?,
            );
        }

        Ok(AuthSession { user, token })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::repository::mock::MockAuthRepository;

    fn svc_with_secret() -> AuthService<MockAuthRepository> {
        AuthService::new(
            Arc::new(MockAuthRepository::default()),
            AuthConfig { jwt_secret: Some("test-secret".into()), token_ttl_hours: 1 },
        )
    }

    #[tokio::test]
    async fn short_password_is_rejected() {
        let svc = svc_with_secret();
        let out = svc
            .register(RegisterInput {
                username: "a".into(),
                email: "a@b.com".into(),
                password: "short".into(),
            })
            .await;
        assert!(matches!(out, Err(AuthError::Validation(_))));
    }

    #[tokio::test]
    async fn duplicate_registration_conflicts() {
        let svc = svc_with_secret();
        let input = RegisterInput {
            username: "a".into(),
            email: "a@b.com".into(),
            password: "LongEnough1".into(),
        };
        svc.register(input.clone()).await.unwrap();
        assert!(matches!(svc.register(input).await, Err(AuthError::Conflict)));
    }

    #[tokio::test]
    async fn wrong_password_is_unauthorized() {
        let svc = svc_with_secret();
        svc.register(RegisterInput {
            username: "a".into(),
            email: "a@b.com".into(),
            password: "LongEnough1".into(),
        })
        .await
        .unwrap();

        let bad = svc
            .login(LoginInput { email: "a@b.com".into(), password: "WrongPass1".into() })
            .await;
        assert!(matches!(bad, Err(AuthError::Unauthorized)));

        let ok = svc
            .login(LoginInput { email: "a@b.com".into(), password: "LongEnough1".into() })
            .await
            .unwrap();
        assert!(ok.token.is_some());
    }

    #[tokio::test]
    async fn login_without_secret_yields_no_token() {
        let svc = AuthService::new(Arc::new(MockAuthRepository::default()), AuthConfig::default());
        svc.register(RegisterInput {
            username: "a".into(),
            email: "a@b.com".into(),
            password: "LongEnough1".into(),
        })
        .await
        .unwrap();
        let session = svc
            .login(LoginInput { email: "a@b.com".into(), password: "LongEnough1".into() })
            .await
            .unwrap();
        assert!(session.token.is_none());
    }
}
