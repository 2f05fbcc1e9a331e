use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::Response,
    Extension, Json,
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};

use crate::errors::ApiError;
use service::auth::{
    domain::{Claims, LoginInput, RegisterInput},
    repo::seaorm::SeaOrmAuthRepository,
    service::{AuthConfig, AuthService},
};
use service::notify::EventHub;
use service::users;

#[derive(Clone)]
pub struct ServerAuthConfig {
    pub jwt_secret: String,
}

#[derive(Clone)]
pub struct ServerState {
    pub db: DatabaseConnection,
    pub auth: ServerAuthConfig,
    pub hub: EventHub,
}

impl ServerState {
    fn auth_service(&self) -> AuthService<SeaOrmAuthRepository> {
        let repo = Arc::new(SeaOrmAuthRepository { db: self.db.clone() });
        AuthService::new(
            repo,
            AuthConfig { jwt_secret: Some(self.auth.jwt_secret.clone()), ..Default::default() },
        )
    }
}

#[derive(Serialize)]
pub struct RegisterOutput {
    pub user_id: i32,
}

#[derive(Serialize)]
pub struct LoginOutput {
    pub user_id: i32,
    pub username: String,
    pub email: String,
    pub token: String,
}

#[utoipa::path(post, path = "/auth/register", tag = "auth",
    request_body = crate::openapi::RegisterRequest,
    responses((status = 200, description = "Registered"), (status = 400, description = "Bad Request"), (status = 409, description = "Conflict")))]
pub async fn register(
    State(state): State<ServerState>,
    Json(input): Json<RegisterInput>,
) -> Result<Json<RegisterOutput>, ApiError> {
    models::user::validate_username(&input.username)
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;
    models::user::validate_email(&input.email)
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let user = state.auth_service().register(input).await?;
    Ok(Json(RegisterOutput { user_id: user.id }))
}

#[utoipa::path(post, path = "/auth/login", tag = "auth",
    request_body = crate::openapi::LoginRequest,
    responses((status = 200, description = "Logged In"), (status = 401, description = "Unauthorized")))]
pub async fn login(
    State(state): State<ServerState>,
    jar: CookieJar,
    Json(input): Json<LoginInput>,
) -> Result<(CookieJar, Json<LoginOutput>), ApiError> {
    let session = state.auth_service().login(input).await?;
    let user = session.user;
    let token = session
        .token
        .ok_or_else(|| ApiError::Internal("token generation failed".into()))?;

    let mut cookie = Cookie::new("auth_token", token.clone());
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_same_site(axum_extra::extract::cookie::SameSite::Lax);
    let jar = jar.add(cookie);

    let out = LoginOutput { user_id: user.id, username: user.username, email: user.email, token };
    Ok((jar, Json(out)))
}

pub async fn logout(jar: CookieJar) -> (CookieJar, StatusCode) {
    let jar = jar.remove(Cookie::from("auth_token"));
    (jar, StatusCode::NO_CONTENT)
}

#[utoipa::path(get, path = "/auth/me", tag = "auth",
    responses((status = 200, description = "Current user profile"), (status = 401, description = "Unauthorized")))]
pub async fn me(
    State(state): State<ServerState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<users::UserProfile>, ApiError> {
    let profile = users::get_profile(&state.db, claims.uid).await?;
    Ok(Json(profile))
}

#[derive(Deserialize)]
pub struct UpdateProfileInput {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub image_file: Option<String>,
}

pub async fn update_me(
    State(state): State<ServerState>,
    Extension(claims): Extension<Claims>,
    Json(input): Json<UpdateProfileInput>,
) -> Result<Json<models::user::Model>, ApiError> {
    let updated =
        users::update_profile(&state.db, claims.uid, input.username, input.image_file).await?;
    Ok(Json(updated))
}

/// Global middleware: outside the whitelist (health, register/login,
/// docs, CORS preflight), require `Authorization: Bearer <token>` with
/// a cookie fallback, and inject the decoded claims for handlers.
pub async fn require_bearer_token(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let path = req.uri().path();
    let method = req.method().clone();

    if path == "/health"
        || path == "/auth/login"
        || path == "/auth/register"
        || path.starts_with("/docs")
        || path.starts_with("/api-docs")
        || method == axum::http::Method::OPTIONS
    {
        return Ok(next.run(req).await);
    }

    let token = {
        let authz = req
            .headers()
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok());

        if let Some(h) = authz {
            let prefix = "Bearer ";
            if !h.starts_with(prefix) {
                tracing::warn!(path = %path, "invalid Authorization format (expect Bearer)");
                return Err(StatusCode::UNAUTHORIZED);
            }
            h[prefix.len()..].to_string()
        } else {
            // Cookie fallback: browsers cannot attach headers on
            // WebSocket handshakes.
            let cookie_header = req
                .headers()
                .get(axum::http::header::COOKIE)
                .and_then(|v| v.to_str().ok())
                .unwrap_or("");

            let mut token_val: Option<String> = None;
            for part in cookie_header.split(';') {
                let kv = part.trim();
                if let Some(rest) = kv.strip_prefix("auth_token=") {
                    token_val = Some(rest.to_string());
                    break;
                }
            }

            match token_val {
                Some(t) if !t.is_empty() => t,
                _ => {
                    tracing::warn!(path = %path, "missing Authorization header and auth_token cookie");
                    return Err(StatusCode::UNAUTHORIZED);
                }
            }
        }
    };

    let key = DecodingKey::from_secret(state.auth.jwt_secret.as_bytes());
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;

    match decode::<Claims>(&token, &key, &validation) {
        Ok(data) => {
            req.extensions_mut().insert(data.claims);
            Ok(next.run(req).await)
        }
        Err(e) => {
            tracing::warn!(path = %path, err = %e, "token validation failed");
            Err(StatusCode::UNAUTHORIZED)
        }
    }
}
