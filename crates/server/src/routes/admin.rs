use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use serde::Deserialize;

use crate::errors::ApiError;
use crate::routes::auth::ServerState;
use crate::routes::complaints::{page_from, ListQuery};
use service::auth::domain::Claims;
use service::{complaints, users};

fn require_admin(claims: &Claims) -> Result<(), ApiError> {
    if claims.adm {
        Ok(())
    } else {
        Err(ApiError::Forbidden("admin privileges required".into()))
    }
}

#[derive(Deserialize)]
pub struct ResolveInput {
    #[serde(default)]
    pub action_taken: Option<String>,
}

#[utoipa::path(get, path = "/admin/complaints", tag = "admin",
    responses((status = 200, description = "All complaints"), (status = 403, description = "Not an admin")))]
pub async fn list_complaints(
    State(state): State<ServerState>,
    Extension(claims): Extension<Claims>,
    Query(q): Query<ListQuery>,
) -> Result<Json<Vec<models::complaint::Model>>, ApiError> {
    require_admin(&claims)?;
    let rows = complaints::list_all(&state.db, page_from(&q)).await?;
    Ok(Json(rows))
}

#[utoipa::path(put, path = "/admin/complaints/{id}/resolve", tag = "admin",
    responses((status = 200, description = "Complaint resolved"), (status = 403, description = "Not an admin")))]
pub async fn resolve_complaint(
    State(state): State<ServerState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<i32>,
    Json(input): Json<ResolveInput>,
) -> Result<Json<models::complaint::Model>, ApiError> {
    require_admin(&claims)?;
    let resolved = complaints::resolve_complaint(&state.db, id, input.action_taken).await?;
    Ok(Json(resolved))
}

#[utoipa::path(put, path = "/admin/providers/{id}/verify", tag = "admin",
    responses((status = 200, description = "Provider verified"), (status = 403, description = "Not an admin")))]
pub async fn verify_provider(
    State(state): State<ServerState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<i32>,
) -> Result<Json<models::service_provider::Model>, ApiError> {
    require_admin(&claims)?;
    let verified = users::verify_provider(&state.db, id).await?;
    Ok(Json(verified))
}
