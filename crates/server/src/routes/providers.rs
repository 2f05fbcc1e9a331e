use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde::Deserialize;

use crate::errors::ApiError;
use crate::routes::auth::ServerState;
use service::auth::domain::Claims;
use service::{offerings, users};

#[derive(Deserialize)]
pub struct BecomeProviderInput {
    pub nid: String,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

#[derive(Deserialize)]
pub struct LinkOfferingInput {
    pub service_id: i32,
}

#[utoipa::path(post, path = "/api/providers", tag = "providers",
    responses((status = 200, description = "Provider profile created"), (status = 400, description = "Already a provider")))]
pub async fn become_provider(
    State(state): State<ServerState>,
    Extension(claims): Extension<Claims>,
    Json(input): Json<BecomeProviderInput>,
) -> Result<Json<models::service_provider::Model>, ApiError> {
    let created = users::become_provider(
        &state.db,
        claims.uid,
        &input.nid,
        input.bio,
        input.latitude,
        input.longitude,
    )
    .await?;
    Ok(Json(created))
}

pub async fn get_provider(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
) -> Result<Json<models::service_provider::Model>, ApiError> {
    let p = users::get_provider(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("service provider not found".into()))?;
    Ok(Json(p))
}

pub async fn list_offerings(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
) -> Result<Json<Vec<models::service::Model>>, ApiError> {
    let services = offerings::list_provider_offerings(&state.db, id).await?;
    Ok(Json(services))
}

/// Link the authenticated provider to an existing service listing.
pub async fn link_offering(
    State(state): State<ServerState>,
    Extension(claims): Extension<Claims>,
    Json(input): Json<LinkOfferingInput>,
) -> Result<Json<models::provider_service::Model>, ApiError> {
    let linked = offerings::link_offering(&state.db, input.service_id, claims.uid).await?;
    Ok(Json(linked))
}

pub async fn unlink_offering(
    State(state): State<ServerState>,
    Extension(claims): Extension<Claims>,
    Path(service_id): Path<i32>,
) -> Result<axum::http::StatusCode, ApiError> {
    offerings::unlink_offering(&state.db, service_id, claims.uid).await?;
    Ok(axum::http::StatusCode::NO_CONTENT)
}
