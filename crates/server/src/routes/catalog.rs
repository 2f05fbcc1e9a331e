use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use serde::Deserialize;

use crate::errors::ApiError;
use crate::routes::auth::ServerState;
use service::auth::domain::Claims;
use service::catalog;
use service::pagination::Pagination;

#[derive(Deserialize)]
pub struct CreateCategoryInput {
    pub name: String,
}

#[derive(Deserialize)]
pub struct CreateServiceInput {
    pub title: String,
    pub description: String,
    pub duration: i32,
    pub price: f64,
    pub category_id: i32,
}

#[derive(Deserialize)]
pub struct SetRatingsInput {
    pub ratings: i32,
}

#[derive(Deserialize)]
pub struct ListServicesQuery {
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub per_page: Option<u32>,
    #[serde(default)]
    pub category_id: Option<i32>,
}

fn page_from(page: Option<u32>, per_page: Option<u32>) -> Pagination {
    let d = Pagination::default();
    Pagination { page: page.unwrap_or(d.page), per_page: per_page.unwrap_or(d.per_page) }
}

#[utoipa::path(get, path = "/api/categories", tag = "catalog",
    responses((status = 200, description = "All categories")))]
pub async fn list_categories(
    State(state): State<ServerState>,
) -> Result<Json<Vec<models::category::Model>>, ApiError> {
    let cats = catalog::list_categories(&state.db).await?;
    Ok(Json(cats))
}

pub async fn create_category(
    State(state): State<ServerState>,
    Json(input): Json<CreateCategoryInput>,
) -> Result<Json<models::category::Model>, ApiError> {
    let created = catalog::create_category(&state.db, &input.name).await?;
    Ok(Json(created))
}

#[utoipa::path(get, path = "/api/services", tag = "catalog",
    responses((status = 200, description = "Service listings, newest first")))]
pub async fn list_services(
    State(state): State<ServerState>,
    Query(q): Query<ListServicesQuery>,
) -> Result<Json<Vec<models::service::Model>>, ApiError> {
    let page = page_from(q.page, q.per_page);
    let services = catalog::list_services(&state.db, q.category_id, page).await?;
    Ok(Json(services))
}

pub async fn get_service(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
) -> Result<Json<models::service::Model>, ApiError> {
    let svc = catalog::get_service(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("service not found".into()))?;
    Ok(Json(svc))
}

#[utoipa::path(post, path = "/api/services", tag = "catalog",
    responses((status = 200, description = "Service posted"), (status = 400, description = "Bad Request")))]
pub async fn create_service(
    State(state): State<ServerState>,
    Extension(claims): Extension<Claims>,
    Json(input): Json<CreateServiceInput>,
) -> Result<Json<models::service::Model>, ApiError> {
    let created = catalog::create_service(
        &state.db,
        claims.uid,
        &input.title,
        &input.description,
        input.duration,
        input.price,
        input.category_id,
    )
    .await?;
    Ok(Json(created))
}

#[utoipa::path(put, path = "/api/services/{id}/ratings", tag = "catalog",
    responses((status = 200, description = "Ratings updated"), (status = 400, description = "Out of range")))]
pub async fn set_ratings(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
    Json(input): Json<SetRatingsInput>,
) -> Result<Json<models::service::Model>, ApiError> {
    let updated = catalog::set_ratings(&state.db, id, input.ratings).await?;
    Ok(Json(updated))
}
