use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde::Deserialize;

use crate::errors::ApiError;
use crate::routes::auth::ServerState;
use service::auth::domain::Claims;
use service::complaints;
use service::pagination::Pagination;

#[derive(Deserialize)]
pub struct FileComplaintInput {
    pub order_id: i32,
    pub message: String,
}

#[derive(Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub per_page: Option<u32>,
}

pub(crate) fn page_from(q: &ListQuery) -> Pagination {
    let d = Pagination::default();
    Pagination { page: q.page.unwrap_or(d.page), per_page: q.per_page.unwrap_or(d.per_page) }
}

#[utoipa::path(post, path = "/api/complaints", tag = "complaints",
    responses((status = 200, description = "Complaint filed"), (status = 404, description = "Order not found")))]
pub async fn file(
    State(state): State<ServerState>,
    Extension(claims): Extension<Claims>,
    Json(input): Json<FileComplaintInput>,
) -> Result<Json<models::complaint::Model>, ApiError> {
    let created =
        complaints::file_complaint(&state.db, claims.uid, input.order_id, &input.message).await?;
    Ok(Json(created))
}

#[utoipa::path(get, path = "/api/complaints", tag = "complaints",
    responses((status = 200, description = "Complaints filed by the current user")))]
pub async fn list_mine(
    State(state): State<ServerState>,
    Extension(claims): Extension<Claims>,
    Query(q): Query<ListQuery>,
) -> Result<Json<Vec<models::complaint::Model>>, ApiError> {
    let rows = complaints::list_for_user(&state.db, claims.uid, page_from(&q)).await?;
    Ok(Json(rows))
}
