use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use serde::Deserialize;

use crate::errors::ApiError;
use crate::routes::auth::ServerState;
use service::auth::domain::Claims;
use service::orders;
use service::pagination::Pagination;
use models::order::{self, OrderStatus};

#[derive(Deserialize)]
pub struct PlaceOrderInput {
    pub service_id: i32,
    pub location: String,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

#[derive(Deserialize)]
pub struct UpdateStatusInput {
    pub status: OrderStatus,
}

#[derive(Deserialize)]
pub struct ReviewInput {
    #[serde(default)]
    pub rate: Option<i32>,
    #[serde(default)]
    pub review: Option<String>,
}

#[derive(Deserialize)]
pub struct ListOrdersQuery {
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub per_page: Option<u32>,
    /// "customer" (default) or "provider"
    #[serde(default)]
    pub role: Option<String>,
}

async fn owned_order(
    state: &ServerState,
    claims: &Claims,
    order_id: i32,
) -> Result<order::Model, ApiError> {
    let o = orders::get_order(&state.db, order_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("order not found".into()))?;
    if o.customer_id != claims.uid && o.provider_id != claims.uid && !claims.adm {
        return Err(ApiError::Forbidden("not a party to this order".into()));
    }
    Ok(o)
}

#[utoipa::path(post, path = "/api/orders", tag = "orders",
    responses((status = 200, description = "Order placed (status pending, not viewed)"), (status = 404, description = "Service not found")))]
pub async fn place(
    State(state): State<ServerState>,
    Extension(claims): Extension<Claims>,
    Json(input): Json<PlaceOrderInput>,
) -> Result<Json<order::Model>, ApiError> {
    let created = orders::place_order(
        &state.db,
        &state.hub,
        claims.uid,
        input.service_id,
        &input.location,
        input.latitude,
        input.longitude,
    )
    .await?;
    Ok(Json(created))
}

#[utoipa::path(get, path = "/api/orders", tag = "orders",
    responses((status = 200, description = "Orders for the current user")))]
pub async fn list(
    State(state): State<ServerState>,
    Extension(claims): Extension<Claims>,
    Query(q): Query<ListOrdersQuery>,
) -> Result<Json<Vec<order::Model>>, ApiError> {
    let d = Pagination::default();
    let page = Pagination {
        page: q.page.unwrap_or(d.page),
        per_page: q.per_page.unwrap_or(d.per_page),
    };
    let rows = match q.role.as_deref() {
        Some("provider") => orders::list_for_provider(&state.db, claims.uid, page).await?,
        _ => orders::list_for_customer(&state.db, claims.uid, page).await?,
    };
    Ok(Json(rows))
}

#[utoipa::path(put, path = "/api/orders/{id}/status", tag = "orders",
    responses((status = 200, description = "Status updated"), (status = 403, description = "Not a party to the order")))]
pub async fn update_status(
    State(state): State<ServerState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<i32>,
    Json(input): Json<UpdateStatusInput>,
) -> Result<Json<order::Model>, ApiError> {
    owned_order(&state, &claims, id).await?;
    let updated = orders::update_status(&state.db, &state.hub, id, input.status).await?;
    Ok(Json(updated))
}

pub async fn mark_viewed(
    State(state): State<ServerState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<i32>,
) -> Result<Json<order::Model>, ApiError> {
    owned_order(&state, &claims, id).await?;
    let updated = orders::mark_viewed(&state.db, id).await?;
    Ok(Json(updated))
}

/// Only the ordering customer may leave the review.
pub async fn review(
    State(state): State<ServerState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<i32>,
    Json(input): Json<ReviewInput>,
) -> Result<Json<order::Model>, ApiError> {
    let o = owned_order(&state, &claims, id).await?;
    if o.customer_id != claims.uid {
        return Err(ApiError::Forbidden("only the customer can review".into()));
    }
    let updated = orders::review_order(&state.db, id, input.rate, input.review).await?;
    Ok(Json(updated))
}
