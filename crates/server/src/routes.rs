use axum::{
    middleware,
    routing::{get, post, put},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::types::Health;

pub mod admin;
pub mod auth;
pub mod catalog;
pub mod complaints;
pub mod orders;
pub mod providers;
pub mod ws;

#[utoipa::path(get, path = "/health", tag = "health",
    responses((status = 200, description = "Service is up", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the full application router, including public, protected, and admin routes
pub fn build_router(cors: CorsLayer, state: auth::ServerState) -> Router {
    // Public routes
    let public = Router::new()
        .route("/health", get(health))
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout));

    // Protected routes (claims injected by the bearer middleware)
    let api = Router::new()
        .route("/auth/me", get(auth::me).put(auth::update_me))
        .route(
            "/api/categories",
            get(catalog::list_categories).post(catalog::create_category),
        )
        .route(
            "/api/services",
            get(catalog::list_services).post(catalog::create_service),
        )
        .route("/api/services/:id", get(catalog::get_service))
        .route("/api/services/:id/ratings", put(catalog::set_ratings))
        .route("/api/providers", post(providers::become_provider))
        .route("/api/providers/:id", get(providers::get_provider))
        .route("/api/providers/:id/services", get(providers::list_offerings))
        .route("/api/offerings", post(providers::link_offering))
        .route(
            "/api/offerings/:service_id",
            axum::routing::delete(providers::unlink_offering),
        )
        .route("/api/orders", get(orders::list).post(orders::place))
        .route("/api/orders/:id/status", put(orders::update_status))
        .route("/api/orders/:id/viewed", put(orders::mark_viewed))
        .route("/api/orders/:id/review", put(orders::review))
        .route(
            "/api/complaints",
            get(complaints::list_mine).post(complaints::file),
        )
        .route("/ws/notifications", get(ws::notifications));

    // Admin routes (handlers check the admin claim themselves)
    let admin_routes = Router::new()
        .route("/admin/complaints", get(admin::list_complaints))
        .route("/admin/complaints/:id/resolve", put(admin::resolve_complaint))
        .route("/admin/providers/:id/verify", put(admin::verify_provider));

    let docs =
        SwaggerUi::new("/docs").url("/api-docs/openapi.json", crate::openapi::ApiDoc::openapi());

    // Compose
    public
        .merge(api)
        .merge(admin_routes)
        .merge(docs)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_bearer_token,
        ))
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
