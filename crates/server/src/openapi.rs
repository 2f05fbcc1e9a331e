use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(utoipa::ToSchema)]
pub struct RegisterRequest { pub username: String, pub email: String, pub password: String }

#[derive(utoipa::ToSchema)]
pub struct LoginRequest { pub email: String, pub password: String }

#[derive(utoipa::ToSchema)]
pub struct CreateServiceDoc {
    pub title: String,
    pub description: String,
    pub duration: i32,
    pub price: f64,
    pub category_id: i32,
}

#[derive(utoipa::ToSchema)]
pub struct PlaceOrderDoc {
    pub service_id: i32,
    pub location: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::auth::register,
        crate::routes::auth::login,
        crate::routes::auth::me,
        crate::routes::catalog::list_categories,
        crate::routes::catalog::list_services,
        crate::routes::catalog::create_service,
        crate::routes::catalog::set_ratings,
        crate::routes::providers::become_provider,
        crate::routes::orders::place,
        crate::routes::orders::list,
        crate::routes::orders::update_status,
        crate::routes::complaints::file,
        crate::routes::complaints::list_mine,
        crate::routes::admin::list_complaints,
        crate::routes::admin::resolve_complaint,
        crate::routes::admin::verify_provider,
    ),
    components(
        schemas(
            HealthResponse,
            RegisterRequest,
            LoginRequest,
            CreateServiceDoc,
            PlaceOrderDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "auth"),
        (name = "catalog"),
        (name = "providers"),
        (name = "orders"),
        (name = "complaints"),
        (name = "admin")
    )
)]
pub struct ApiDoc;
