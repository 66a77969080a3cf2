use axum::middleware;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::state::AppState;
use crate::{api, logging};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "MoneyPal API",
        description = "Budget alert and savings-goal reminder service",
    ),
    tags(
        (name = "Health", description = "Service health"),
        (name = "Reminders", description = "Manual triggers for the daily alert passes"),
        (name = "Notifications", description = "Notification ledger")
    )
)]
struct ApiDoc;

pub fn build_http_app(state: AppState) -> Router {
    let (public_router, public_spec) = api::public_routes().split_for_parts();
    let (admin_router, admin_spec) = api::admin_routes().split_for_parts();

    let mut spec = ApiDoc::openapi();
    spec.merge(public_spec);
    spec.merge(admin_spec);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    public_router
        .merge(admin_router)
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/v1/openapi.json", spec))
        .layer(cors)
        .layer(middleware::from_fn(logging::request_logging))
}
