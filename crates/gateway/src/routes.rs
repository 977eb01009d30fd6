//! Route configuration.

use axum::{middleware, Router};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::handlers::{auth_routes, health_routes, incident_routes};
use crate::middleware::auth_middleware;
use crate::openapi::ApiDoc;
use crate::state::AppState;

/// Create the main router with all routes.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check (no auth)
        .nest("/health", health_routes())
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Auth routes (public)
        .nest("/auth", auth_routes())
        // Incident routes (bearer token required)
        .nest(
            "/incidents",
            incident_routes().route_layer(middleware::from_fn_with_state(
                state.clone(),
                auth_middleware,
            )),
        )
        .with_state(state)
}
