//! OpenAPI documentation.

use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};

use crate::handlers::auth_handler::{AuthResponse, LoginRequest, RegisterRequest};
use crate::handlers::incident_handler::{
    ReportIncidentRequest, RouteIncidentsRequest, RouteIncidentsResponse,
};
use domain::{LatLng, TrafficIncident};

/// API documentation struct.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::auth_handler::register,
        crate::handlers::auth_handler::login,
        crate::handlers::incident_handler::report_incident,
        crate::handlers::incident_handler::open_incidents_by_route,
    ),
    components(
        schemas(
            RegisterRequest,
            LoginRequest,
            AuthResponse,
            ReportIncidentRequest,
            RouteIncidentsRequest,
            RouteIncidentsResponse,
            LatLng,
            TrafficIncident,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Registration and login"),
        (name = "Incidents", description = "Traffic incident reporting and lookup"),
    )
)]
pub struct ApiDoc;

/// Security scheme modifier.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("opaque session token")
                        .build(),
                ),
            );
        }
    }
}
