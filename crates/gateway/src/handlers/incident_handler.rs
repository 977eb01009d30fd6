//! Traffic incident handlers. Thin passthrough to the incident module.

use axum::{extract::State, response::Json, routing::post, Router};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use common::{AppError, AppResult};
use domain::{IncidentReport, LatLng, RouteQuery, TrafficIncident, DEFAULT_ROUTE_TOLERANCE_METERS};

use crate::extractors::JsonBody;
use crate::state::AppState;

/// Incident report request
#[derive(Debug, Deserialize, ToSchema)]
pub struct ReportIncidentRequest {
    #[serde(rename = "userID")]
    pub user_id: String,
    #[serde(rename = "locationWKT")]
    #[schema(example = "POINT(27.5766 47.1585)")]
    pub location_wkt: String,
    pub description: String,
    #[serde(rename = "incidentType")]
    #[schema(example = "accident")]
    pub incident_type: String,
}

/// Open incidents along a route
#[derive(Debug, Deserialize, ToSchema)]
pub struct RouteIncidentsRequest {
    pub route: Vec<LatLng>,
    /// Matching tolerance in metres; absent or 0 means 50
    #[serde(default)]
    pub tolerance: f64,
}

/// Incidents found along a route
#[derive(Debug, Serialize, ToSchema)]
pub struct RouteIncidentsResponse {
    pub incidents: Vec<TrafficIncident>,
    pub status: String,
}

impl From<ReportIncidentRequest> for IncidentReport {
    fn from(request: ReportIncidentRequest) -> Self {
        Self {
            user_id: request.user_id,
            location_wkt: request.location_wkt,
            description: request.description,
            incident_type: request.incident_type,
        }
    }
}

/// Create incident routes
pub fn incident_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(open_incidents_by_route))
        .route("/report", post(report_incident))
}

/// Report a traffic incident
#[utoipa::path(
    post,
    path = "/incidents/report",
    tag = "Incidents",
    security(("bearer_auth" = [])),
    request_body = ReportIncidentRequest,
    responses(
        (status = 200, description = "Incident recorded", body = TrafficIncident),
        (status = 400, description = "Malformed body"),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Incident module failure")
    )
)]
pub async fn report_incident(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<ReportIncidentRequest>,
) -> AppResult<Json<TrafficIncident>> {
    let incident = state
        .incident_client
        .report_traffic_incident(payload.into())
        .await
        .map_err(|e| AppError::upstream(format!("error reporting incident: {}", e)))?;

    Ok(Json(incident))
}

/// List open incidents along a route
#[utoipa::path(
    post,
    path = "/incidents",
    tag = "Incidents",
    security(("bearer_auth" = [])),
    request_body = RouteIncidentsRequest,
    responses(
        (status = 200, description = "Open incidents", body = RouteIncidentsResponse),
        (status = 400, description = "Malformed body or empty route"),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Incident module failure")
    )
)]
pub async fn open_incidents_by_route(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<RouteIncidentsRequest>,
) -> AppResult<Json<RouteIncidentsResponse>> {
    if payload.route.is_empty() {
        return Err(AppError::bad_request("route array is empty"));
    }

    let tolerance_meters = if payload.tolerance == 0.0 {
        DEFAULT_ROUTE_TOLERANCE_METERS
    } else {
        payload.tolerance
    };

    let incidents = state
        .incident_client
        .open_incidents_by_route(RouteQuery {
            route: payload.route,
            tolerance_meters,
        })
        .await
        .map_err(|e| AppError::upstream(format!("error fetching incidents: {}", e)))?;

    Ok(Json(RouteIncidentsResponse {
        incidents,
        status: "OK".to_string(),
    }))
}
