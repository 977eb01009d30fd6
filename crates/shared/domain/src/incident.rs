//! Traffic incident types passed through to the incident module.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A point on a route.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

/// Incident report forwarded to the incident module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncidentReport {
    pub user_id: String,
    /// Location as Well-Known Text, e.g. `POINT(27.58 47.16)`
    pub location_wkt: String,
    pub description: String,
    pub incident_type: String,
}

/// Query for open incidents along a route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteQuery {
    pub route: Vec<LatLng>,
    pub tolerance_meters: f64,
}

/// Incident as returned by the incident module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct TrafficIncident {
    pub id: Uuid,
    pub user_id: String,
    pub location_wkt: String,
    pub description: String,
    pub incident_type: String,
    pub status: String,
    pub reported_at: DateTime<Utc>,
}
