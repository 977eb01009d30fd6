//! Domain-level constants.

// =============================================================================
// Authentication
// =============================================================================

/// Authorization header scheme for session tokens
pub const BEARER_SCHEME: &str = "Bearer";

/// Plain-text body returned when the bearer gate rejects a request
pub const UNAUTHORIZED_BODY: &str = "Unauthorized";

// =============================================================================
// Incidents
// =============================================================================

/// Route matching tolerance used when the caller omits one (metres)
pub const DEFAULT_ROUTE_TOLERANCE_METERS: f64 = 50.0;
