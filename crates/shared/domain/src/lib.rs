//! Domain layer - Identity and incident types handled by the gateway.
//!
//! This crate contains pure domain logic with no infrastructure dependencies.
//! Nothing here is persisted: every value lives for a single request.

pub mod constants;
pub mod credentials;
pub mod identifier;
pub mod incident;

pub use constants::*;
pub use credentials::{Credentials, LoginRecord, Registration, SessionToken};
pub use identifier::{classify, IdentifierKind};
pub use incident::{IncidentReport, LatLng, RouteQuery, TrafficIncident};
