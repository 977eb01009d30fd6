//! HTTP request handlers.

pub mod auth_handler;
pub mod health_handler;
pub mod incident_handler;

pub use auth_handler::auth_routes;
pub use health_handler::health_routes;
pub use incident_handler::incident_routes;
