//! Application services - use cases orchestrating the upstream clients.

mod auth_service;

pub use auth_service::{AuthService, Authenticator};
