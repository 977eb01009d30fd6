//! Application state for dependency injection.

use std::sync::Arc;

use crate::clients::{IdentityGraphqlClient, IncidentClient, IncidentHttpClient};
use crate::config::GatewayConfig;
use crate::services::{AuthService, Authenticator};

/// Application state shared across handlers. Only immutable handles.
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<dyn AuthService>,
    pub incident_client: Arc<dyn IncidentClient>,
}

impl AppState {
    /// Create new app state from already-built services.
    pub fn new(auth_service: Arc<dyn AuthService>, incident_client: Arc<dyn IncidentClient>) -> Self {
        Self {
            auth_service,
            incident_client,
        }
    }

    /// Build the upstream clients and services from configuration.
    pub fn from_config(config: &GatewayConfig) -> Result<Self, reqwest::Error> {
        let identity_client = IdentityGraphqlClient::new(&config.identity)?;
        let incident_client = IncidentHttpClient::new(&config.incidents)?;

        Ok(Self::new(
            Arc::new(Authenticator::new(identity_client)),
            Arc::new(incident_client),
        ))
    }
}
