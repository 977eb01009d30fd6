//! Clients for the upstream identity and incident services.

mod graphql;
mod identity_client;
mod incident_client;

pub use graphql::{GraphqlError, GraphqlTransport};
pub use identity_client::{IdentityClient, IdentityGraphqlClient, NewLogin};
pub use incident_client::{IncidentClient, IncidentHttpClient};

#[cfg(any(test, feature = "test-utils"))]
pub use identity_client::MockIdentityClient;
