//! Minimal GraphQL-over-HTTP transport.

use reqwest::{Client, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use common::UpstreamClientConfig;

/// Failures of a single GraphQL round trip.
#[derive(Error, Debug)]
pub enum GraphqlError {
    #[error("upstream request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("upstream returned HTTP {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("invalid upstream response: {0}")]
    Decode(String),

    /// The service answered with a non-empty `errors` array
    #[error("{0}")]
    Rejected(String),

    #[error("upstream response for {0} carried no data")]
    MissingData(&'static str),
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GraphqlRequest<'a, V> {
    query: &'a str,
    operation_name: &'a str,
    variables: V,
}

#[derive(Deserialize)]
struct GraphqlResponse<D> {
    data: Option<D>,
    // Servers may send `"errors": null` alongside data
    errors: Option<Vec<GraphqlErrorMessage>>,
}

#[derive(Deserialize)]
struct GraphqlErrorMessage {
    message: String,
}

/// HTTP transport bound to one GraphQL endpoint.
#[derive(Clone)]
pub struct GraphqlTransport {
    http: Client,
    endpoint: String,
}

impl GraphqlTransport {
    /// Build a transport with the configured timeouts.
    pub fn new(config: &UpstreamClientConfig) -> Result<Self, reqwest::Error> {
        let http = Client::builder()
            .connect_timeout(config.connect_timeout())
            .timeout(config.request_timeout())
            .build()?;
        Ok(Self {
            http,
            endpoint: config.endpoint.clone(),
        })
    }

    /// Execute one operation. Issues exactly one POST, no retries.
    pub async fn execute<V, D>(
        &self,
        operation_name: &'static str,
        query: &str,
        variables: V,
    ) -> Result<D, GraphqlError>
    where
        V: Serialize,
        D: DeserializeOwned,
    {
        debug!(operation = operation_name, "Sending GraphQL operation");

        let response = self
            .http
            .post(&self.endpoint)
            .json(&GraphqlRequest {
                query,
                operation_name,
                variables,
            })
            .send()
            .await?;

        let status = response.status();
        let bytes = response.bytes().await?;

        // GraphQL servers commonly pair errors with 4xx; prefer the error list when present.
        match serde_json::from_slice::<GraphqlResponse<D>>(&bytes) {
            Ok(body) => decode_body(operation_name, body),
            Err(_) if !status.is_success() => Err(GraphqlError::Status {
                status,
                body: String::from_utf8_lossy(&bytes).into_owned(),
            }),
            Err(e) => Err(GraphqlError::Decode(e.to_string())),
        }
    }
}

fn decode_body<D>(operation_name: &'static str, body: GraphqlResponse<D>) -> Result<D, GraphqlError> {
    let errors = body.errors.unwrap_or_default();
    if !errors.is_empty() {
        let message = errors
            .into_iter()
            .map(|e| e.message)
            .collect::<Vec<_>>()
            .join("; ");
        return Err(GraphqlError::Rejected(message));
    }

    body.data.ok_or(GraphqlError::MissingData(operation_name))
}
