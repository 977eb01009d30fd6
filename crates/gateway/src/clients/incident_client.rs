//! HTTP client for the incident module.

use async_trait::async_trait;
use reqwest::Client;
use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

use common::{AppError, AppResult, UpstreamClientConfig};
use domain::{IncidentReport, RouteQuery, TrafficIncident};

/// Operations offered by the incident module. The gateway forwards
/// arguments unchanged; matching and persistence happen upstream.
#[async_trait]
pub trait IncidentClient: Send + Sync {
    async fn report_traffic_incident(&self, report: IncidentReport) -> AppResult<TrafficIncident>;

    async fn open_incidents_by_route(&self, query: RouteQuery) -> AppResult<Vec<TrafficIncident>>;
}

/// `IncidentClient` speaking JSON over HTTP.
#[derive(Clone)]
pub struct IncidentHttpClient {
    http: Client,
    base_url: String,
}

impl IncidentHttpClient {
    pub fn new(config: &UpstreamClientConfig) -> Result<Self, reqwest::Error> {
        debug!("Configuring incident client for {}", config.endpoint);
        let http = Client::builder()
            .connect_timeout(config.connect_timeout())
            .timeout(config.request_timeout())
            .build()?;
        Ok(Self {
            http,
            base_url: config.endpoint.trim_end_matches('/').to_string(),
        })
    }

    async fn post<B, T>(&self, path: &str, body: &B) -> AppResult<T>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        debug!("POST {}", url);

        let response = self
            .http
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| AppError::upstream(format!("request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::upstream(format!("{}: {}", status, text)));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| AppError::upstream(format!("parse failed: {}", e)))
    }
}

#[async_trait]
impl IncidentClient for IncidentHttpClient {
    async fn report_traffic_incident(&self, report: IncidentReport) -> AppResult<TrafficIncident> {
        self.post("/incidents", &report).await
    }

    async fn open_incidents_by_route(&self, query: RouteQuery) -> AppResult<Vec<TrafficIncident>> {
        self.post("/incidents/open/by-route", &query).await
    }
}
