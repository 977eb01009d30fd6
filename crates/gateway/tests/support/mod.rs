//! Test doubles and request helpers shared by the router tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, Response},
    Router,
};
use chrono::Utc;
use uuid::Uuid;

use common::{AppError, AppResult};
use domain::{IdentifierKind, IncidentReport, LoginRecord, RouteQuery, SessionToken, TrafficIncident};
use gateway_lib::clients::{IdentityClient, IncidentClient, NewLogin};
use gateway_lib::routes::create_router;
use gateway_lib::services::Authenticator;
use gateway_lib::state::AppState;

// =============================================================================
// Identity service double
// =============================================================================

/// Every RPC the gateway sent upstream, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    CreateLogin(String),
    Login(IdentifierKind, String, String),
    Verify(String),
}

struct Account {
    id: String,
    username: String,
    email: String,
    password: String,
}

#[derive(Default)]
struct IdentityInner {
    accounts: Mutex<Vec<Account>>,
    live_tokens: Mutex<Vec<String>>,
    calls: Mutex<Vec<Call>>,
    verify_transport_down: Mutex<bool>,
}

/// In-memory identity service. Clones share state.
#[derive(Clone, Default)]
pub struct FakeIdentityClient {
    inner: Arc<IdentityInner>,
}

impl FakeIdentityClient {
    pub fn with_account(self, username: &str, email: &str, password: &str) -> Self {
        {
            let mut accounts = self.inner.accounts.lock().unwrap();
            let id = format!("login-{}", accounts.len() + 1);
            accounts.push(Account {
                id,
                username: username.to_string(),
                email: email.to_string(),
                password: password.to_string(),
            });
        }
        self
    }

    pub fn with_live_token(self, token: &str) -> Self {
        self.inner.live_tokens.lock().unwrap().push(token.to_string());
        self
    }

    pub fn with_verify_transport_down(self) -> Self {
        *self.inner.verify_transport_down.lock().unwrap() = true;
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.inner.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.inner.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl IdentityClient for FakeIdentityClient {
    async fn create_login(&self, login: NewLogin) -> AppResult<LoginRecord> {
        self.record(Call::CreateLogin(login.email.clone()));

        let mut accounts = self.inner.accounts.lock().unwrap();
        if accounts.iter().any(|a| a.email == login.email) {
            return Err(AppError::validation("email already registered"));
        }

        let id = format!("login-{}", accounts.len() + 1);
        accounts.push(Account {
            id: id.clone(),
            username: login.username.clone(),
            email: login.email.clone(),
            password: login.password,
        });

        Ok(LoginRecord {
            id,
            username: login.username,
            email: login.email,
            phone_number: login.phone_number,
        })
    }

    async fn login_with_credential(
        &self,
        kind: IdentifierKind,
        identifier: String,
        password: String,
    ) -> AppResult<SessionToken> {
        self.record(Call::Login(kind, identifier.clone(), password.clone()));

        let accounts = self.inner.accounts.lock().unwrap();
        let account = accounts.iter().find(|a| match kind {
            IdentifierKind::Email => a.email == identifier,
            IdentifierKind::Username => a.username == identifier,
        });

        match account {
            Some(account) if account.password == password => {
                let mut tokens = self.inner.live_tokens.lock().unwrap();
                let token = format!("session-{}-{}", account.id, tokens.len() + 1);
                tokens.push(token.clone());
                Ok(SessionToken::new(token))
            }
            _ => Err(AppError::authentication("invalid credentials")),
        }
    }

    async fn verify_token(&self, token: String) -> AppResult<bool> {
        self.record(Call::Verify(token.clone()));

        if *self.inner.verify_transport_down.lock().unwrap() {
            return Err(AppError::upstream("connection refused"));
        }
        Ok(self.inner.live_tokens.lock().unwrap().contains(&token))
    }
}

// =============================================================================
// Incident module double
// =============================================================================

#[derive(Default)]
struct IncidentInner {
    reports: Mutex<Vec<IncidentReport>>,
    route_queries: Mutex<Vec<RouteQuery>>,
    failing: Mutex<bool>,
}

/// Counts calls; returns one canned incident.
#[derive(Clone, Default)]
pub struct FakeIncidentClient {
    inner: Arc<IncidentInner>,
}

impl FakeIncidentClient {
    pub fn failing(self) -> Self {
        *self.inner.failing.lock().unwrap() = true;
        self
    }

    pub fn call_count(&self) -> usize {
        self.inner.reports.lock().unwrap().len() + self.inner.route_queries.lock().unwrap().len()
    }

    pub fn route_queries(&self) -> Vec<RouteQuery> {
        self.inner.route_queries.lock().unwrap().clone()
    }

    pub fn reports(&self) -> Vec<IncidentReport> {
        self.inner.reports.lock().unwrap().clone()
    }

    fn check(&self) -> AppResult<()> {
        if *self.inner.failing.lock().unwrap() {
            Err(AppError::upstream("incident store offline"))
        } else {
            Ok(())
        }
    }
}

pub fn sample_incident(report: &IncidentReport) -> TrafficIncident {
    TrafficIncident {
        id: Uuid::new_v4(),
        user_id: report.user_id.clone(),
        location_wkt: report.location_wkt.clone(),
        description: report.description.clone(),
        incident_type: report.incident_type.clone(),
        status: "open".to_string(),
        reported_at: Utc::now(),
    }
}

#[async_trait]
impl IncidentClient for FakeIncidentClient {
    async fn report_traffic_incident(&self, report: IncidentReport) -> AppResult<TrafficIncident> {
        self.inner.reports.lock().unwrap().push(report.clone());
        self.check()?;
        Ok(sample_incident(&report))
    }

    async fn open_incidents_by_route(&self, query: RouteQuery) -> AppResult<Vec<TrafficIncident>> {
        self.inner.route_queries.lock().unwrap().push(query);
        self.check()?;
        Ok(vec![sample_incident(&IncidentReport {
            user_id: "user-1".to_string(),
            location_wkt: "POINT(27.5766 47.1585)".to_string(),
            description: "lane closed".to_string(),
            incident_type: "roadwork".to_string(),
        })])
    }
}

// =============================================================================
// Helpers
// =============================================================================

pub fn app(identity: FakeIdentityClient, incidents: FakeIncidentClient) -> Router {
    let state = AppState::new(
        Arc::new(Authenticator::new(identity)),
        Arc::new(incidents),
    );
    create_router(state)
}

pub fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn post_json_with_auth(uri: &str, authorization: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .header("authorization", authorization)
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn body_string(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_str(&body_string(response).await).unwrap()
}
