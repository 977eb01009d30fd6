//! GraphQL client for the identity service.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

use common::{AppError, AppResult, UpstreamClientConfig};
use domain::{IdentifierKind, LoginRecord, SessionToken};

use super::graphql::{GraphqlError, GraphqlTransport};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

const CREATE_LOGIN: &str = r#"
mutation CreateLogin($username: String!, $email: String!, $phoneNumber: String, $password: String!) {
  newLogin(username: $username, email: $email, phoneNumber: $phoneNumber, password: $password) {
    id
    username
    email { address }
    phoneNumber { number }
  }
}"#;

const LOG_IN_WITH_EMAIL: &str = r#"
mutation LogInWithEmail($email: String!, $password: String!) {
  loginSession: logInWithEmail(email: $email, password: $password) {
    sessionToken { token }
  }
}"#;

const LOG_IN_WITH_USERNAME: &str = r#"
mutation LogInWithUsername($username: String!, $password: String!) {
  loginSession: logInWithUsername(username: $username, password: $password) {
    sessionToken { token }
  }
}"#;

const VERIFY_TOKEN: &str = r#"
query VerifyToken($token: String!) {
  sessionByToken(token: $token) {
    sessionToken { token }
  }
}"#;

/// Identity to create upstream.
#[derive(Clone, PartialEq, Eq)]
pub struct NewLogin {
    pub username: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub password: String,
}

impl std::fmt::Debug for NewLogin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewLogin")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("phone_number", &self.phone_number)
            .finish_non_exhaustive()
    }
}

/// Remote operations offered by the identity service.
///
/// Each call is a single pass-through RPC with error translation.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait IdentityClient: Send + Sync {
    /// Register a new login. Upstream rejection is `AppError::Validation`.
    async fn create_login(&self, login: NewLogin) -> AppResult<LoginRecord>;

    /// Exchange a credential pair for a session token.
    /// Bad credentials are `AppError::Authentication`.
    async fn login_with_credential(
        &self,
        kind: IdentifierKind,
        identifier: String,
        password: String,
    ) -> AppResult<SessionToken>;

    /// `Ok(false)` when the service does not know the token.
    async fn verify_token(&self, token: String) -> AppResult<bool>;
}

// =============================================================================
// Wire types
// =============================================================================

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateLoginData {
    new_login: NewLoginPayload,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct NewLoginPayload {
    id: String,
    username: String,
    email: EmailPayload,
    phone_number: Option<PhoneNumberPayload>,
}

#[derive(Deserialize)]
struct EmailPayload {
    address: String,
}

#[derive(Deserialize)]
struct PhoneNumberPayload {
    number: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoginSessionData {
    login_session: SessionPayload,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct VerifyTokenData {
    session_by_token: Option<SessionPayload>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SessionPayload {
    session_token: TokenPayload,
}

#[derive(Deserialize)]
struct TokenPayload {
    token: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateLoginVariables {
    username: String,
    email: String,
    phone_number: Option<String>,
    password: String,
}

impl From<NewLoginPayload> for LoginRecord {
    fn from(payload: NewLoginPayload) -> Self {
        Self {
            id: payload.id,
            username: payload.username,
            email: payload.email.address,
            phone_number: payload.phone_number.map(|p| p.number),
        }
    }
}

// =============================================================================
// GraphQL implementation
// =============================================================================

/// `IdentityClient` backed by the identity service's GraphQL endpoint.
#[derive(Clone)]
pub struct IdentityGraphqlClient {
    transport: GraphqlTransport,
}

impl IdentityGraphqlClient {
    /// Create a client for the endpoint in `config`. No request is sent yet.
    pub fn new(config: &UpstreamClientConfig) -> Result<Self, reqwest::Error> {
        debug!("Configuring identity client for {}", config.endpoint);
        Ok(Self {
            transport: GraphqlTransport::new(config)?,
        })
    }
}

/// Everything except an explicit rejection is a transport/protocol failure.
fn upstream_error(err: GraphqlError) -> AppError {
    AppError::upstream(err.to_string())
}

#[async_trait]
impl IdentityClient for IdentityGraphqlClient {
    async fn create_login(&self, login: NewLogin) -> AppResult<LoginRecord> {
        let variables = CreateLoginVariables {
            username: login.username,
            email: login.email,
            phone_number: login.phone_number,
            password: login.password,
        };

        let data: CreateLoginData = self
            .transport
            .execute("CreateLogin", CREATE_LOGIN, variables)
            .await
            .map_err(|e| match e {
                GraphqlError::Rejected(msg) => AppError::validation(msg),
                other => upstream_error(other),
            })?;

        Ok(data.new_login.into())
    }

    async fn login_with_credential(
        &self,
        kind: IdentifierKind,
        identifier: String,
        password: String,
    ) -> AppResult<SessionToken> {
        let (operation, query, variables) = match kind {
            IdentifierKind::Email => (
                "LogInWithEmail",
                LOG_IN_WITH_EMAIL,
                json!({ "email": identifier, "password": password }),
            ),
            IdentifierKind::Username => (
                "LogInWithUsername",
                LOG_IN_WITH_USERNAME,
                json!({ "username": identifier, "password": password }),
            ),
        };

        let data: LoginSessionData = self
            .transport
            .execute(operation, query, variables)
            .await
            .map_err(|e| match e {
                GraphqlError::Rejected(msg) => AppError::authentication(msg),
                other => upstream_error(other),
            })?;

        Ok(SessionToken::new(data.login_session.session_token.token))
    }

    async fn verify_token(&self, token: String) -> AppResult<bool> {
        let result: Result<VerifyTokenData, _> = self
            .transport
            .execute("VerifyToken", VERIFY_TOKEN, json!({ "token": token }))
            .await;

        match result {
            Ok(data) => Ok(data.session_by_token.is_some()),
            // "record not found" and friends
            Err(GraphqlError::Rejected(msg)) => {
                debug!("Token rejected upstream: {}", msg);
                Ok(false)
            }
            Err(other) => Err(upstream_error(other)),
        }
    }
}
