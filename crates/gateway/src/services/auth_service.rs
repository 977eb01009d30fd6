//! Authentication service - register, login and token verification.
//!
//! Identifier classification happens here and only here, so handlers and
//! middleware never repeat the email/username heuristic.

use async_trait::async_trait;
use tracing::{debug, warn};

use common::{AppError, AppResult};
use domain::{classify, Credentials, IdentifierKind, Registration, SessionToken};

use crate::clients::{IdentityClient, NewLogin};

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Create a login upstream and open its first session.
    async fn register(&self, credentials: Credentials) -> AppResult<Registration>;

    /// Open a session for an email address or username.
    async fn login(&self, identifier: String, password: String) -> AppResult<SessionToken>;

    /// Whether the token names a live session. Never fails.
    async fn verify(&self, token: &str) -> bool;
}

/// Concrete implementation of AuthService over an identity client.
pub struct Authenticator<C: IdentityClient> {
    client: C,
}

impl<C: IdentityClient> Authenticator<C> {
    /// The service owns its client for its whole lifetime.
    pub fn new(client: C) -> Self {
        Self { client }
    }
}

fn required(value: Option<String>, field: &str) -> AppResult<String> {
    value
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::bad_request(format!("{} is required", field)))
}

impl TryFrom<Credentials> for NewLogin {
    type Error = AppError;

    fn try_from(credentials: Credentials) -> AppResult<Self> {
        Ok(Self {
            username: required(credentials.username, "username")?,
            email: required(credentials.email, "email")?,
            phone_number: credentials.phone_number.filter(|p| !p.is_empty()),
            password: credentials.password,
        })
    }
}

#[async_trait]
impl<C: IdentityClient> AuthService for Authenticator<C> {
    async fn register(&self, credentials: Credentials) -> AppResult<Registration> {
        let login = NewLogin::try_from(credentials)?;
        let email = login.email.clone();
        let password = login.password.clone();

        debug!(username = %login.username, "Creating login upstream");
        let record = self.client.create_login(login).await?;

        // No compensation: if this fails the login exists without a session.
        let session = self
            .client
            .login_with_credential(IdentifierKind::Email, email, password)
            .await?;

        Ok(Registration {
            id: record.id,
            session,
        })
    }

    async fn login(&self, identifier: String, password: String) -> AppResult<SessionToken> {
        let kind = classify(&identifier);
        debug!(%kind, "Logging in");
        self.client
            .login_with_credential(kind, identifier, password)
            .await
    }

    async fn verify(&self, token: &str) -> bool {
        match self.client.verify_token(token.to_string()).await {
            Ok(valid) => valid,
            Err(e) => {
                warn!("Token verification failed closed: {}", e);
                false
            }
        }
    }
}
