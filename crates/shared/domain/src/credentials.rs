//! Credentials, session tokens and registration results.

use serde::{Deserialize, Serialize};

/// Credentials submitted by a caller.
///
/// The password is forwarded to the identity service and never stored or
/// logged by the gateway, so `Debug` redacts it.
#[derive(Clone, Default)]
pub struct Credentials {
    pub username: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("phone_number", &self.phone_number)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Opaque session token minted by the identity service.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SessionToken([REDACTED])")
    }
}

/// Login record created upstream by a registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginRecord {
    pub id: String,
    pub username: String,
    pub email: String,
    pub phone_number: Option<String>,
}

/// Result of a successful registration: the new login and its first session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub id: String,
    pub session: SessionToken,
}
