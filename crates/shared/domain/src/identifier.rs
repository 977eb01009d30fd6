//! Login identifier classification.
//!
//! A login identifier is either an email address or a username. The check is
//! purely syntactic; the identity service decides whether the account exists.

use once_cell::sync::Lazy;
use regex::Regex;

/// `local@domain.tld` with no whitespace and exactly one `@`.
static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern is a valid regex")
});

/// Which credential lookup the identity service should use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentifierKind {
    Email,
    Username,
}

impl std::fmt::Display for IdentifierKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IdentifierKind::Email => write!(f, "email"),
            IdentifierKind::Username => write!(f, "username"),
        }
    }
}

/// Classify a login identifier. Total: anything that is not an email,
/// including the empty string, is a username.
pub fn classify(identifier: &str) -> IdentifierKind {
    if EMAIL_PATTERN.is_match(identifier) {
        IdentifierKind::Email
    } else {
        IdentifierKind::Username
    }
}
