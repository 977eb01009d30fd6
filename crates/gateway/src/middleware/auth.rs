//! Authentication middleware.
//!
//! Missing header, malformed header and unknown token all end the same way:
//! 401 `Unauthorized` in plain text, and the wrapped handler never runs.

use axum::{
    body::Body,
    extract::State,
    http::{header::AUTHORIZATION, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::debug;

use domain::{BEARER_SCHEME, UNAUTHORIZED_BODY};

use crate::state::AppState;

/// Gate the wrapped routes on a session token the identity service accepts.
pub async fn auth_middleware(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(bearer_token)
        .map(str::to_owned);

    let Some(token) = token else {
        debug!("Rejecting request without a usable bearer token");
        return unauthorized();
    };

    if !state.auth_service.verify(&token).await {
        debug!("Rejecting request with unverified token");
        return unauthorized();
    }

    next.run(request).await
}

/// Extract the token from `Bearer <token>`: the scheme, whitespace, then one
/// whitespace-free token running to the end of the header.
pub fn bearer_token(header: &str) -> Option<&str> {
    let rest = header.strip_prefix(BEARER_SCHEME)?;
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }

    let token = rest.trim_start();
    if token.is_empty() || token.contains(char::is_whitespace) {
        return None;
    }

    Some(token)
}

fn unauthorized() -> Response {
    (StatusCode::UNAUTHORIZED, UNAUTHORIZED_BODY).into_response()
}
