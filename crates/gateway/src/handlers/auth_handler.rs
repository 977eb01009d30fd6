//! Authentication handlers.

use axum::{extract::State, http::StatusCode, response::Json, routing::post, Router};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use common::{AppError, AppResult};
use domain::Credentials;

use crate::extractors::{JsonBody, ValidatedJson};
use crate::state::AppState;

/// Registration request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[validate(length(min = 1, message = "username is required"))]
    #[schema(example = "alice")]
    pub username: String,
    #[validate(length(min = 1, message = "email is required"))]
    #[schema(example = "alice@example.com")]
    pub email: String,
    #[schema(example = "+40712345678")]
    pub phone_number: Option<String>,
    #[validate(length(min = 1, message = "password is required"))]
    #[schema(example = "S3curePass!")]
    pub password: String,
}

/// Login request. `identifier` is an email address or a username.
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    #[schema(example = "alice@example.com")]
    pub identifier: String,
    #[schema(example = "S3curePass!")]
    pub password: String,
}

/// Successful auth response
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    /// Login id, only set by registration
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Session token to send back as `Authorization: Bearer <token>`
    pub session_id: String,
}

impl From<RegisterRequest> for Credentials {
    fn from(request: RegisterRequest) -> Self {
        Self {
            username: Some(request.username),
            email: Some(request.email),
            phone_number: request.phone_number,
            password: request.password,
        }
    }
}

/// Create authentication routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

/// Register a new login and open its first session
#[utoipa::path(
    post,
    path = "/auth/register",
    tag = "Authentication",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Login created", body = AuthResponse),
        (status = 400, description = "Malformed or incomplete body"),
        (status = 500, description = "Identity service rejected or failed the registration")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RegisterRequest>,
) -> AppResult<(StatusCode, Json<AuthResponse>)> {
    let registration = state
        .auth_service
        .register(payload.into())
        .await
        .map_err(AppError::registration_failed)?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            id: Some(registration.id),
            session_id: registration.session.into_inner(),
        }),
    ))
}

/// Log in with an email address or username
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Session opened", body = AuthResponse),
        (status = 400, description = "Malformed body"),
        (status = 401, description = "Login failed")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let session = state
        .auth_service
        .login(payload.identifier, payload.password)
        .await
        .map_err(AppError::login_failed)?;

    Ok(Json(AuthResponse {
        id: None,
        session_id: session.into_inner(),
    }))
}
