//! JSON body extractors.
//!
//! Bodies are decoded regardless of `Content-Type`; any decode failure is a
//! 400 carrying the decoder's message.

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;
use validator::Validate;

use common::AppError;

/// JSON extractor without field validation.
pub struct JsonBody<T>(pub T);

/// JSON extractor that also runs `validator` rules on the payload.
pub struct ValidatedJson<T>(pub T);

async fn decode<S, T>(req: Request, state: &S) -> Result<T, AppError>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    let bytes = Bytes::from_request(req, state)
        .await
        .map_err(|e| AppError::bad_request(e.body_text()))?;

    serde_json::from_slice(&bytes).map_err(|e| AppError::bad_request(e.to_string()))
}

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        Ok(JsonBody(decode(req, state).await?))
    }
}

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let value: T = decode(req, state).await?;

        value.validate().map_err(|e| {
            // Get first validation error message
            let message = e
                .field_errors()
                .values()
                .next()
                .and_then(|errors| errors.first())
                .and_then(|error| error.message.as_ref())
                .map(|msg| msg.to_string())
                .unwrap_or_else(|| "Validation failed".to_string());
            AppError::bad_request(message)
        })?;

        Ok(ValidatedJson(value))
    }
}
