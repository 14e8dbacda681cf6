//! Request body extraction with the service's input rules.

use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{AppError, INVALID_INPUT};

/// JSON request body that tolerates an absent body.
///
/// An empty (or whitespace-only) body decodes as `T::default()`, so optional
/// fields stay unset. Any other body must be a JSON object that decodes as
/// `T`; everything else is rejected as a validation error. The `Content-Type`
/// header is not inspected.
#[derive(Debug, Clone, Default)]
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned + Default + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await.map_err(|rejection| {
            tracing::debug!(error = %rejection, "request body could not be buffered");
            AppError::validation(INVALID_INPUT)
        })?;

        decode(&bytes).map(JsonBody)
    }
}

fn decode<T: DeserializeOwned + Default>(bytes: &[u8]) -> Result<T, AppError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }

    let value: Value = serde_json::from_slice(bytes).map_err(|err| {
        tracing::debug!(error = %err, "request body is not valid JSON");
        AppError::validation(INVALID_INPUT)
    })?;

    // Derived struct impls also accept positional arrays
    if !value.is_object() {
        tracing::debug!("request body is not a JSON object");
        return Err(AppError::validation(INVALID_INPUT));
    }

    serde_json::from_value(value).map_err(|err| {
        tracing::debug!(error = %err, "request body does not match the expected fields");
        AppError::validation(INVALID_INPUT)
    })
}
