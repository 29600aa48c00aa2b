//! JSON extractor with automatic validation using the validator crate.

use crate::errors::ErrorResponse;
use axum::{
    extract::{FromRequest, Json, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;
use validator::Validate;

/// JSON extractor that validates the request body with the `validator`
/// crate's `Validate` trait before handing it to the handler.
///
/// Rejections use the standard `{success: false, error}` envelope.
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = Json::<T>::from_request(req, state).await.map_err(|e| {
            (
                StatusCode::BAD_REQUEST,
                axum::Json(ErrorResponse::new(format!("Invalid JSON body: {}", e.body_text()))),
            )
                .into_response()
        })?;

        data.validate().map_err(|e| {
            let fields: Vec<String> = e.field_errors().keys().map(|k| k.to_string()).collect();
            (
                StatusCode::BAD_REQUEST,
                axum::Json(ErrorResponse::new(format!(
                    "Validation failed for: {}",
                    fields.join(", ")
                ))),
            )
                .into_response()
        })?;

        Ok(ValidatedJson(data))
    }
}
