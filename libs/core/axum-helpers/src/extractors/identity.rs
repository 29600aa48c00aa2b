//! Acting-user extractor.
//!
//! The identity collaborator authenticates requests upstream and passes the
//! authenticated user id through the `X-User-Id` header. The core trusts the
//! value as an opaque identifier; what it never does is trust the *client UI*
//! to have hidden an action from a non-owner.

use crate::errors::AppError;
use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Response},
};
use uuid::Uuid;

pub const USER_ID_HEADER: &str = "x-user-id";

/// Extractor for the authenticated acting user.
///
/// Missing header → 401, malformed id → 400.
pub struct UserIdentity(pub Uuid);

impl<S> FromRequestParts<S> for UserIdentity
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Unauthorized("Login required".to_string()).into_response()
            })?;

        match Uuid::parse_str(value) {
            Ok(uuid) => Ok(UserIdentity(uuid)),
            Err(_) => {
                Err(AppError::BadRequest(format!("Invalid user id: {}", value)).into_response())
            }
        }
    }
}
