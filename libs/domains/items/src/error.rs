use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use axum_helpers::ErrorResponse;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum ItemError {
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Item not found: {0}")]
    NotFound(Uuid),

    #[error("Only the reporter can resolve this item")]
    Forbidden,

    #[error("Item id already exists")]
    Conflict,

    #[error("Asset storage error: {0}")]
    Storage(String),

    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}

pub type ItemResult<T> = Result<T, ItemError>;

impl IntoResponse for ItemError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ItemError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ItemError::NotFound(id) => {
                (StatusCode::NOT_FOUND, format!("Item {} not found", id))
            }
            ItemError::Forbidden => (
                StatusCode::FORBIDDEN,
                "Only the reporter can resolve this item".to_string(),
            ),
            ItemError::Conflict => {
                (StatusCode::CONFLICT, "Item id already exists".to_string())
            }
            ItemError::Storage(msg) => {
                tracing::error!("Asset storage error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to report item".to_string(),
                )
            }
            ItemError::Database(err) => {
                tracing::error!("Database error: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred".to_string(),
                )
            }
        };

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forbidden_maps_to_403() {
        let response = ItemError::Forbidden.into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn not_found_maps_to_404() {
        let response = ItemError::NotFound(Uuid::now_v7()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn validation_maps_to_400() {
        let response = ItemError::Validation("title is required".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn database_errors_hide_details() {
        let err = ItemError::Database(sea_orm::DbErr::Custom("connection string".to_string()));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
