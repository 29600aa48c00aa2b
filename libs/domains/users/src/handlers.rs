use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::post, Json, Router};
use axum_helpers::{ErrorResponse, ValidatedJson};
use serde::Serialize;
use std::sync::Arc;
use utoipa::{OpenApi, ToSchema};

use crate::error::UserResult;
use crate::models::{LoginUser, RegisterUser, UserResponse};
use crate::repository::UserRepository;
use crate::service::UserService;

/// OpenAPI documentation for the auth endpoints
#[derive(OpenApi)]
#[openapi(
    paths(register, login),
    components(schemas(RegisterUser, LoginUser, UserResponse, AuthSuccess, ErrorResponse)),
    tags(
        (name = "Auth", description = "Account registration and login")
    )
)]
pub struct ApiDoc;

/// Create the auth router
pub fn router<R: UserRepository + 'static>(service: UserService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .with_state(shared_service)
}

/// Success envelope carrying the authenticated user
#[derive(Debug, Serialize, ToSchema)]
struct AuthSuccess {
    success: bool,
    user: UserResponse,
}

impl AuthSuccess {
    fn new(user: UserResponse) -> Self {
        Self {
            success: true,
            user,
        }
    }
}

/// Register a new account
#[utoipa::path(
    post,
    path = "/register",
    tag = "Auth",
    request_body = RegisterUser,
    responses(
        (status = 201, description = "Account created", body = AuthSuccess),
        (status = 400, description = "Duplicate username/email or invalid data", body = ErrorResponse),
        (status = 500, description = "Internal error", body = ErrorResponse)
    )
)]
async fn register<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    ValidatedJson(input): ValidatedJson<RegisterUser>,
) -> UserResult<impl IntoResponse> {
    let user = service.register(input).await?;
    Ok((StatusCode::CREATED, Json(AuthSuccess::new(user))))
}

/// Log in with email and password
#[utoipa::path(
    post,
    path = "/login",
    tag = "Auth",
    request_body = LoginUser,
    responses(
        (status = 200, description = "Credentials accepted", body = AuthSuccess),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 500, description = "Internal error", body = ErrorResponse)
    )
)]
async fn login<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    ValidatedJson(input): ValidatedJson<LoginUser>,
) -> UserResult<Json<AuthSuccess>> {
    let user = service.authenticate(input).await?;
    Ok(Json(AuthSuccess::new(user)))
}
