use crate::errors::not_found;
use crate::health::health_handler;
use crate::shutdown::shutdown_signal;
use axum::{routing::get, Router};
use core_config::server::ServerConfig;
use std::io;
use tower_http::cors::CorsLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{info, Level};
use utoipa::OpenApi;

/// Assemble the top-level router from the domain API routes.
///
/// Sets up:
/// - Swagger UI at `/swagger-ui` backed by the combined OpenAPI document
/// - `/health` liveness endpoint
/// - domain routes nested under `/api` (state already applied per domain)
/// - request tracing, permissive CORS, and a 404 envelope fallback
pub fn build_router<T>(apis: Router) -> Router
where
    T: OpenApi + 'static,
{
    use utoipa_swagger_ui::SwaggerUi;

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", T::openapi()))
        .route("/health", get(health_handler))
        .nest("/api", apis)
        .fallback(not_found)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(CorsLayer::permissive())
}

/// Bind and serve the router with graceful shutdown.
pub async fn serve(router: Router, server_config: &ServerConfig) -> io::Result<()> {
    let listener = tokio::net::TcpListener::bind(server_config.address()).await?;

    info!("Server starting on {}", listener.local_addr()?);
    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .inspect_err(|e| {
            tracing::error!("Server encountered an error: {:?}", e);
        })?;

    Ok(())
}
