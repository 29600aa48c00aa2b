use utoipa::OpenApi;

/// Combined OpenAPI document for the whole API surface.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "CampusFind API",
        description = "Campus lost-and-found listing service"
    ),
    nest(
        (path = "/api/items", api = domain_items::handlers::ApiDoc),
        (path = "/api", api = domain_users::handlers::ApiDoc)
    )
)]
pub struct ApiDoc;
