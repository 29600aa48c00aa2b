use axum::{
    extract::{Multipart, Query, State},
    routing::{get, patch},
    Json, Router,
};
use axum_helpers::{ErrorResponse, UserIdentity, UuidPath};
use serde::Serialize;
use std::sync::Arc;
use utoipa::{OpenApi, ToSchema};
use uuid::Uuid;

use asset_storage::AssetStore;

use crate::error::{ItemError, ItemResult};
use crate::models::{Category, Item, ItemDraft, ItemFilter, ItemWithReporter, ReportStatus};
use crate::repository::ItemRepository;
use crate::service::ItemService;

/// OpenAPI documentation for the items API
#[derive(OpenApi)]
#[openapi(
    paths(list_items, report_item, resolve_item),
    components(
        schemas(
            Item,
            ItemWithReporter,
            ItemDraft,
            Category,
            ReportStatus,
            ReportCreated,
            Resolved,
            ErrorResponse
        )
    ),
    tags(
        (name = "Items", description = "Lost-and-found item reports")
    )
)]
pub struct ApiDoc;

/// Shared state: the lifecycle service plus the asset collaborator that
/// turns uploaded image bytes into stored references.
pub struct ItemsState<R: ItemRepository> {
    service: Arc<ItemService<R>>,
    assets: Arc<dyn AssetStore>,
}

impl<R: ItemRepository> Clone for ItemsState<R> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            assets: Arc::clone(&self.assets),
        }
    }
}

/// Create the items router with all HTTP endpoints
pub fn router<R: ItemRepository + 'static>(
    service: ItemService<R>,
    assets: Arc<dyn AssetStore>,
) -> Router {
    let state = ItemsState {
        service: Arc::new(service),
        assets,
    };

    Router::new()
        .route("/", get(list_items).post(report_item))
        .route("/{id}/resolve", patch(resolve_item))
        .with_state(state)
}

/// Success envelope for a created report
#[derive(Debug, Serialize, ToSchema)]
struct ReportCreated {
    success: bool,
    item_id: Uuid,
}

/// Success envelope for a resolution
#[derive(Debug, Serialize, ToSchema)]
struct Resolved {
    success: bool,
}

/// List active items
#[utoipa::path(
    get,
    path = "",
    tag = "Items",
    params(ItemFilter),
    responses(
        (status = 200, description = "Active items, newest first", body = Vec<ItemWithReporter>),
        (status = 500, description = "Internal error", body = ErrorResponse)
    )
)]
async fn list_items<R: ItemRepository>(
    State(state): State<ItemsState<R>>,
    Query(filter): Query<ItemFilter>,
) -> ItemResult<Json<Vec<ItemWithReporter>>> {
    let items = state.service.list_active(filter).await?;
    Ok(Json(items))
}

/// Report a lost or found item
#[utoipa::path(
    post,
    path = "",
    tag = "Items",
    request_body(content = ItemDraft, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Report created", body = ReportCreated),
        (status = 400, description = "Missing or invalid fields", body = ErrorResponse),
        (status = 500, description = "Failed to report item", body = ErrorResponse)
    )
)]
async fn report_item<R: ItemRepository>(
    State(state): State<ItemsState<R>>,
    multipart: Multipart,
) -> ItemResult<Json<ReportCreated>> {
    let form = parse_report_form(multipart).await?;

    let reporter_id = form
        .reporter_id
        .ok_or_else(|| ItemError::Validation("reporter_id is required".to_string()))?;

    // If asset storage fails, the whole report fails; an item is never
    // created with a dangling image reference.
    let image_url = match form.image {
        Some((file_name, bytes)) => Some(
            state
                .assets
                .store(&file_name, &bytes)
                .await
                .map_err(|e| ItemError::Storage(e.to_string()))?,
        ),
        None => None,
    };

    let item = state.service.report(form.draft, reporter_id, image_url).await?;

    Ok(Json(ReportCreated {
        success: true,
        item_id: item.id,
    }))
}

/// Resolve an item
///
/// The acting user comes from the identity header; the ownership check
/// happens in the service.
#[utoipa::path(
    patch,
    path = "/{id}/resolve",
    tag = "Items",
    params(
        ("id" = Uuid, Path, description = "Item ID")
    ),
    responses(
        (status = 200, description = "Item resolved", body = Resolved),
        (status = 403, description = "Acting user is not the reporter", body = ErrorResponse),
        (status = 404, description = "Unknown item", body = ErrorResponse)
    )
)]
async fn resolve_item<R: ItemRepository>(
    State(state): State<ItemsState<R>>,
    UuidPath(id): UuidPath,
    UserIdentity(acting_user_id): UserIdentity,
) -> ItemResult<Json<Resolved>> {
    state.service.resolve(id, acting_user_id).await?;
    Ok(Json(Resolved { success: true }))
}

/// Decoded multipart report form
struct ReportForm {
    draft: ItemDraft,
    reporter_id: Option<Uuid>,
    image: Option<(String, Vec<u8>)>,
}

async fn parse_report_form(mut multipart: Multipart) -> ItemResult<ReportForm> {
    let mut draft = ItemDraft::default();
    let mut reporter_id = None;
    let mut image = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ItemError::Validation(format!("malformed form data: {}", e)))?
    {
        let name = field.name().unwrap_or_default().to_string();

        if name == "image" {
            let file_name = field.file_name().unwrap_or_default().to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| ItemError::Validation(format!("failed to read upload: {}", e)))?;
            // An empty file input still submits the field; treat it as absent
            if !file_name.is_empty() && !bytes.is_empty() {
                image = Some((file_name, bytes.to_vec()));
            }
            continue;
        }

        let value = field
            .text()
            .await
            .map_err(|e| ItemError::Validation(format!("malformed field '{}': {}", name, e)))?;

        match name.as_str() {
            "title" => draft.title = value,
            "description" => draft.description = value,
            "category" => draft.category = value,
            "location" => draft.location = value,
            "date" => draft.date = value,
            "status" => draft.status = value,
            "contact_info" => draft.contact_info = value,
            "reporter_id" => {
                reporter_id = Some(Uuid::parse_str(value.trim()).map_err(|_| {
                    ItemError::Validation("reporter_id must be a valid UUID".to_string())
                })?);
            }
            // Unknown fields are ignored, like any forgiving form endpoint
            _ => {}
        }
    }

    Ok(ReportForm {
        draft,
        reporter_id,
        image,
    })
}
