use std::str::FromStr;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::{ItemError, ItemResult};
use crate::models::{Category, Item, ItemDraft, ItemFilter, ItemWithReporter, NewItem, ReportStatus};
use crate::repository::ItemRepository;

/// Service layer for the item lifecycle
///
/// Owns draft validation, the active→resolved state machine, and the
/// server-side ownership check for resolution.
#[derive(Clone)]
pub struct ItemService<R: ItemRepository> {
    repository: Arc<R>,
}

impl<R: ItemRepository> ItemService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// File a new report.
    ///
    /// The image, if any, has already been stored by the asset collaborator;
    /// only its reference arrives here.
    pub async fn report(
        &self,
        draft: ItemDraft,
        reporter_id: Uuid,
        image_url: Option<String>,
    ) -> ItemResult<Item> {
        let input = validate_draft(draft, reporter_id, image_url)?;
        let item = self.repository.insert(Item::new(input)).await?;
        tracing::info!(item_id = %item.id, reporter_id = %item.reporter_id, "Item reported");
        Ok(item)
    }

    /// List unresolved items, newest first, enriched with reporter names.
    pub async fn list_active(&self, filter: ItemFilter) -> ItemResult<Vec<ItemWithReporter>> {
        self.repository.list_active(filter.normalized()).await
    }

    /// Resolve an item on behalf of `acting_user_id`.
    ///
    /// Only the reporter may resolve their own item; this check is enforced
    /// here regardless of what the client UI shows. Resolving an
    /// already-resolved item is an idempotent success.
    pub async fn resolve(&self, id: Uuid, acting_user_id: Uuid) -> ItemResult<()> {
        let item = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or(ItemError::NotFound(id))?;

        if item.reporter_id != acting_user_id {
            return Err(ItemError::Forbidden);
        }

        let transitioned = self.repository.mark_resolved(id).await?;
        if !transitioned {
            tracing::debug!(item_id = %id, "Item was already resolved");
        }
        Ok(())
    }
}

/// Validate raw form fields into a typed draft.
fn validate_draft(
    draft: ItemDraft,
    reporter_id: Uuid,
    image_url: Option<String>,
) -> ItemResult<NewItem> {
    let title = draft.title.trim().to_string();
    if title.is_empty() {
        return Err(ItemError::Validation("title is required".to_string()));
    }

    let description = draft.description.trim().to_string();
    if description.is_empty() {
        return Err(ItemError::Validation("description is required".to_string()));
    }

    let status = ReportStatus::from_str(&draft.status)
        .map_err(|_| ItemError::Validation(format!("unknown status '{}'", draft.status)))?;

    let category = Category::from_str(&draft.category)
        .map_err(|_| ItemError::Validation(format!("unknown category '{}'", draft.category)))?;

    Ok(NewItem {
        title,
        description,
        category,
        location: draft.location.trim().to_string(),
        date: draft.date.trim().to_string(),
        status,
        image_url,
        reporter_id,
        contact_info: draft.contact_info.trim().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{InMemoryItemRepository, MockItemRepository};

    fn draft(title: &str) -> ItemDraft {
        ItemDraft {
            title: title.to_string(),
            description: "Left near the gym".to_string(),
            category: "bags".to_string(),
            location: "Gym".to_string(),
            date: "2024-03-01".to_string(),
            status: "lost".to_string(),
            contact_info: "u1@campus.edu".to_string(),
        }
    }

    #[tokio::test]
    async fn report_then_listed_active_with_declared_status() {
        let repo = InMemoryItemRepository::new();
        let reporter = Uuid::now_v7();
        repo.register_reporter(reporter, "sam").await;

        let service = ItemService::new(repo);
        let item = service
            .report(draft("Blue Backpack"), reporter, None)
            .await
            .unwrap();

        assert!(!item.is_resolved);
        assert_eq!(item.status, ReportStatus::Lost);

        let listed = service.list_active(ItemFilter::default()).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].item.id, item.id);
    }

    #[tokio::test]
    async fn report_rejects_blank_title() {
        let service = ItemService::new(InMemoryItemRepository::new());
        let err = service
            .report(draft("   "), Uuid::now_v7(), None)
            .await
            .unwrap_err();
        assert!(matches!(err, ItemError::Validation(_)));
    }

    #[tokio::test]
    async fn report_rejects_unknown_status_and_category() {
        let service = ItemService::new(InMemoryItemRepository::new());

        let mut bad_status = draft("Wallet");
        bad_status.status = "misplaced".to_string();
        assert!(matches!(
            service
                .report(bad_status, Uuid::now_v7(), None)
                .await
                .unwrap_err(),
            ItemError::Validation(_)
        ));

        let mut bad_category = draft("Wallet");
        bad_category.category = "vehicles".to_string();
        assert!(matches!(
            service
                .report(bad_category, Uuid::now_v7(), None)
                .await
                .unwrap_err(),
            ItemError::Validation(_)
        ));
    }

    #[tokio::test]
    async fn report_attaches_image_reference() {
        let service = ItemService::new(InMemoryItemRepository::new());
        let item = service
            .report(
                draft("Wallet"),
                Uuid::now_v7(),
                Some("/uploads/abc.jpg".to_string()),
            )
            .await
            .unwrap();
        assert_eq!(item.image_url.as_deref(), Some("/uploads/abc.jpg"));
    }

    #[tokio::test]
    async fn only_the_reporter_can_resolve() {
        let repo = InMemoryItemRepository::new();
        let reporter = Uuid::now_v7();
        let stranger = Uuid::now_v7();

        let service = ItemService::new(repo);
        let item = service.report(draft("Wallet"), reporter, None).await.unwrap();

        let err = service.resolve(item.id, stranger).await.unwrap_err();
        assert!(matches!(err, ItemError::Forbidden));

        // Still active afterwards
        assert_eq!(service.list_active(ItemFilter::default()).await.unwrap().len(), 1);

        service.resolve(item.id, reporter).await.unwrap();
        assert!(service.list_active(ItemFilter::default()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn resolve_twice_is_idempotent_success() {
        let repo = InMemoryItemRepository::new();
        let reporter = Uuid::now_v7();

        let service = ItemService::new(repo);
        let item = service.report(draft("Wallet"), reporter, None).await.unwrap();

        service.resolve(item.id, reporter).await.unwrap();
        service.resolve(item.id, reporter).await.unwrap();
    }

    #[tokio::test]
    async fn resolve_unknown_item_is_not_found() {
        let mut repo = MockItemRepository::new();
        repo.expect_get_by_id().returning(|_| Ok(None));

        let service = ItemService::new(repo);
        let err = service
            .resolve(Uuid::now_v7(), Uuid::now_v7())
            .await
            .unwrap_err();
        assert!(matches!(err, ItemError::NotFound(_)));
    }

    #[tokio::test]
    async fn resolve_never_reaches_store_for_non_owner() {
        let reporter = Uuid::now_v7();
        let item = Item::new(crate::models::NewItem {
            title: "Wallet".to_string(),
            description: "Brown".to_string(),
            category: Category::Accessories,
            location: "Gym".to_string(),
            date: "2024-03-01".to_string(),
            status: ReportStatus::Lost,
            image_url: None,
            reporter_id: reporter,
            contact_info: "u1@campus.edu".to_string(),
        });

        let mut repo = MockItemRepository::new();
        let returned = item.clone();
        repo.expect_get_by_id()
            .returning(move |_| Ok(Some(returned.clone())));
        // No expect_mark_resolved: calling it would panic the test

        let service = ItemService::new(repo);
        let err = service.resolve(item.id, Uuid::now_v7()).await.unwrap_err();
        assert!(matches!(err, ItemError::Forbidden));
    }

    #[tokio::test]
    async fn list_normalizes_empty_filters() {
        let mut repo = MockItemRepository::new();
        repo.expect_list_active()
            .withf(|filter| filter.status.is_none() && filter.search.is_none())
            .returning(|_| Ok(Vec::new()));

        let service = ItemService::new(repo);
        service
            .list_active(ItemFilter {
                status: Some(String::new()),
                category: None,
                search: Some(String::new()),
            })
            .await
            .unwrap();
    }
}
