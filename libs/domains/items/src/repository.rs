use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{ItemError, ItemResult};
use crate::mirror;
use crate::models::{Item, ItemFilter, ItemWithReporter};

/// Repository trait for Item persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// Persist a new item
    async fn insert(&self, item: Item) -> ItemResult<Item>;

    /// Get an item by ID, resolved or not
    async fn get_by_id(&self, id: Uuid) -> ItemResult<Option<Item>>;

    /// List unresolved items matching the filter, newest first, each joined
    /// with its reporter's username
    async fn list_active(&self, filter: ItemFilter) -> ItemResult<Vec<ItemWithReporter>>;

    /// Flip `is_resolved` to true if it is still false.
    ///
    /// Returns whether this call performed the transition; `false` means the
    /// item was already resolved (or does not exist — existence is the
    /// caller's concern). The check-and-set must be atomic so two concurrent
    /// calls never both report the transition.
    async fn mark_resolved(&self, id: Uuid) -> ItemResult<bool>;
}

/// In-memory implementation of ItemRepository (for development/testing)
///
/// Shares the filter predicate with [`crate::mirror`], so it exhibits the
/// same listing semantics as the SQL-backed repository.
#[derive(Debug, Default, Clone)]
pub struct InMemoryItemRepository {
    items: Arc<RwLock<HashMap<Uuid, Item>>>,
    reporters: Arc<RwLock<HashMap<Uuid, String>>>,
}

impl InMemoryItemRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a reporter's username for the read-time join.
    pub async fn register_reporter(&self, id: Uuid, username: impl Into<String>) {
        self.reporters.write().await.insert(id, username.into());
    }
}

#[async_trait]
impl ItemRepository for InMemoryItemRepository {
    async fn insert(&self, item: Item) -> ItemResult<Item> {
        let mut items = self.items.write().await;
        if items.contains_key(&item.id) {
            return Err(ItemError::Conflict);
        }
        items.insert(item.id, item.clone());
        Ok(item)
    }

    async fn get_by_id(&self, id: Uuid) -> ItemResult<Option<Item>> {
        Ok(self.items.read().await.get(&id).cloned())
    }

    async fn list_active(&self, filter: ItemFilter) -> ItemResult<Vec<ItemWithReporter>> {
        let items = self.items.read().await;
        let reporters = self.reporters.read().await;

        let mut active: Vec<ItemWithReporter> = items
            .values()
            .filter(|item| !item.is_resolved && mirror::matches(item, &filter))
            .map(|item| ItemWithReporter {
                item: item.clone(),
                reporter_name: reporters
                    .get(&item.reporter_id)
                    .cloned()
                    .unwrap_or_default(),
            })
            .collect();

        active.sort_by(|a, b| {
            b.item
                .created_at
                .cmp(&a.item.created_at)
                .then(a.item.id.cmp(&b.item.id))
        });

        Ok(active)
    }

    async fn mark_resolved(&self, id: Uuid) -> ItemResult<bool> {
        let mut items = self.items.write().await;
        match items.get_mut(&id) {
            Some(item) if !item.is_resolved => {
                item.is_resolved = true;
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}
