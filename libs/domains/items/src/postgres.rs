use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, SqlErr,
};
use uuid::Uuid;

use crate::entity::{self, Entity as Items};
use crate::error::{ItemError, ItemResult};
use crate::models::{Item, ItemFilter, ItemWithReporter};
use crate::query;
use crate::repository::ItemRepository;

/// PostgreSQL implementation of ItemRepository using SeaORM
#[derive(Clone)]
pub struct PgItemRepository {
    db: DatabaseConnection,
}

impl PgItemRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ItemRepository for PgItemRepository {
    async fn insert(&self, item: Item) -> ItemResult<Item> {
        let active: entity::ActiveModel = item.into();

        let model = Items::insert(active)
            .exec_with_returning(&self.db)
            .await
            .map_err(|err| match err.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => ItemError::Conflict,
                _ => ItemError::Database(err),
            })?;

        tracing::info!(item_id = %model.id, "Stored item report");
        Ok(model.into())
    }

    async fn get_by_id(&self, id: Uuid) -> ItemResult<Option<Item>> {
        let model = Items::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Into::into))
    }

    async fn list_active(&self, filter: ItemFilter) -> ItemResult<Vec<ItemWithReporter>> {
        let rows = query::active_query(&filter)
            .find_also_related(domain_users::entity::Entity)
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(model, reporter)| ItemWithReporter {
                item: model.into(),
                reporter_name: reporter.map(|u| u.username).unwrap_or_default(),
            })
            .collect())
    }

    async fn mark_resolved(&self, id: Uuid) -> ItemResult<bool> {
        // Conditional update: the WHERE clause makes the check-and-set
        // atomic, so concurrent calls cannot both observe the transition.
        let result = Items::update_many()
            .col_expr(entity::Column::IsResolved, Expr::value(true))
            .filter(entity::Column::Id.eq(id))
            .filter(entity::Column::IsResolved.eq(false))
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
