//! SeaORM entity for the `items` table

use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue::Set;

use crate::models::{Category, Item, ReportStatus};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "items")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(column_type = "Text")]
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub category: Category,
    #[sea_orm(column_type = "Text")]
    pub location: String,
    #[sea_orm(column_type = "Text")]
    pub date: String,
    pub status: ReportStatus,
    #[sea_orm(column_type = "Text", nullable)]
    pub image_url: Option<String>,
    pub reporter_id: Uuid,
    #[sea_orm(column_type = "Text")]
    pub contact_info: String,
    pub is_resolved: bool,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "domain_users::entity::Entity",
        from = "Column::ReporterId",
        to = "domain_users::entity::Column::Id"
    )]
    Reporter,
}

impl Related<domain_users::entity::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reporter.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Item {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            description: model.description,
            category: model.category,
            location: model.location,
            date: model.date,
            status: model.status,
            image_url: model.image_url,
            reporter_id: model.reporter_id,
            contact_info: model.contact_info,
            is_resolved: model.is_resolved,
            created_at: model.created_at,
        }
    }
}

impl From<Item> for ActiveModel {
    fn from(item: Item) -> Self {
        Self {
            id: Set(item.id),
            title: Set(item.title),
            description: Set(item.description),
            category: Set(item.category),
            location: Set(item.location),
            date: Set(item.date),
            status: Set(item.status),
            image_url: Set(item.image_url),
            reporter_id: Set(item.reporter_id),
            contact_info: Set(item.contact_info),
            is_resolved: Set(item.is_resolved),
            created_at: Set(item.created_at),
        }
    }
}
