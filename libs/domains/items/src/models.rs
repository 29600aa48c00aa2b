use chrono::{DateTime, Utc};
use sea_orm::sea_query::StringLen;
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

/// Nature of a report: the item was lost by the reporter, or found by them.
///
/// Orthogonal to resolution state.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    EnumIter,
    DeriveActiveEnum,
    strum::Display,
    strum::EnumString,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ReportStatus {
    #[sea_orm(string_value = "lost")]
    Lost,
    #[sea_orm(string_value = "found")]
    Found,
}

/// Item category, constrained to a known set so exact-match filtering stays
/// meaningful.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    EnumIter,
    DeriveActiveEnum,
    strum::Display,
    strum::EnumString,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Category {
    #[sea_orm(string_value = "electronics")]
    Electronics,
    #[sea_orm(string_value = "documents")]
    Documents,
    #[sea_orm(string_value = "keys")]
    Keys,
    #[sea_orm(string_value = "accessories")]
    Accessories,
    #[sea_orm(string_value = "clothing")]
    Clothing,
    #[sea_orm(string_value = "bags")]
    Bags,
    #[sea_orm(string_value = "other")]
    Other,
}

/// Item entity - matches SQL schema
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Item {
    /// Unique identifier, generated at creation, immutable
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub category: Category,
    /// Where the item was lost or found (free text)
    pub location: String,
    /// When the item was lost or found, as submitted by the reporter
    pub date: String,
    pub status: ReportStatus,
    /// Public URL path of the uploaded photo, if any
    pub image_url: Option<String>,
    /// Owner of the report, fixed at creation
    pub reporter_id: Uuid,
    pub contact_info: String,
    /// Resolution state; transitions false→true exactly once
    pub is_resolved: bool,
    pub created_at: DateTime<Utc>,
}

/// Validated input for creating an item
#[derive(Debug, Clone)]
pub struct NewItem {
    pub title: String,
    pub description: String,
    pub category: Category,
    pub location: String,
    pub date: String,
    pub status: ReportStatus,
    pub image_url: Option<String>,
    pub reporter_id: Uuid,
    pub contact_info: String,
}

impl Item {
    pub fn new(input: NewItem) -> Self {
        Self {
            id: Uuid::now_v7(),
            title: input.title,
            description: input.description,
            category: input.category,
            location: input.location,
            date: input.date,
            status: input.status,
            image_url: input.image_url,
            reporter_id: input.reporter_id,
            contact_info: input.contact_info,
            is_resolved: false,
            created_at: Utc::now(),
        }
    }
}

/// Raw report form fields, as they arrive from the multipart body.
///
/// Category and status are kept as strings here; parsing and validation
/// happen in the service so every rejection carries a useful message.
#[derive(Debug, Clone, Default, ToSchema)]
pub struct ItemDraft {
    pub title: String,
    pub description: String,
    pub category: String,
    pub location: String,
    pub date: String,
    pub status: String,
    pub contact_info: String,
}

/// An item enriched with its reporter's username for display.
///
/// The join is a read-time enrichment, not stored state.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ItemWithReporter {
    #[serde(flatten)]
    pub item: Item,
    pub reporter_name: String,
}

/// Optional listing filters; absence (or an empty string) means no constraint
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, IntoParams)]
pub struct ItemFilter {
    /// Exact match against the declared lost/found value
    pub status: Option<String>,
    /// Exact match against the item category
    pub category: Option<String>,
    /// Case-insensitive substring match against title or description
    pub search: Option<String>,
}

impl ItemFilter {
    /// Collapse empty-string values (what an HTML select submits for "all")
    /// into `None`.
    pub fn normalized(self) -> Self {
        let present = |v: Option<String>| v.filter(|s| !s.is_empty());
        Self {
            status: present(self.status),
            category: present(self.category),
            search: present(self.search),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn status_round_trips_through_strings() {
        assert_eq!(ReportStatus::Lost.to_string(), "lost");
        assert_eq!(ReportStatus::from_str("found").unwrap(), ReportStatus::Found);
        assert!(ReportStatus::from_str("misplaced").is_err());
    }

    #[test]
    fn category_round_trips_through_strings() {
        assert_eq!(Category::Bags.to_string(), "bags");
        assert_eq!(Category::from_str("electronics").unwrap(), Category::Electronics);
        assert!(Category::from_str("vehicles").is_err());
    }

    #[test]
    fn new_item_starts_active() {
        let item = Item::new(NewItem {
            title: "Blue Backpack".to_string(),
            description: "Left in the library".to_string(),
            category: Category::Bags,
            location: "Main Library".to_string(),
            date: "2024-03-01".to_string(),
            status: ReportStatus::Lost,
            image_url: None,
            reporter_id: Uuid::now_v7(),
            contact_info: "u1@campus.edu".to_string(),
        });

        assert!(!item.is_resolved);
        assert_eq!(item.status, ReportStatus::Lost);
    }

    #[test]
    fn filter_normalization_drops_empty_strings() {
        let filter = ItemFilter {
            status: Some(String::new()),
            category: Some("keys".to_string()),
            search: None,
        };

        let normalized = filter.normalized();
        assert_eq!(normalized.status, None);
        assert_eq!(normalized.category.as_deref(), Some("keys"));
    }

    #[test]
    fn item_with_reporter_flattens_in_json() {
        let item = Item::new(NewItem {
            title: "Keys".to_string(),
            description: "Dorm keys".to_string(),
            category: Category::Keys,
            location: "Cafeteria".to_string(),
            date: "2024-03-02".to_string(),
            status: ReportStatus::Found,
            image_url: None,
            reporter_id: Uuid::now_v7(),
            contact_info: "u2@campus.edu".to_string(),
        });

        let json = serde_json::to_value(ItemWithReporter {
            item,
            reporter_name: "sam".to_string(),
        })
        .unwrap();

        // Flat wire shape: reporter_name sits next to the item columns
        assert_eq!(json["reporter_name"], "sam");
        assert_eq!(json["title"], "Keys");
        assert_eq!(json["status"], "found");
    }
}
