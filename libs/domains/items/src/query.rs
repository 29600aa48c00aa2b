//! Parameterized query construction for active-item listings
//!
//! Every user-supplied value is passed as a bound parameter; nothing from the
//! filter is ever spliced into the SQL text. The conditions here must stay
//! semantically identical to [`crate::mirror`], which re-evaluates them over
//! an already-fetched snapshot.

use sea_orm::sea_query::{Condition, Expr, ExprTrait, Func, LikeExpr};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Select};

use crate::entity;
use crate::models::ItemFilter;

/// Escape LIKE metacharacters so the pattern matches the search text as a
/// literal substring, mirroring a plain `contains` check.
pub fn escape_like(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Build the WHERE condition for an active-item listing.
///
/// The fixed `is_resolved = false` clause is always present; each present
/// filter appends one AND clause. Absent filters contribute nothing.
pub fn active_condition(filter: &ItemFilter) -> Condition {
    let filter = filter.clone().normalized();

    let mut condition = Condition::all().add(entity::Column::IsResolved.eq(false));

    if let Some(status) = filter.status {
        condition = condition.add(entity::Column::Status.eq(status));
    }

    if let Some(category) = filter.category {
        condition = condition.add(entity::Column::Category.eq(category));
    }

    if let Some(search) = filter.search {
        let pattern = format!("%{}%", escape_like(&search.to_lowercase()));
        condition = condition.add(
            Condition::any()
                .add(
                    Func::lower(Expr::col(entity::Column::Title))
                        .like(LikeExpr::new(&pattern).escape('\\')),
                )
                .add(
                    Func::lower(Expr::col(entity::Column::Description))
                        .like(LikeExpr::new(&pattern).escape('\\')),
                ),
        );
    }

    condition
}

/// Active-item listing query: filtered, newest-first, deterministic tie-break
/// on id.
pub fn active_query(filter: &ItemFilter) -> Select<entity::Entity> {
    entity::Entity::find()
        .filter(active_condition(filter))
        .order_by_desc(entity::Column::CreatedAt)
        .order_by_asc(entity::Column::Id)
}
