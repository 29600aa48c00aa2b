//! Client-side filter mirror
//!
//! Pure predicate evaluation over an already-fetched snapshot of active
//! items, so interactive re-filtering needs no round trip. The semantics
//! here must match [`crate::query`] exactly: exact match on status and
//! category, case-insensitive substring match on title or description,
//! empty or absent filters constrain nothing. `tests/query_equivalence.rs`
//! holds the two implementations together.

use crate::models::{Item, ItemFilter, ItemWithReporter};

/// Does a single item satisfy the filter configuration?
pub fn matches(item: &Item, filter: &ItemFilter) -> bool {
    fn present(v: &Option<String>) -> Option<&str> {
        v.as_deref().filter(|s| !s.is_empty())
    }

    let matches_status = present(&filter.status)
        .map(|status| item.status.to_string() == status)
        .unwrap_or(true);

    let matches_category = present(&filter.category)
        .map(|category| item.category.to_string() == category)
        .unwrap_or(true);

    let matches_search = present(&filter.search)
        .map(|search| {
            let needle = search.to_lowercase();
            item.title.to_lowercase().contains(&needle)
                || item.description.to_lowercase().contains(&needle)
        })
        .unwrap_or(true);

    matches_status && matches_category && matches_search
}

/// Apply the filter to a fetched snapshot, preserving its order.
///
/// The snapshot is passed in explicitly; this function holds no state and
/// never mutates its input.
pub fn apply(items: &[ItemWithReporter], filter: &ItemFilter) -> Vec<ItemWithReporter> {
    items
        .iter()
        .filter(|entry| matches(&entry.item, filter))
        .cloned()
        .collect()
}
