//! Client-side filter and sort over a loaded set of items.

use std::cmp::Ordering;

use shared::domain::{FilterCriteria, Item, SortField, SortOrder};

/// Derives the filtered, sorted view of `items`. Input order is kept for ties.
pub fn apply_filters(items: &[Item], criteria: &FilterCriteria) -> Vec<Item> {
    let needle = criteria.search_name.to_lowercase();
    let mut filtered: Vec<Item> = items
        .iter()
        .filter(|item| matches_with(item, &needle, criteria))
        .cloned()
        .collect();

    filtered.sort_by(|a, b| {
        let ordering = compare_by(a, b, criteria.sort_field);
        match criteria.sort_order {
            SortOrder::Ascending => ordering,
            SortOrder::Descending => ordering.reverse(),
        }
    });
    filtered
}

/// True when `item` passes every active predicate of `criteria`.
pub fn matches(item: &Item, criteria: &FilterCriteria) -> bool {
    matches_with(item, &criteria.search_name.to_lowercase(), criteria)
}

fn matches_with(item: &Item, needle: &str, criteria: &FilterCriteria) -> bool {
    if !needle.is_empty() && !item.name.to_lowercase().contains(needle) {
        return false;
    }
    if criteria.min_price.is_some_and(|min| item.price < min) {
        return false;
    }
    if criteria.max_price.is_some_and(|max| item.price > max) {
        return false;
    }
    true
}

pub fn compare_by(a: &Item, b: &Item, field: SortField) -> Ordering {
    match field {
        SortField::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
        SortField::Category => a.category.to_lowercase().cmp(&b.category.to_lowercase()),
        SortField::Price => a.price.partial_cmp(&b.price).unwrap_or(Ordering::Equal),
    }
}

#[cfg(test)]
#[path = "tests/query_tests.rs"]
mod tests;
