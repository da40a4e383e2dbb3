//! Result merging: deduplication, ranking and pagination.

use std::collections::HashSet;

use crate::SearchResultItem;

/// Deduplicates a pool of normalized items by exact URL string.
///
/// The pool must be in dispatcher-completion order: the first occurrence of
/// a URL wins and keeps the provider that found it. Items without a URL are
/// dropped.
pub fn dedup(pool: Vec<SearchResultItem>) -> Vec<SearchResultItem> {
    let mut seen = HashSet::new();
    pool.into_iter()
        .filter(|item| !item.url.is_empty() && seen.insert(item.url.clone()))
        .collect()
}

/// Stable-sorts items by descending score, breaking ties by ascending
/// provider priority rank so equal scores order deterministically.
pub fn rank(items: &mut [SearchResultItem]) {
    items.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.provider.priority_rank().cmp(&b.provider.priority_rank()))
    });
}

/// Slices the `[offset, offset + limit)` window of the ranked sequence.
///
/// An offset at or past the end yields an empty page.
pub fn paginate(items: Vec<SearchResultItem>, offset: usize, limit: usize) -> Vec<SearchResultItem> {
    items.into_iter().skip(offset).take(limit).collect()
}

/// Runs the full merge: dedup, rank, paginate. Returns the page slice and
/// the total deduplicated count (pre-slice), for client-side paging math.
pub fn merge(
    pool: Vec<SearchResultItem>,
    offset: usize,
    limit: usize,
) -> (Vec<SearchResultItem>, usize) {
    let mut deduped = dedup(pool);
    rank(&mut deduped);
    let total = deduped.len();
    (paginate(deduped, offset, limit), total)
}
