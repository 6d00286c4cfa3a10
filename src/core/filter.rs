use crate::domain::model::{CatalogSnapshot, TicketItem, SENTINEL_COUNT};

pub const MOVIE_LARGE_CODE: &str = "20";
pub const MOVIE_MIDDLE_CODE: &str = "10";
pub const MOVIE_MIDDLE_NAME: &str = "영화관람권";
pub const PROMO_KEYWORDS: [&str; 2] = ["1+1", "얼리버드"];

/// Count of all movie tickets, or [`SENTINEL_COUNT`] if the classification is missing.
///
/// The upstream is expected to list the classification once. When it does not,
/// the first entry wins and the duplicate is reported.
pub fn total_count(snapshot: &CatalogSnapshot) -> i64 {
    let mut matches = snapshot
        .classifications
        .iter()
        .filter(|entry| entry.large_code == MOVIE_LARGE_CODE)
        .filter(|entry| entry.middle_code == MOVIE_MIDDLE_CODE);

    let Some(first) = matches.next() else {
        return SENTINEL_COUNT;
    };

    let duplicates = matches.count();
    if duplicates > 0 {
        tracing::warn!(
            "⚠️ Classification {}/{} listed {} times, using first count {}",
            MOVIE_LARGE_CODE,
            MOVIE_MIDDLE_CODE,
            duplicates + 1,
            first.item_count
        );
    }

    first.item_count
}

pub fn is_promotional(item: &TicketItem) -> bool {
    item.large_code == MOVIE_LARGE_CODE
        && item.middle_code == MOVIE_MIDDLE_CODE
        && item.middle_name == MOVIE_MIDDLE_NAME
        && PROMO_KEYWORDS.iter().any(|keyword| item.name.contains(keyword))
}

/// Promotional movie tickets in upstream order.
pub fn promotional_items(snapshot: &CatalogSnapshot) -> Vec<TicketItem> {
    snapshot
        .items
        .iter()
        .filter(|item| is_promotional(item))
        .cloned()
        .collect()
}
