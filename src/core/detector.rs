//! Name-based comparison of two promotional ticket lists.
//!
//! Names are the identity key, so duplicates collapse and order is ignored:
//! a change is reported exactly when the two name sets differ.

use crate::domain::model::TicketItem;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChangeSet {
    /// Some fresh item has no name match in the cache.
    pub added: bool,
    /// Some cached item has no name match in the fresh list.
    pub removed: bool,
}

impl ChangeSet {
    pub fn is_changed(&self) -> bool {
        self.added || self.removed
    }
}

fn contains_name(items: &[TicketItem], name: &str) -> bool {
    items.iter().any(|item| item.name == name)
}

pub fn compare(cached: &[TicketItem], fresh: &[TicketItem]) -> ChangeSet {
    ChangeSet {
        added: fresh.iter().any(|item| !contains_name(cached, &item.name)),
        removed: cached.iter().any(|item| !contains_name(fresh, &item.name)),
    }
}

/// First fresh item whose name is not cached, or [`TicketItem::empty`] for pure removals.
pub fn find_new_item(cached: &[TicketItem], fresh: &[TicketItem]) -> TicketItem {
    fresh
        .iter()
        .find(|item| !contains_name(cached, &item.name))
        .cloned()
        .unwrap_or_else(TicketItem::empty)
}
