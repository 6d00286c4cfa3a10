use crate::domain::model::TicketItem;

/// Last observed state, owned by the poller.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SnapshotCache {
    total_count: i64,
    promo_items: Vec<TicketItem>,
}

impl SnapshotCache {
    pub fn seeded(total_count: i64, promo_items: Vec<TicketItem>) -> Self {
        Self {
            total_count,
            promo_items,
        }
    }

    pub fn total_count(&self) -> i64 {
        self.total_count
    }

    pub fn promo_items(&self) -> &[TicketItem] {
        &self.promo_items
    }

    pub fn update_total(&mut self, total_count: i64) {
        if self.total_count != total_count {
            tracing::debug!("Total count {} -> {}", self.total_count, total_count);
            self.total_count = total_count;
        }
    }

    /// Replaces the promotional list wholesale; nothing from the previous list survives.
    pub fn replace_promos(&mut self, promo_items: Vec<TicketItem>) {
        self.promo_items = promo_items;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(name: &str) -> TicketItem {
        TicketItem {
            name: name.to_string(),
            ..TicketItem::default()
        }
    }

    #[test]
    fn test_replace_does_not_merge() {
        let mut cache = SnapshotCache::seeded(10, vec![named("1+1 A"), named("1+1 B")]);
        cache.replace_promos(vec![named("1+1 C")]);
        assert_eq!(cache.promo_items(), &[named("1+1 C")]);
    }

    #[test]
    fn test_update_total() {
        let mut cache = SnapshotCache::seeded(120, vec![]);
        cache.update_total(120);
        assert_eq!(cache.total_count(), 120);
        cache.update_total(-1);
        assert_eq!(cache.total_count(), -1);
    }
}
