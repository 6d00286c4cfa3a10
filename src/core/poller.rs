//! Periodic fetch, compare and notify loop.
//!
//! The poller is the only writer of the [`SnapshotCache`]. Cycles take
//! `&mut self` and run one after another on the task that drives [`Poller::run`],
//! so two cycles can never overlap. Observers get read-only [`PollerStatus`]
//! values through [`Poller::subscribe`].

use crate::core::cache::SnapshotCache;
use crate::core::detector::{self, ChangeSet};
use crate::core::filter::{promotional_items, total_count};
use crate::core::format::{escape_html, MessageFormat, MessageStyle, Platform};
use crate::domain::model::{TicketItem, SENTINEL_COUNT};
use crate::domain::ports::{CatalogSource, Notifier};
use crate::utils::error::Result;
use chrono::{DateTime, Utc};
use std::future::Future;
use std::time::Duration;
use tokio::sync::watch;

pub const DEFAULT_BUY_LINK_TEMPLATE: &str = "http://www.lottecinema.co.kr/LCHS/Contents/Cinema-Mall/gift-shop-detail.aspx?displayItemID={item_id}&displayMiddleClassification={middle_code}";

#[derive(Debug, Clone)]
pub struct PollerSettings {
    pub initial_delay: Duration,
    /// Pause between the end of one cycle and the start of the next.
    pub fixed_delay: Duration,
    /// Purchase link with `{item_id}` and `{middle_code}` placeholders.
    pub buy_link_template: String,
    pub message_style: MessageStyle,
}

impl Default for PollerSettings {
    fn default() -> Self {
        Self {
            initial_delay: Duration::from_millis(1_000),
            fixed_delay: Duration::from_secs(60),
            buy_link_template: DEFAULT_BUY_LINK_TEMPLATE.to_string(),
            message_style: MessageStyle::Text,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PollerStatus {
    pub initialized: bool,
    pub call_count: u64,
    pub total_count: i64,
    pub promo_count: usize,
    pub last_changed: bool,
    pub last_cycle_at: Option<DateTime<Utc>>,
}

/// Outcome of a single [`Poller::cycle`].
#[derive(Debug, Clone, PartialEq)]
pub struct CycleReport {
    pub call_count: u64,
    pub total_count: i64,
    pub promo_count: usize,
    pub cached_promo_count: usize,
    pub changed: bool,
    /// Name of the item announced on the public channel, if any.
    pub notified: Option<String>,
}

pub struct Poller<S: CatalogSource, N: Notifier> {
    source: S,
    notifier: N,
    settings: PollerSettings,
    cache: SnapshotCache,
    call_count: u64,
    status_tx: watch::Sender<PollerStatus>,
}

impl<S: CatalogSource, N: Notifier> Poller<S, N> {
    pub fn new(source: S, notifier: N, settings: PollerSettings) -> Self {
        let (status_tx, _) = watch::channel(PollerStatus::default());
        Self {
            source,
            notifier,
            settings,
            cache: SnapshotCache::default(),
            call_count: 0,
            status_tx,
        }
    }

    pub fn cache(&self) -> &SnapshotCache {
        &self.cache
    }

    pub fn call_count(&self) -> u64 {
        self.call_count
    }

    pub fn subscribe(&self) -> watch::Receiver<PollerStatus> {
        self.status_tx.subscribe()
    }

    /// Seeds the cache from a first fetch and reports the counts to the operator.
    ///
    /// Unlike [`cycle`](Self::cycle), a failed fetch is returned: there is no
    /// previous state to fall back on.
    pub async fn initialize(&mut self) -> Result<()> {
        let snapshot = self.source.fetch().await?;
        let total = total_count(&snapshot);
        let promos = promotional_items(&snapshot);
        let promo_count = promos.len();

        self.cache = SnapshotCache::seeded(total, promos);

        tracing::info!(
            "🎬 Cache seeded: movie tickets {}, promotional tickets {}",
            total,
            promo_count
        );

        let summary = format!(
            "{}\n모든 관람권: {}\n1+1 관람권: {}",
            Platform::LotteCinema,
            total,
            promo_count
        );
        if let Err(e) = self.notifier.send_summary(&summary).await {
            tracing::warn!("⚠️ Failed to send startup summary: {}", e);
        }

        self.publish_status(false, true);
        Ok(())
    }

    /// One fetch, compare, notify and update pass. Never fails: fetch errors
    /// degrade to the sentinel count and notifier errors are logged.
    pub async fn cycle(&mut self) -> CycleReport {
        let fetched = self.source.fetch().await;
        let (total, fresh) = match &fetched {
            Ok(snapshot) => (total_count(snapshot), promotional_items(snapshot)),
            Err(e) => {
                tracing::error!("❌ Catalog fetch failed: {}", e);
                (SENTINEL_COUNT, Vec::new())
            }
        };
        let promo_count = fresh.len();

        self.cache.update_total(total);

        // A failed fetch says nothing about the promotional set.
        let changes = if fetched.is_ok() {
            detector::compare(self.cache.promo_items(), &fresh)
        } else {
            ChangeSet::default()
        };
        let mut notified = None;

        if total == SENTINEL_COUNT {
            match &fetched {
                Ok(snapshot) => match snapshot.to_json() {
                    Ok(raw) => tracing::debug!("Movie ticket classification missing: {}", raw),
                    Err(e) => tracing::debug!("Movie ticket classification missing ({})", e),
                },
                Err(e) => {
                    if let Some(body) = e.raw_body() {
                        tracing::debug!("Raw catalog response: {}", body);
                    }
                }
            }
        } else if changes.is_changed() {
            tracing::debug!(
                "Promotional set changed (added: {}, removed: {})",
                changes.added,
                changes.removed
            );

            let item = detector::find_new_item(self.cache.promo_items(), &fresh);
            if !item.is_empty() {
                let text = self.detail_message(&item, promo_count);
                match self.notifier.send_detail(&text).await {
                    Ok(()) => {
                        tracing::info!("📣 Announced new promotional ticket: {}", item.name);
                        notified = Some(item.name);
                    }
                    Err(e) => tracing::warn!("⚠️ Failed to announce {}: {}", item.name, e),
                }
            }

            self.cache.replace_promos(fresh);
        }

        self.call_count += 1;
        let changed = changes.is_changed();

        tracing::info!(
            "📊 Call #{}: movie tickets {} ({}), promotional {} ({}), changed: {}",
            self.call_count,
            total,
            self.cache.total_count(),
            promo_count,
            self.cache.promo_items().len(),
            changed
        );

        self.publish_status(changed, true);

        CycleReport {
            call_count: self.call_count,
            total_count: total,
            promo_count,
            cached_promo_count: self.cache.promo_items().len(),
            changed,
            notified,
        }
    }

    /// Runs cycles until `shutdown` resolves: the first after `initial_delay`,
    /// then `fixed_delay` after each cycle finishes.
    pub async fn run<F>(&mut self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);
        let mut delay = self.settings.initial_delay;

        tracing::info!(
            "⏱️ Polling every {:?} after an initial delay of {:?}",
            self.settings.fixed_delay,
            self.settings.initial_delay
        );

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    tracing::info!("Poller received shutdown signal after {} calls", self.call_count);
                    break;
                }
                _ = tokio::time::sleep(delay) => {}
            }

            self.cycle().await;
            delay = self.settings.fixed_delay;
        }
    }

    pub fn buy_link(&self, item: &TicketItem) -> String {
        self.settings
            .buy_link_template
            .replace("{item_id}", &item.item_id)
            .replace("{middle_code}", &item.middle_code)
    }

    fn detail_message(&self, item: &TicketItem, promo_count: usize) -> String {
        let message = MessageFormat::new(
            Platform::LotteCinema,
            item.name.as_str(),
            item.restriction.as_str(),
            item.price,
            promo_count,
            self.cache.total_count(),
            self.buy_link(item),
        );

        let body = message.render(self.settings.message_style);
        match self.settings.message_style {
            MessageStyle::Text => format!("{}\n\n이미지:{}", body, item.image_url),
            MessageStyle::Html => format!(
                "{}\n\n<a href=\"{}\">이미지</a>",
                body,
                escape_html(&item.image_url)
            ),
        }
    }

    fn publish_status(&self, last_changed: bool, initialized: bool) {
        self.status_tx.send_replace(PollerStatus {
            initialized,
            call_count: self.call_count,
            total_count: self.cache.total_count(),
            promo_count: self.cache.promo_items().len(),
            last_changed,
            last_cycle_at: Some(Utc::now()),
        });
    }
}
