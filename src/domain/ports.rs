use crate::domain::model::CatalogSnapshot;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Where catalog snapshots come from.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn fetch(&self) -> Result<CatalogSnapshot>;
}

/// Outbound message sink. Delivery guarantees are the implementation's concern.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Operator-facing channel.
    async fn send_summary(&self, text: &str) -> Result<()>;

    /// Public channel.
    async fn send_detail(&self, text: &str) -> Result<()>;
}
