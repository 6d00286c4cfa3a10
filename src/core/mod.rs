pub mod cache;
pub mod detector;
pub mod filter;
pub mod format;
pub mod poller;

pub use crate::domain::model::{CatalogSnapshot, TicketItem};
pub use crate::domain::ports::{CatalogSource, Notifier};
pub use crate::utils::error::Result;
