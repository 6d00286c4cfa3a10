pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliArgs;

pub use crate::adapters::lotte::{GiftItemListRequest, LotteCinemaClient};
pub use crate::adapters::telegram::{LogNotifier, TelegramNotifier};
pub use crate::config::toml_config::TomlConfig;
pub use crate::core::poller::{CycleReport, Poller, PollerSettings, PollerStatus};
pub use crate::utils::error::{CinemaError, Result};
