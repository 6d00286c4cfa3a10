use crate::core::format::MessageStyle;
use crate::core::Notifier;
use crate::utils::error::{CinemaError, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_API_BASE: &str = "https://api.telegram.org";

#[derive(Debug, Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    parse_mode: Option<&'static str>,
    disable_web_page_preview: bool,
}

#[derive(Debug, Deserialize)]
struct BotReply {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

/// Sends summaries to the operator chat and details to the public channel via the Bot API.
pub struct TelegramNotifier {
    client: Client,
    api_base: String,
    bot_token: String,
    operator_chat_id: String,
    channel_chat_id: String,
    style: MessageStyle,
    timeout: Duration,
}

impl TelegramNotifier {
    pub fn new(
        api_base: impl Into<String>,
        bot_token: impl Into<String>,
        operator_chat_id: impl Into<String>,
        channel_chat_id: impl Into<String>,
        style: MessageStyle,
    ) -> Self {
        Self {
            client: Client::new(),
            api_base: api_base.into().trim_end_matches('/').to_string(),
            bot_token: bot_token.into(),
            operator_chat_id: operator_chat_id.into(),
            channel_chat_id: channel_chat_id.into(),
            style,
            timeout: Duration::from_secs(10),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    async fn send(&self, chat_id: &str, text: &str) -> Result<()> {
        let url = format!("{}/bot{}/sendMessage", self.api_base, self.bot_token);
        let payload = SendMessage {
            chat_id,
            text,
            parse_mode: match self.style {
                MessageStyle::Text => None,
                MessageStyle::Html => Some("HTML"),
            },
            disable_web_page_preview: false,
        };

        let response = self
            .client
            .post(&url)
            .json(&payload)
            .timeout(self.timeout)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        let reply: Option<BotReply> = serde_json::from_str(&body).ok();
        match reply {
            Some(BotReply { ok: true, .. }) if status.is_success() => {
                tracing::debug!("Message delivered to {}", chat_id);
                Ok(())
            }
            Some(BotReply { description, .. }) => Err(CinemaError::NotificationError {
                message: format!(
                    "chat {} rejected message ({}): {}",
                    chat_id,
                    status,
                    description.unwrap_or_else(|| "no description".to_string())
                ),
            }),
            None => Err(CinemaError::NotificationError {
                message: format!("chat {} returned {}: {}", chat_id, status, body),
            }),
        }
    }
}

#[async_trait::async_trait]
impl Notifier for TelegramNotifier {
    async fn send_summary(&self, text: &str) -> Result<()> {
        self.send(&self.operator_chat_id, text).await
    }

    async fn send_detail(&self, text: &str) -> Result<()> {
        self.send(&self.channel_chat_id, text).await
    }
}

/// Writes messages to the log instead of sending them.
#[derive(Debug, Default, Clone)]
pub struct LogNotifier;

#[async_trait::async_trait]
impl Notifier for LogNotifier {
    async fn send_summary(&self, text: &str) -> Result<()> {
        tracing::info!("[dry-run summary]\n{}", text);
        Ok(())
    }

    async fn send_detail(&self, text: &str) -> Result<()> {
        tracing::info!("[dry-run detail]\n{}", text);
        Ok(())
    }
}
