use crate::adapters::lotte::{GiftItemListRequest, LotteCinemaClient, DEFAULT_TIMEOUT};
use crate::adapters::telegram::{TelegramNotifier, DEFAULT_API_BASE};
use crate::core::format::MessageStyle;
use crate::core::poller::{PollerSettings, DEFAULT_BUY_LINK_TEMPLATE};
use crate::utils::error::{CinemaError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

const DEFAULT_INITIAL_DELAY_MS: u64 = 1_000;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub source: SourceConfig,
    pub schedule: ScheduleConfig,
    #[serde(default)]
    pub notifier: NotifierConfig,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub endpoint: String,
    pub timeout_seconds: Option<u64>,
    pub os_type: Option<String>,
    pub os_version: Option<String>,
    pub buy_link_template: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleConfig {
    pub initial_delay_ms: Option<u64>,
    pub fixed_delay_ms: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NotifierConfig {
    pub api_base: Option<String>,
    pub bot_token: Option<String>,
    pub operator_chat_id: Option<String>,
    pub channel_chat_id: Option<String>,
    pub message_style: Option<MessageStyle>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub json_logs: Option<bool>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(CinemaError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| CinemaError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${TELEGRAM_BOT_TOKEN})；未設定的變數原樣保留
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| CinemaError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_url("source.endpoint", &self.source.endpoint)?;

        if let Some(timeout) = self.source.timeout_seconds {
            validation::validate_range("source.timeout_seconds", timeout, 1, 300)?;
        }

        validation::validate_positive_number("schedule.fixed_delay_ms", self.schedule.fixed_delay_ms, 1)?;

        let template = self.buy_link_template();
        validation::validate_placeholders(
            "source.buy_link_template",
            template,
            &["{item_id}", "{middle_code}"],
        )?;
        validation::validate_url("source.buy_link_template", template)?;

        if let Some(api_base) = &self.notifier.api_base {
            validation::validate_url("notifier.api_base", api_base)?;
        }

        Ok(())
    }

    /// Telegram credentials are only needed when messages are really sent.
    pub fn validate_notifier(&self) -> Result<()> {
        let token = validation::validate_required_field("notifier.bot_token", &self.notifier.bot_token)?;
        validation::validate_non_empty_string("notifier.bot_token", token)?;
        if token.starts_with("${") {
            return Err(CinemaError::InvalidConfigValueError {
                field: "notifier.bot_token".to_string(),
                value: token.clone(),
                reason: "Environment variable is not set".to_string(),
            });
        }

        let operator = validation::validate_required_field(
            "notifier.operator_chat_id",
            &self.notifier.operator_chat_id,
        )?;
        validation::validate_non_empty_string("notifier.operator_chat_id", operator)?;

        let channel = validation::validate_required_field(
            "notifier.channel_chat_id",
            &self.notifier.channel_chat_id,
        )?;
        validation::validate_non_empty_string("notifier.channel_chat_id", channel)?;

        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        self.source
            .timeout_seconds
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_TIMEOUT)
    }

    pub fn buy_link_template(&self) -> &str {
        self.source
            .buy_link_template
            .as_deref()
            .unwrap_or(DEFAULT_BUY_LINK_TEMPLATE)
    }

    pub fn message_style(&self) -> MessageStyle {
        self.notifier.message_style.unwrap_or_default()
    }

    pub fn json_logs(&self) -> bool {
        self.monitoring
            .as_ref()
            .and_then(|m| m.json_logs)
            .unwrap_or(false)
    }

    pub fn poller_settings(&self) -> PollerSettings {
        PollerSettings {
            initial_delay: Duration::from_millis(
                self.schedule.initial_delay_ms.unwrap_or(DEFAULT_INITIAL_DELAY_MS),
            ),
            fixed_delay: Duration::from_millis(self.schedule.fixed_delay_ms),
            buy_link_template: self.buy_link_template().to_string(),
            message_style: self.message_style(),
        }
    }

    pub fn gift_request(&self) -> GiftItemListRequest {
        let mut request = GiftItemListRequest::default();
        if let Some(os_type) = &self.source.os_type {
            request.os_type = os_type.clone();
        }
        if let Some(os_version) = &self.source.os_version {
            request.os_version = os_version.clone();
        }
        request
    }

    pub fn build_client(&self) -> Result<LotteCinemaClient> {
        Ok(LotteCinemaClient::new(&self.source.endpoint, &self.gift_request())?
            .with_timeout(self.timeout()))
    }

    pub fn build_telegram(&self) -> Result<TelegramNotifier> {
        self.validate_notifier()?;

        let notifier = &self.notifier;
        let required = |field: &str, value: &Option<String>| -> Result<String> {
            validation::validate_required_field(field, value).cloned()
        };

        Ok(TelegramNotifier::new(
            notifier.api_base.as_deref().unwrap_or(DEFAULT_API_BASE),
            required("notifier.bot_token", &notifier.bot_token)?,
            required("notifier.operator_chat_id", &notifier.operator_chat_id)?,
            required("notifier.channel_chat_id", &notifier.channel_chat_id)?,
            self.message_style(),
        )
        .with_timeout(self.timeout()))
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const BASIC: &str = r#"
[source]
endpoint = "http://www.lottecinema.co.kr/LCWS/CinemaMall/CinemaMallData.aspx"

[schedule]
fixed_delay_ms = 60000
"#;

    #[test]
    fn test_parse_basic_toml_config() {
        let config = TomlConfig::from_toml_str(BASIC).unwrap();

        assert!(config.validate().is_ok());
        let settings = config.poller_settings();
        assert_eq!(settings.initial_delay, Duration::from_millis(1_000));
        assert_eq!(settings.fixed_delay, Duration::from_secs(60));
        assert_eq!(settings.buy_link_template, DEFAULT_BUY_LINK_TEMPLATE);
        assert_eq!(settings.message_style, MessageStyle::Text);
        assert_eq!(config.timeout(), DEFAULT_TIMEOUT);
        assert!(!config.json_logs());
    }

    #[test]
    fn test_full_config() {
        let toml_content = r#"
[source]
endpoint = "https://api.example.com/mall"
timeout_seconds = 5
os_type = "Firefox"
buy_link_template = "https://shop.example/{item_id}/{middle_code}"

[schedule]
initial_delay_ms = 250
fixed_delay_ms = 30000

[notifier]
api_base = "https://bot.example"
bot_token = "123:abc"
operator_chat_id = "42"
channel_chat_id = "@cinema"
message_style = "html"

[monitoring]
json_logs = true
"#;
        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert!(config.validate().is_ok());
        assert!(config.validate_notifier().is_ok());
        assert!(config.build_telegram().is_ok());
        assert_eq!(config.message_style(), MessageStyle::Html);
        assert_eq!(config.timeout(), Duration::from_secs(5));
        assert_eq!(config.gift_request().os_type, "Firefox");
        assert!(config.json_logs());
        assert_eq!(config.poller_settings().initial_delay, Duration::from_millis(250));
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("CINEMA_WATCH_TEST_TOKEN", "987:xyz");

        let toml_content = r#"
[source]
endpoint = "https://api.example.com/mall"

[schedule]
fixed_delay_ms = 1000

[notifier]
bot_token = "${CINEMA_WATCH_TEST_TOKEN}"
operator_chat_id = "1"
channel_chat_id = "2"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.notifier.bot_token.as_deref(), Some("987:xyz"));

        std::env::remove_var("CINEMA_WATCH_TEST_TOKEN");
    }

    #[test]
    fn test_unset_env_var_fails_notifier_validation() {
        let toml_content = r#"
[source]
endpoint = "https://api.example.com/mall"

[schedule]
fixed_delay_ms = 1000

[notifier]
bot_token = "${CINEMA_WATCH_SURELY_UNSET_VARIABLE}"
operator_chat_id = "1"
channel_chat_id = "2"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_ok());
        assert!(config.validate_notifier().is_err());
    }

    #[test]
    fn test_missing_notifier_section() {
        let config = TomlConfig::from_toml_str(BASIC).unwrap();
        assert!(matches!(
            config.validate_notifier(),
            Err(CinemaError::MissingConfigError { .. })
        ));
    }

    #[test]
    fn test_config_validation() {
        let invalid_endpoint = BASIC.replace("http://www.lottecinema", "ftp://www.lottecinema");
        let config = TomlConfig::from_toml_str(&invalid_endpoint).unwrap();
        assert!(config.validate().is_err());

        let zero_delay = BASIC.replace("60000", "0");
        let config = TomlConfig::from_toml_str(&zero_delay).unwrap();
        assert!(config.validate().is_err());

        let bad_template = format!("{}\n", BASIC).replace(
            "[schedule]",
            "buy_link_template = \"https://shop.example/{item_id}\"\n\n[schedule]",
        );
        let config = TomlConfig::from_toml_str(&bad_template).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_schedule_is_a_parse_error() {
        let toml_content = r#"
[source]
endpoint = "https://api.example.com/mall"
"#;
        assert!(matches!(
            TomlConfig::from_toml_str(toml_content),
            Err(CinemaError::ConfigValidationError { .. })
        ));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(BASIC.as_bytes()).unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.schedule.fixed_delay_ms, 60000);
    }
}
