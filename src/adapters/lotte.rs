use crate::core::{CatalogSnapshot, CatalogSource};
use crate::utils::error::{CinemaError, Result};
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

pub const DEFAULT_OS_TYPE: &str = "Chrome";
pub const DEFAULT_OS_VERSION: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/63.0.3239.132 Safari/537.36";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// JSON carried in the `paramList` form field.
#[derive(Debug, Clone, Serialize)]
pub struct GiftItemListRequest {
    #[serde(rename = "MethodName")]
    pub method_name: String,
    #[serde(rename = "channelType")]
    pub channel_type: String,
    #[serde(rename = "osType")]
    pub os_type: String,
    #[serde(rename = "osVersion")]
    pub os_version: String,
    #[serde(rename = "multiLanguageID")]
    pub multi_language_id: String,
    #[serde(rename = "classificationCode")]
    pub classification_code: String,
}

impl Default for GiftItemListRequest {
    fn default() -> Self {
        Self {
            method_name: "CinemaMallGiftItemList".to_string(),
            channel_type: "HO".to_string(),
            os_type: DEFAULT_OS_TYPE.to_string(),
            os_version: DEFAULT_OS_VERSION.to_string(),
            multi_language_id: "KR".to_string(),
            classification_code: "20".to_string(),
        }
    }
}

/// Gift-shop catalog client for the Lotte Cinema web API.
pub struct LotteCinemaClient {
    client: Client,
    endpoint: String,
    param_list: String,
    timeout: Duration,
}

impl LotteCinemaClient {
    pub fn new(endpoint: impl Into<String>, request: &GiftItemListRequest) -> Result<Self> {
        Ok(Self {
            client: Client::new(),
            endpoint: endpoint.into(),
            param_list: serde_json::to_string(request)?,
            timeout: DEFAULT_TIMEOUT,
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn param_list(&self) -> &str {
        &self.param_list
    }
}

#[async_trait::async_trait]
impl CatalogSource for LotteCinemaClient {
    async fn fetch(&self) -> Result<CatalogSnapshot> {
        tracing::debug!("Requesting gift item list from: {}", self.endpoint);

        let response = self
            .client
            .post(&self.endpoint)
            .form(&[("paramList", self.param_list.as_str())])
            .timeout(self.timeout)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("Catalog response status: {}", status);

        let body = response.text().await?;

        if !status.is_success() {
            return Err(CinemaError::UnexpectedStatus {
                status: status.as_u16(),
                body,
            });
        }

        CatalogSnapshot::from_json(&body).map_err(|e| CinemaError::DecodeError {
            message: e.to_string(),
            body,
        })
    }
}
