use thiserror::Error;

#[derive(Error, Debug)]
pub enum CinemaError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Unexpected response status {status}")]
    UnexpectedStatus { status: u16, body: String },

    #[error("Failed to decode catalog response: {message}")]
    DecodeError { message: String, body: String },

    #[error("Notification delivery failed: {message}")]
    NotificationError { message: String },

    #[error("Unsupported platform: {platform}")]
    UnsupportedPlatform { platform: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration field: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl CinemaError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            CinemaError::NotificationError { .. } => ErrorSeverity::Low,
            CinemaError::ApiError(_)
            | CinemaError::UnexpectedStatus { .. }
            | CinemaError::DecodeError { .. }
            | CinemaError::SerializationError(_) => ErrorSeverity::Medium,
            CinemaError::UnsupportedPlatform { .. }
            | CinemaError::ConfigError { .. }
            | CinemaError::ConfigValidationError { .. }
            | CinemaError::InvalidConfigValueError { .. }
            | CinemaError::MissingConfigError { .. } => ErrorSeverity::High,
            CinemaError::IoError(_) => ErrorSeverity::Critical,
        }
    }

    /// Raw upstream body attached to the error, if any.
    pub fn raw_body(&self) -> Option<&str> {
        match self {
            CinemaError::UnexpectedStatus { body, .. } | CinemaError::DecodeError { body, .. } => {
                Some(body)
            }
            _ => None,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            CinemaError::ApiError(_) | CinemaError::UnexpectedStatus { .. } => {
                "Check network connectivity and that source.endpoint is reachable"
            }
            CinemaError::DecodeError { .. } | CinemaError::SerializationError(_) => {
                "The catalog API may have changed its response shape; run catalog_probe to inspect it"
            }
            CinemaError::NotificationError { .. } => {
                "Verify notifier.bot_token and that the bot can post to both chats"
            }
            CinemaError::UnsupportedPlatform { .. } => {
                "Use one of the supported platforms: CGV, 롯데시네마, 메가박스"
            }
            CinemaError::ConfigError { .. }
            | CinemaError::ConfigValidationError { .. }
            | CinemaError::InvalidConfigValueError { .. }
            | CinemaError::MissingConfigError { .. } => {
                "Fix the configuration file and restart"
            }
            CinemaError::IoError(_) => "Check file paths and permissions",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            CinemaError::ApiError(_) | CinemaError::UnexpectedStatus { .. } => {
                format!("Could not reach the cinema API ({})", self)
            }
            CinemaError::DecodeError { .. } => {
                "The cinema API returned data in an unexpected format".to_string()
            }
            _ => self.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CinemaError>;
