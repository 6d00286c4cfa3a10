use crate::utils::error::{CinemaError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(CinemaError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(CinemaError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(CinemaError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_positive_number(field_name: &str, value: u64, min_value: u64) -> Result<()> {
    if value < min_value {
        return Err(CinemaError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| CinemaError::MissingConfigError {
        field: field_name.to_string(),
    })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(CinemaError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(CinemaError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

/// Checks that a template string mentions every placeholder it will be filled with.
pub fn validate_placeholders(field_name: &str, template: &str, placeholders: &[&str]) -> Result<()> {
    let missing: Vec<&str> = placeholders
        .iter()
        .copied()
        .filter(|p| !template.contains(p))
        .collect();

    if !missing.is_empty() {
        return Err(CinemaError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: template.to_string(),
            reason: format!("Missing placeholders: {}", missing.join(", ")),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("source.endpoint", "https://example.com").is_ok());
        assert!(validate_url("source.endpoint", "http://example.com").is_ok());
        assert!(validate_url("source.endpoint", "").is_err());
        assert!(validate_url("source.endpoint", "invalid-url").is_err());
        assert!(validate_url("source.endpoint", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("schedule.fixed_delay_ms", 5, 1).is_ok());
        assert!(validate_positive_number("schedule.fixed_delay_ms", 0, 1).is_err());
    }

    #[test]
    fn test_validate_non_empty_string() {
        assert!(validate_non_empty_string("notifier.bot_token", "abc").is_ok());
        assert!(validate_non_empty_string("notifier.bot_token", "   ").is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("source.timeout_seconds", 10, 1, 120).is_ok());
        assert!(validate_range("source.timeout_seconds", 0, 1, 120).is_err());
        assert!(validate_range("source.timeout_seconds", 500, 1, 120).is_err());
    }

    #[test]
    fn test_validate_placeholders() {
        let template = "http://x/?id={item_id}&m={middle_code}";
        assert!(validate_placeholders("t", template, &["{item_id}", "{middle_code}"]).is_ok());
        assert!(validate_placeholders("t", "http://x/?id={item_id}", &["{item_id}", "{middle_code}"]).is_err());
    }

    #[test]
    fn test_validate_required_field() {
        let present = Some(3u64);
        let absent: Option<u64> = None;
        assert_eq!(*validate_required_field("a", &present).unwrap(), 3);
        assert!(matches!(
            validate_required_field("a", &absent),
            Err(CinemaError::MissingConfigError { .. })
        ));
    }
}
