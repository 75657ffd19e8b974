use crate::utils::error::{DeskError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(DeskError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(DeskError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(DeskError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_at_least<T: PartialOrd + std::fmt::Display>(
    field_name: &str,
    value: T,
    min_value: T,
) -> Result<()> {
    if value < min_value {
        return Err(DeskError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_one_of<T: PartialEq + std::fmt::Display>(
    field_name: &str,
    value: T,
    allowed: &[T],
) -> Result<()> {
    if !allowed.contains(&value) {
        let allowed_list: Vec<String> = allowed.iter().map(|v| v.to_string()).collect();
        return Err(DeskError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be one of: {}", allowed_list.join(", ")),
        });
    }
    Ok(())
}

/// Rows per page must be one of the sizes the table offers.
pub fn validate_page_size(field_name: &str, page_size: usize) -> Result<()> {
    validate_one_of(field_name, page_size, &crate::core::table::PAGE_SIZE_OPTIONS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("service.endpoint", "https://example.com/api").is_ok());
        assert!(validate_url("service.endpoint", "http://127.0.0.1:8000").is_ok());
        assert!(validate_url("service.endpoint", "").is_err());
        assert!(validate_url("service.endpoint", "invalid-url").is_err());
        assert!(validate_url("service.endpoint", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_at_least() {
        assert!(validate_at_least("service.timeout_seconds", 5u64, 1).is_ok());
        let err = validate_at_least("service.timeout_seconds", 0u64, 1).unwrap_err();
        assert!(err.to_string().contains("at least 1"));
    }

    #[test]
    fn test_validate_page_size() {
        assert!(validate_page_size("table.page_size", 30).is_ok());
        let err = validate_page_size("table.page_size", 50).unwrap_err();
        assert!(err.to_string().contains("10, 15, 20, 25, 30"));
    }

    #[test]
    fn test_validate_one_of() {
        assert!(validate_one_of("table.page_size", 15, &[10, 15, 20]).is_ok());
        let err = validate_one_of("table.page_size", 12, &[10, 15, 20]).unwrap_err();
        assert!(err.to_string().contains("10, 15, 20"));
    }
}
