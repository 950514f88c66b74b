// ABOUTME: Input validation for domain entities
// ABOUTME: Required-field and format checks applied before persistence

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("Invalid value for {field}: {value}")]
    InvalidEnum { field: &'static str, value: String },

    #[error("Invalid {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

/// Fail with `MissingField` when `value` is empty or whitespace
pub fn require(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    Ok(())
}

/// Validate that `value` is an absolute http(s) URL
pub fn validate_url(field: &'static str, value: &str) -> Result<(), ValidationError> {
    require(field, value)?;

    let parsed = url::Url::parse(value).map_err(|e| ValidationError::InvalidValue {
        field,
        reason: e.to_string(),
    })?;

    match parsed.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(ValidationError::InvalidValue {
            field,
            reason: format!("unsupported scheme '{}'", scheme),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_rejects_blank() {
        assert_eq!(require("title", "  "), Err(ValidationError::MissingField("title")));
        assert!(require("title", "Quarterly review").is_ok());
    }

    #[test]
    fn test_validate_url() {
        assert!(validate_url("url", "https://example.com/docs").is_ok());
        assert!(validate_url("url", "not a url").is_err());
        assert!(matches!(
            validate_url("url", "ftp://example.com"),
            Err(ValidationError::InvalidValue { field: "url", .. })
        ));
    }
}
