use crate::utils::error::{FolioError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// 驗證郵件收件人能組成合法的 mailto: URL
pub fn validate_mail_recipient(field_name: &str, address: &str) -> Result<()> {
    validate_non_empty_string(field_name, address)?;

    if !address.contains('@') || address.starts_with('@') || address.ends_with('@') {
        return Err(FolioError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: address.to_string(),
            reason: "Address must look like name@domain".to_string(),
        });
    }

    match Url::parse(&format!("mailto:{}", address)) {
        Ok(url) if url.scheme() == "mailto" => Ok(()),
        Ok(url) => Err(FolioError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: address.to_string(),
            reason: format!("Unexpected URL scheme: {}", url.scheme()),
        }),
        Err(e) => Err(FolioError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: address.to_string(),
            reason: format!("Invalid mail address: {}", e),
        }),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(FolioError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(FolioError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_required_list<'a, T>(field_name: &str, values: &'a [T]) -> Result<&'a [T]> {
    if values.is_empty() {
        return Err(FolioError::MissingConfigError {
            field: field_name.to_string(),
        });
    }
    Ok(values)
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(FolioError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

/// class 名稱不能含空白，否則 classList 操作會失敗
pub fn validate_class_name(field_name: &str, value: &str) -> Result<()> {
    validate_non_empty_string(field_name, value)?;
    if value.chars().any(char::is_whitespace) {
        return Err(FolioError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Class names cannot contain whitespace".to_string(),
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
    // NaN 與任何值比較都是 false，寫成正向判斷才會被擋下
    if !(value >= min && value <= max) {
        return Err(FolioError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_mail_recipient() {
        assert!(validate_mail_recipient("contact.recipient", "me@example.com").is_ok());
        assert!(validate_mail_recipient("contact.recipient", "").is_err());
        assert!(validate_mail_recipient("contact.recipient", "no-at-sign").is_err());
        assert!(validate_mail_recipient("contact.recipient", "@example.com").is_err());
    }

    #[test]
    fn test_validate_class_name() {
        assert!(validate_class_name("navbar.scrolled_class", "scrolled").is_ok());
        assert!(validate_class_name("navbar.scrolled_class", "two words").is_err());
        assert!(validate_class_name("navbar.scrolled_class", "  ").is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("scroll_spy.offset_px", 120.0, 0.0, 1000.0).is_ok());
        assert!(validate_range("scroll_spy.offset_px", -1.0, 0.0, 1000.0).is_err());
        assert!(validate_range("scroll_spy.offset_px", f64::NAN, 0.0, 1000.0).is_err());
        assert!(validate_range("reveal.hero_delay_ms", 60_001u64, 0, 60_000).is_err());
    }

    #[test]
    fn test_validate_required_list() {
        let ids: Vec<String> = vec![];
        assert!(matches!(
            validate_required_list("navbar.ids", &ids),
            Err(FolioError::MissingConfigError { .. })
        ));
    }
}
