//! 聯絡表單：欄位驗證與 mailto: 連結組合。

use crate::config::controller_config::ContactConfig;
use crate::domain::ports::Page;
use crate::domain::selector::Selector;
use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;
use thiserror::Error;
use url::{form_urlencoded, Url};

#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
pub enum FieldError {
    #[error("Please enter your {field}")]
    Missing { field: &'static str },

    #[error("Please enter a valid email address")]
    InvalidEmail,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SubmitOutcome {
    /// 頁面上沒有聯絡表單
    Skipped,
    Invalid { errors: Vec<FieldError> },
    Sent { url: String },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
    })
}

// mailto 需要 %20 而不是 '+'；byte_serialize 已把字面的 '+' 編成 %2B，可以安全替換
fn encode_component(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

impl ContactForm {
    pub fn validate(&self) -> std::result::Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();
        if self.name.trim().is_empty() {
            errors.push(FieldError::Missing { field: "name" });
        }
        if self.email.trim().is_empty() {
            errors.push(FieldError::Missing { field: "email" });
        } else if !email_pattern().is_match(self.email.trim()) {
            errors.push(FieldError::InvalidEmail);
        }
        if self.message.trim().is_empty() {
            errors.push(FieldError::Missing { field: "message" });
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    pub fn subject_line(&self) -> String {
        if self.subject.trim().is_empty() {
            format!("Portfolio contact from {}", self.name.trim())
        } else {
            self.subject.trim().to_string()
        }
    }

    pub fn body(&self) -> String {
        format!(
            "{}\n\nFrom: {} <{}>",
            self.message.trim(),
            self.name.trim(),
            self.email.trim()
        )
    }

    /// 組合 mailto: 連結；收件人無法組成合法網址時回傳 None
    pub fn mailto(&self, recipient: &str) -> Option<String> {
        let raw = format!(
            "mailto:{}?subject={}&body={}",
            recipient.trim(),
            encode_component(&self.subject_line()),
            encode_component(&self.body())
        );
        Url::parse(&raw).ok().map(String::from)
    }
}

/// 從頁面讀取表單、驗證、回饋結果並開啟郵件程式
pub fn submit<P: Page>(page: &mut P, config: &ContactConfig) -> SubmitOutcome {
    let Some(form) = page.element_by_id(&config.form_id) else {
        tracing::trace!("No #{} form, ignoring submit", config.form_id);
        return SubmitOutcome::Skipped;
    };

    let read = |page: &P, selector: &Selector| {
        page.query_within(&form, selector)
            .and_then(|field| page.input_value(&field))
            .unwrap_or_default()
    };
    let contact = ContactForm {
        name: read(page, &config.name_field),
        email: read(page, &config.email_field),
        subject: read(page, &config.subject_field),
        message: read(page, &config.message_field),
    };
    let status = page.query_within(&form, &config.status);

    if let Err(errors) = contact.validate() {
        tracing::debug!("Contact form rejected: {:?}", errors);
        if let Some(status) = &status {
            let text = errors
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(". ");
            page.set_text(status, &text);
            page.set_class(status, &config.success_class, false);
            page.set_class(status, &config.error_class, true);
        }
        return SubmitOutcome::Invalid { errors };
    }

    let Some(url) = contact.mailto(&config.recipient) else {
        tracing::warn!("Cannot build mailto link for recipient {}", config.recipient);
        return SubmitOutcome::Skipped;
    };

    page.open_url(&url);
    if let Some(status) = &status {
        page.set_text(status, &config.success_message);
        page.set_class(status, &config.error_class, false);
        page.set_class(status, &config.success_class, true);
    }
    page.reset_form(&form);

    tracing::info!("📧 Contact form handed to mail client");
    SubmitOutcome::Sent { url }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> ContactForm {
        ContactForm {
            name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            subject: String::new(),
            message: "Hi & welcome + thanks".to_string(),
        }
    }

    #[test]
    fn test_validate_required_fields() {
        let errors = ContactForm::default().validate().unwrap_err();
        assert_eq!(
            errors,
            vec![
                FieldError::Missing { field: "name" },
                FieldError::Missing { field: "email" },
                FieldError::Missing { field: "message" },
            ]
        );
    }

    #[test]
    fn test_validate_email_format() {
        let mut form = filled();
        form.email = "ada@example".to_string();
        assert_eq!(form.validate(), Err(vec![FieldError::InvalidEmail]));

        form.email = "  ada@example.com ".to_string();
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_default_subject_uses_name() {
        assert_eq!(filled().subject_line(), "Portfolio contact from Ada Lovelace");

        let mut form = filled();
        form.subject = " Hello ".to_string();
        assert_eq!(form.subject_line(), "Hello");
    }

    #[test]
    fn test_mailto_encoding() {
        let url = filled().mailto("me@example.com").unwrap();

        assert!(url.starts_with(
            "mailto:me@example.com?subject=Portfolio%20contact%20from%20Ada%20Lovelace"
        ));
        assert!(url.contains("Hi%20%26%20welcome%20%2B%20thanks"));
        assert!(url.contains("%0A%0AFrom%3A%20Ada%20Lovelace"));
        assert!(!url.contains('+'));
    }
}
