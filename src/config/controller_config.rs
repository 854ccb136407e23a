use crate::domain::selector::Selector;
use crate::utils::error::{FolioError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// 控制器設定：頁面標記契約（id、class、選擇器）與各項門檻值。
/// 每個區段都有預設值，TOML 只需覆寫想改的欄位。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    pub navbar: NavbarConfig,
    pub scroll_spy: ScrollSpyConfig,
    pub reveal: RevealConfig,
    pub skills: SkillsConfig,
    pub navigation: NavigationConfig,
    pub menu: MenuConfig,
    pub contact: ContactConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NavbarConfig {
    /// 依序嘗試的 id，第一個找到的就是導覽列
    pub ids: Vec<String>,
    pub scrolled_class: String,
    pub threshold_px: f64,
}

impl Default for NavbarConfig {
    fn default() -> Self {
        Self {
            ids: vec!["mainNav".to_string(), "navbar".to_string()],
            scrolled_class: "scrolled".to_string(),
            threshold_px: 30.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollSpyConfig {
    pub sections: Selector,
    pub links: Selector,
    pub active_class: String,
    pub offset_px: f64,
}

impl Default for ScrollSpyConfig {
    fn default() -> Self {
        Self {
            sections: "section[id]".parse().unwrap_or_else(|_| Selector::class("section")),
            links: Selector::class("nav-link"),
            active_class: "active-link".to_string(),
            offset_px: 120.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    pub elements: Selector,
    pub hero_elements: Selector,
    pub animated_class: String,
    pub margin_px: f64,
    pub hero_delay_ms: u64,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            elements: "[data-animate]"
                .parse()
                .unwrap_or_else(|_| Selector::class("animate")),
            hero_elements: ".hero [data-animate]"
                .parse()
                .unwrap_or_else(|_| Selector::class("hero")),
            animated_class: "animated".to_string(),
            margin_px: 30.0,
            hero_delay_ms: 200,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillsConfig {
    pub section_id: String,
    pub percents: Selector,
    pub item: Selector,
    pub fill: Selector,
    pub width_attribute: String,
    pub margin_px: f64,
    pub recheck_delays_ms: Vec<u64>,
}

impl Default for SkillsConfig {
    fn default() -> Self {
        Self {
            section_id: "resume".to_string(),
            percents: Selector::class("skill-percent"),
            item: Selector::class("skill-bar-item"),
            fill: Selector::class("progress-fill"),
            width_attribute: "data-width".to_string(),
            margin_px: 80.0,
            recheck_delays_ms: vec![1000, 2000],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    pub anchors: Selector,
    pub fragment_scroll_delay_ms: u64,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            anchors: ".nav-link, .nav-logo"
                .parse()
                .unwrap_or_else(|_| Selector::class("nav-link")),
            fragment_scroll_delay_ms: 300,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuConfig {
    pub menu: Selector,
    pub toggle_id: String,
    pub open_class: String,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            menu: Selector::class("nav-list"),
            toggle_id: "navToggle".to_string(),
            open_class: "active".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactConfig {
    pub form_id: String,
    pub recipient: String,
    pub name_field: Selector,
    pub email_field: Selector,
    pub subject_field: Selector,
    pub message_field: Selector,
    pub status: Selector,
    pub error_class: String,
    pub success_class: String,
    pub success_message: String,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            form_id: "contactForm".to_string(),
            recipient: "hello@example.com".to_string(),
            name_field: Selector::id("name"),
            email_field: Selector::id("email"),
            subject_field: Selector::id("subject"),
            message_field: Selector::id("message"),
            status: Selector::class("form-status"),
            error_class: "form-error".to_string(),
            success_class: "form-success".to_string(),
            success_message: "Opening your mail client...".to_string(),
        }
    }
}

impl ControllerConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(FolioError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| FolioError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${CONTACT_EMAIL})；未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| FolioError::ConfigValidationError {
            field: "env_substitution".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    fn validate_config(&self) -> Result<()> {
        validation::validate_required_list("navbar.ids", &self.navbar.ids)?;
        for id in &self.navbar.ids {
            validation::validate_non_empty_string("navbar.ids", id)?;
        }
        validation::validate_class_name("navbar.scrolled_class", &self.navbar.scrolled_class)?;
        validation::validate_range("navbar.threshold_px", self.navbar.threshold_px, 0.0, 10_000.0)?;

        validation::validate_class_name("scroll_spy.active_class", &self.scroll_spy.active_class)?;
        validation::validate_range(
            "scroll_spy.offset_px",
            self.scroll_spy.offset_px,
            0.0,
            10_000.0,
        )?;

        validation::validate_class_name("reveal.animated_class", &self.reveal.animated_class)?;
        validation::validate_range("reveal.margin_px", self.reveal.margin_px, 0.0, 10_000.0)?;
        validation::validate_range("reveal.hero_delay_ms", self.reveal.hero_delay_ms, 0, 60_000)?;

        validation::validate_non_empty_string("skills.section_id", &self.skills.section_id)?;
        validation::validate_non_empty_string(
            "skills.width_attribute",
            &self.skills.width_attribute,
        )?;
        validation::validate_range("skills.margin_px", self.skills.margin_px, 0.0, 10_000.0)?;
        for delay in &self.skills.recheck_delays_ms {
            validation::validate_range("skills.recheck_delays_ms", *delay, 0, 60_000)?;
        }

        validation::validate_range(
            "navigation.fragment_scroll_delay_ms",
            self.navigation.fragment_scroll_delay_ms,
            0,
            60_000,
        )?;

        validation::validate_non_empty_string("menu.toggle_id", &self.menu.toggle_id)?;
        validation::validate_class_name("menu.open_class", &self.menu.open_class)?;

        validation::validate_non_empty_string("contact.form_id", &self.contact.form_id)?;
        validation::validate_mail_recipient("contact.recipient", &self.contact.recipient)?;
        validation::validate_class_name("contact.error_class", &self.contact.error_class)?;
        validation::validate_class_name("contact.success_class", &self.contact.success_class)?;

        Ok(())
    }
}

impl Validate for ControllerConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults_match_page_markup() {
        let config = ControllerConfig::default();

        assert_eq!(config.navbar.threshold_px, 30.0);
        assert_eq!(config.scroll_spy.offset_px, 120.0);
        assert_eq!(config.scroll_spy.sections.to_string(), "section[id]");
        assert_eq!(config.reveal.hero_elements.to_string(), ".hero [data-animate]");
        assert_eq!(config.skills.section_id, "resume");
        assert_eq!(config.skills.recheck_delays_ms, vec![1000, 2000]);
        assert_eq!(config.navigation.anchors.to_string(), ".nav-link, .nav-logo");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let toml_content = r#"
[navbar]
threshold_px = 50

[scroll_spy]
links = ".menu a"
"#;

        let config = ControllerConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.navbar.threshold_px, 50.0);
        assert_eq!(config.navbar.scrolled_class, "scrolled");
        assert_eq!(config.scroll_spy.links.to_string(), ".menu a");
        assert_eq!(config.scroll_spy.offset_px, 120.0);
    }

    #[test]
    fn test_nan_geometry_is_rejected() {
        for toml_content in [
            "[scroll_spy]\noffset_px = nan",
            "[navbar]\nthreshold_px = nan",
            "[reveal]\nmargin_px = nan",
            "[skills]\nmargin_px = inf",
        ] {
            let config = ControllerConfig::from_toml_str(toml_content).unwrap();
            let result = config.validate();
            assert!(
                matches!(result, Err(FolioError::InvalidConfigValueError { .. })),
                "{} should be rejected",
                toml_content
            );
        }
    }

    #[test]
    fn test_invalid_selector_is_rejected() {
        let toml_content = r#"
[scroll_spy]
links = "nav > a"
"#;

        assert!(ControllerConfig::from_toml_str(toml_content).is_err());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("FOLIO_TEST_RECIPIENT", "someone@example.org");

        let toml_content = r#"
[contact]
recipient = "${FOLIO_TEST_RECIPIENT}"
"#;

        let config = ControllerConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.contact.recipient, "someone@example.org");

        std::env::remove_var("FOLIO_TEST_RECIPIENT");
    }

    #[test]
    fn test_config_validation() {
        let toml_content = r#"
[contact]
recipient = "not-an-address"
"#;

        let config = ControllerConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());

        let mut config = ControllerConfig::default();
        config.navbar.ids.clear();
        assert!(matches!(
            config.validate(),
            Err(FolioError::MissingConfigError { .. })
        ));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[skills]
section_id = "experience"
recheck_delays_ms = [500]
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = ControllerConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.skills.section_id, "experience");
        assert_eq!(config.skills.recheck_delays_ms, vec![500]);
    }
}
