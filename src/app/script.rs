use crate::utils::error::{FolioError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// 宿主送進事件迴圈的瀏覽器事件
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PageEvent {
    Load,
    Scroll {
        y: f64,
    },
    Resize {
        viewport_height: f64,
    },
    AnchorClick {
        href: String,
    },
    MenuToggle,
    /// `target` 是被點擊元素的 id；省略代表點在沒有 id 的空白處
    DocumentClick {
        #[serde(default)]
        target: Option<String>,
    },
    /// 先依 id 填入欄位，再送出表單
    ContactSubmit {
        #[serde(default)]
        fields: BTreeMap<String, String>,
    },
}

impl PageEvent {
    pub fn label(&self) -> String {
        match self {
            PageEvent::Load => "load".to_string(),
            PageEvent::Scroll { y } => format!("scroll({})", y),
            PageEvent::Resize { viewport_height } => format!("resize({})", viewport_height),
            PageEvent::AnchorClick { href } => format!("click({})", href),
            PageEvent::MenuToggle => "menu_toggle".to_string(),
            PageEvent::DocumentClick { target } => {
                format!("document_click({})", target.as_deref().unwrap_or("-"))
            }
            PageEvent::ContactSubmit { .. } => "submit".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptStep {
    pub at_ms: u64,
    pub event: PageEvent,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Script {
    pub steps: Vec<ScriptStep>,
}

impl Script {
    pub fn from_json(content: &str) -> Result<Self> {
        let script: Script = serde_json::from_str(content)?;
        script.validate()?;
        Ok(script)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// 步驟時間必須遞增，重播時才能依序送出
    fn validate(&self) -> Result<()> {
        for pair in self.steps.windows(2) {
            if pair[1].at_ms < pair[0].at_ms {
                return Err(FolioError::InvalidConfigValueError {
                    field: "steps.at_ms".to_string(),
                    value: pair[1].at_ms.to_string(),
                    reason: format!(
                        "steps must be in time order (previous step at {}ms)",
                        pair[0].at_ms
                    ),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_script() {
        let script = Script::from_json(
            r##"{
                "steps": [
                    {"at_ms": 0, "event": {"type": "load"}},
                    {"at_ms": 50, "event": {"type": "scroll", "y": 640}},
                    {"at_ms": 80, "event": {"type": "anchor_click", "href": "#resume"}},
                    {"at_ms": 90, "event": {"type": "document_click"}},
                    {"at_ms": 95, "event": {"type": "contact_submit", "fields": {"name": "Ada"}}}
                ]
            }"##,
        )
        .unwrap();

        assert_eq!(script.steps.len(), 5);
        assert_eq!(script.steps[1].event, PageEvent::Scroll { y: 640.0 });
        assert_eq!(
            script.steps[3].event,
            PageEvent::DocumentClick { target: None }
        );
        assert_eq!(script.steps[2].event.label(), "click(#resume)");
    }

    #[test]
    fn test_out_of_order_steps_rejected() {
        let result = Script::from_json(
            r#"{"steps": [
                {"at_ms": 100, "event": {"type": "load"}},
                {"at_ms": 50, "event": {"type": "scroll", "y": 10}}
            ]}"#,
        );
        assert!(result.is_err());
    }
}
