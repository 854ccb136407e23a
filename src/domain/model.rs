use serde::{Deserialize, Serialize};
use std::time::Duration;

/// 元素相對於視窗的外框（getBoundingClientRect）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub top: f64,
    pub bottom: f64,
}

impl Rect {
    /// 是否有任何部分落在 `[0, viewport_height - margin)` 的觸發帶內
    pub fn within_band(&self, viewport_height: f64, margin: f64) -> bool {
        self.top < viewport_height - margin && self.bottom > 0.0
    }
}

/// 元素在文件中的位置（offsetTop / offsetHeight）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OffsetBox {
    pub top: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SectionAnchor<N> {
    pub node: N,
    pub id: String,
    pub top: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NavLink<N> {
    pub node: N,
    /// href 中 `#` 之後的部分；沒有片段的連結永遠不會被標為 active
    pub fragment: Option<String>,
    pub active: bool,
}

impl<N> NavLink<N> {
    pub fn new(node: N, href: Option<&str>) -> Self {
        Self {
            node,
            fragment: href.and_then(fragment_of),
            active: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnimatableElement<N> {
    pub node: N,
    pub in_hero: bool,
    pub animated: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SkillBar<N> {
    pub fill: N,
    /// data-width 原始值，例如 "85"
    pub width: String,
}

impl<N> SkillBar<N> {
    pub fn style_width(&self) -> String {
        format!("{}%", self.width.trim())
    }
}

/// 延遲執行的工作，由宿主排程後回呼 `on_timer`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "task", rename_all = "snake_case")]
pub enum TimerTask {
    HeroReveal,
    SkillRecheck,
    FragmentScroll { fragment: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deferred {
    pub delay: Duration,
    pub task: TimerTask,
}

impl Deferred {
    pub fn after_ms(ms: u64, task: TimerTask) -> Self {
        Self {
            delay: Duration::from_millis(ms),
            task,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ClickOutcome {
    pub prevent_default: bool,
    pub navigated: bool,
}

/// 控制器狀態的唯讀快照，用於追蹤與測試
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControllerSnapshot {
    pub scroll_y: f64,
    pub navbar_scrolled: bool,
    pub active_section: Option<String>,
    pub revealed: usize,
    pub animatable_total: usize,
    pub skills_filled: bool,
    pub menu_open: bool,
}

/// 取出 `#fragment`；`#` 或沒有 `#` 都回傳 None
pub fn fragment_of(href: &str) -> Option<String> {
    let (_, fragment) = href.split_once('#')?;
    (!fragment.is_empty()).then(|| fragment.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fragment_of() {
        assert_eq!(fragment_of("#about"), Some("about".to_string()));
        assert_eq!(fragment_of("index.html#resume"), Some("resume".to_string()));
        assert_eq!(fragment_of("#"), None);
        assert_eq!(fragment_of("https://github.com/me"), None);
    }

    #[test]
    fn test_within_band() {
        let rect = Rect {
            top: 700.0,
            bottom: 900.0,
        };
        assert!(rect.within_band(800.0, 30.0));
        assert!(!rect.within_band(800.0, 120.0));

        let above = Rect {
            top: -300.0,
            bottom: -1.0,
        };
        assert!(!above.within_band(800.0, 30.0));
    }

    #[test]
    fn test_skill_bar_style_width() {
        let bar = SkillBar {
            fill: 0usize,
            width: " 85 ".to_string(),
        };
        assert_eq!(bar.style_width(), "85%");
    }
}
